use std::collections::BTreeMap;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::news_banner::{NewsBanner, NewsBannerProps};
use super::weather_card::{WeatherCard, WeatherCardProps, CARD_HEIGHT};
use super::welcome_banner::{WelcomeBanner, WelcomeBannerProps, WELCOME_HEIGHT};
use super::{Component, Palette};
use crate::action::Action;
use crate::content::{HERO_TITLE, HOME_CARDS, NEWS};
use crate::state::Thumbnail;

/// Landing page: welcome banner, city cards, news
pub struct HomePage {
    banners: Vec<NewsBanner>,
}

pub struct HomePageProps<'a> {
    pub welcome_visible: bool,
    pub thumbnails: &'a BTreeMap<String, Thumbnail>,
    pub palette: Palette,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            banners: NEWS.iter().map(|_| NewsBanner::new()).collect(),
        }
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release banner artwork when leaving the page
    pub fn leave(&mut self) {
        self.banners.iter_mut().for_each(NewsBanner::release);
    }
}

fn heading(frame: &mut Frame, area: Rect, text: &'static str, palette: &Palette) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, palette.heading()))),
        area,
    );
}

impl Component<Action> for HomePage {
    type Props<'a> = HomePageProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let welcome_height = if props.welcome_visible {
            WELCOME_HEIGHT
        } else {
            0
        };
        let chunks = Layout::vertical([
            Constraint::Length(welcome_height),
            Constraint::Length(1),           // Hero
            Constraint::Length(1),           // "Current Weather"
            Constraint::Length(CARD_HEIGHT), // Cards
            Constraint::Length(1),           // "Latest News"
            Constraint::Fill(1),             // Banners
        ])
        .split(area);

        if props.welcome_visible {
            WelcomeBanner.render(frame, chunks[0], WelcomeBannerProps { palette });
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(HERO_TITLE, palette.label())).centered()),
            chunks[1],
        );

        heading(frame, chunks[2], "Current Weather", &palette);
        let card_areas =
            Layout::horizontal(HOME_CARDS.iter().map(|_| Constraint::Fill(1))).split(chunks[3]);
        for (card, card_area) in HOME_CARDS.iter().zip(card_areas.iter()) {
            WeatherCard.render(frame, *card_area, WeatherCardProps { card, palette });
        }

        heading(frame, chunks[4], "Latest News", &palette);
        let banner_areas =
            Layout::horizontal(NEWS.iter().map(|_| Constraint::Fill(1))).split(chunks[5]);
        for ((banner, story), banner_area) in self
            .banners
            .iter_mut()
            .zip(NEWS.iter())
            .zip(banner_areas.iter())
        {
            banner.render(
                frame,
                *banner_area,
                NewsBannerProps {
                    story,
                    thumbnail: props.thumbnails.get(story.image_url),
                    palette,
                },
            );
        }
    }
}
