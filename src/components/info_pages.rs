//! Static About and Contact pages

use std::collections::BTreeMap;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::news_banner::{NewsBanner, NewsBannerProps};
use super::{Component, Palette};
use crate::action::Action;
use crate::content::{ABOUT_CARDS, ABOUT_INTRO, ABOUT_SECTIONS, ABOUT_TITLE, CONTACT_TEXT};
use crate::state::Thumbnail;

pub struct AboutPage {
    cards: Vec<NewsBanner>,
}

pub struct AboutPageProps<'a> {
    pub thumbnails: &'a BTreeMap<String, Thumbnail>,
    pub palette: Palette,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self {
            cards: ABOUT_CARDS.iter().map(|_| NewsBanner::new()).collect(),
        }
    }
}

impl AboutPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leave(&mut self) {
        self.cards.iter_mut().for_each(NewsBanner::release);
    }
}

fn about_text(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for paragraph in ABOUT_INTRO {
        lines.push(Line::from(Span::styled(paragraph, palette.text())));
        lines.push(Line::raw(""));
    }
    for (title, text) in ABOUT_SECTIONS {
        lines.push(Line::from(Span::styled(title, palette.heading())));
        lines.push(Line::from(Span::styled(text, palette.text())));
        lines.push(Line::raw(""));
    }
    lines
}

impl Component<Action> for AboutPage {
    type Props<'a> = AboutPageProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let chunks = Layout::vertical([
            Constraint::Length(1),      // Title
            Constraint::Fill(3),        // Text
            Constraint::Percentage(40), // Cards
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(ABOUT_TITLE, palette.label())).centered()),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(about_text(&palette)).wrap(Wrap { trim: true }),
            chunks[1],
        );

        let card_areas =
            Layout::horizontal(ABOUT_CARDS.iter().map(|_| Constraint::Fill(1))).split(chunks[2]);
        for ((card, story), card_area) in self
            .cards
            .iter_mut()
            .zip(ABOUT_CARDS.iter())
            .zip(card_areas.iter())
        {
            card.render(
                frame,
                *card_area,
                NewsBannerProps {
                    story,
                    thumbnail: props.thumbnails.get(story.image_url),
                    palette,
                },
            );
        }
    }
}

pub struct ContactPage;

pub struct ContactPageProps {
    pub palette: Palette,
}

impl Component<Action> for ContactPage {
    type Props<'a> = ContactPageProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let lines = vec![
            Line::from(Span::styled("Contact Us", palette.label())).centered(),
            Line::raw(""),
            Line::from(Span::styled(CONTACT_TEXT, palette.text())).centered(),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }
}
