use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::cmp::Ordering;

use super::{Component, Palette};
use crate::action::Action;
use crate::content::{APP_NAME, TAGLINE};
use crate::state::{Page, Theme};

/// Ticks for one sweep of the title gradient while a request is in flight
const TITLE_SWEEP_TICKS: u32 = 24;

/// Rows under the title: tagline + tabs.
pub const HEADER_OVERHEAD: u16 = 2;

pub struct Header;

pub struct HeaderProps {
    pub page: Page,
    pub theme: Theme,
    pub palette: Palette,
    pub is_loading: bool,
    pub tick_count: u32,
}

fn art_color((r, g, b): (u8, u8, u8)) -> ArtColor {
    ArtColor::rgb(r, g, b)
}

fn title_fill(palette: &Palette, phase: f32) -> Fill {
    let [from, to] = palette.title_gradient;
    let (from, to) = (art_color(from), art_color(to));
    let phase = phase.rem_euclid(1.0);
    let mid = from.interpolate(to, 0.5);
    let edge = from.interpolate(to, 0.08);
    let base_stops = [(0.0, edge), (0.35, from), (0.5, mid), (0.65, to), (1.0, edge)];

    let edge_color = sample_color(&base_stops, (1.0 - phase).rem_euclid(1.0));
    let mut shifted = Vec::with_capacity(base_stops.len() + 2);
    shifted.push((0.0, edge_color));
    shifted.push((1.0, edge_color));
    for (pos, color) in base_stops {
        shifted.push(((pos + phase) % 1.0, color));
    }
    shifted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    let stops = shifted
        .into_iter()
        .map(|(pos, color)| artbox::ColorStop::new(pos, color))
        .collect();

    Fill::Linear(LinearGradient::new(5.0, stops))
}

fn sample_color(stops: &[(f32, ArtColor)], position: f32) -> ArtColor {
    let pos = position.clamp(0.0, 1.0);
    let mut prev = stops[0];
    for stop in stops {
        if stop.0 >= pos {
            if (stop.0 - prev.0).abs() < f32::EPSILON {
                return stop.1;
            }
            let t = (pos - prev.0) / (stop.0 - prev.0);
            return prev.1.interpolate(stop.1, t);
        }
        prev = *stop;
    }
    prev.1
}

fn sweep_phase(tick_count: u32) -> f32 {
    (tick_count % TITLE_SWEEP_TICKS) as f32 / TITLE_SWEEP_TICKS as f32
}

/// `1 Home  2 Forecast ...` with the current page highlighted
pub fn tab_line(current: Page, theme: Theme, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();
    for page in Page::ALL {
        let style = if page == current {
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            palette.text()
        };
        spans.push(Span::styled(format!("{} ", page.hotkey()), palette.dim()));
        spans.push(Span::styled(format!(" {} ", page.title()), style));
        spans.push(Span::raw("  "));
    }
    let marker = match theme {
        Theme::Dark => "\u{263e} dark",
        Theme::Light => "\u{2600} light",
    };
    spans.push(Span::styled(marker, palette.dim()));
    Line::from(spans).centered()
}

impl Component<Action> for Header {
    type Props<'a> = HeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet title
            Constraint::Length(1), // Tagline
            Constraint::Length(1), // Tabs
        ])
        .split(area);

        let phase = if props.is_loading {
            sweep_phase(props.tick_count)
        } else {
            0.0
        };
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_fill(&props.palette, phase));
        frame.render_widget(ArtBox::new(&renderer, APP_NAME), chunks[0]);

        let tagline = Line::from(Span::styled(TAGLINE, props.palette.dim())).centered();
        frame.render_widget(Paragraph::new(tagline), chunks[1]);

        let tabs = tab_line(props.page, props.theme, &props.palette);
        frame.render_widget(Paragraph::new(tabs), chunks[2]);
    }
}
