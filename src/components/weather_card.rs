use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{Component, Palette};
use crate::action::Action;
use crate::content::CityCard;

pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub card: &'a CityCard,
    pub palette: Palette,
}

/// Card rows: border + location + temperature + condition + blank + stats + border
pub const CARD_HEIGHT: u16 = 7;

pub fn condition_icon(condition: &str) -> &'static str {
    match condition.to_ascii_lowercase().as_str() {
        "sunny" | "clear" => "\u{2600}\u{fe0f}",
        "partly cloudy" => "\u{26c5}",
        "rainy" | "rain" => "\u{1f327}\u{fe0f}",
        "stormy" | "thunderstorm" => "\u{26c8}\u{fe0f}",
        "snowy" | "snow" => "\u{2744}\u{fe0f}",
        _ => "\u{2601}\u{fe0f}",
    }
}

/// Warm colours for hot readings, cool ones for cold
pub fn temperature_color(celsius: i32) -> Color {
    match celsius {
        t if t < 0 => Color::Rgb(150, 200, 255),
        t if t < 15 => Color::Rgb(100, 180, 255),
        t if t < 25 => Color::Rgb(100, 200, 150),
        t if t < 35 => Color::Rgb(255, 180, 80),
        _ => Color::Rgb(255, 100, 80),
    }
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let WeatherCardProps { card, palette } = props;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border(false))
            .style(Style::default().bg(palette.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // Location
            Constraint::Length(1), // Temperature
            Constraint::Length(1), // Condition
            Constraint::Length(1), // Stats
        ])
        .flex(Flex::Center)
        .split(inner);

        let centered = |line: Line<'static>, area: Rect, frame: &mut Frame| {
            frame.render_widget(Paragraph::new(line.centered()), area);
        };

        centered(
            Line::from(Span::styled(card.location, palette.heading())),
            rows[0],
            frame,
        );
        centered(
            Line::from(Span::styled(
                format!("{}°C", card.temperature),
                Style::default()
                    .fg(temperature_color(card.temperature))
                    .add_modifier(Modifier::BOLD),
            )),
            rows[1],
            frame,
        );
        centered(
            Line::from(vec![
                Span::raw(format!("{} ", condition_icon(card.condition))),
                Span::styled(card.condition, palette.text()),
            ]),
            rows[2],
            frame,
        );
        centered(
            Line::from(vec![
                Span::styled("\u{1f4a7} ", palette.dim()),
                Span::styled(format!("{}%", card.humidity), palette.text()),
                Span::raw("   "),
                Span::styled("\u{1f32c} ", palette.dim()),
                Span::styled(format!("{} km/h", card.wind_speed), palette.text()),
            ]),
            rows[3],
            frame,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::HOME_CARDS;
    use crate::state::Theme;
    use tui_dispatch::testing::RenderHarness;

    #[test]
    fn test_card_shows_every_field() {
        let mut render = RenderHarness::new(30, CARD_HEIGHT);
        let output = render.render_to_string_plain(|frame| {
            WeatherCard.render(
                frame,
                frame.area(),
                WeatherCardProps {
                    card: &HOME_CARDS[0],
                    palette: Palette::for_theme(Theme::Light),
                },
            );
        });
        assert!(output.contains("New Delhi"));
        assert!(output.contains("23°C"));
        assert!(output.contains("Partly Cloudy"));
        assert!(output.contains("65%"));
        assert!(output.contains("12 km/h"));
    }

    #[test]
    fn test_unknown_condition_gets_cloud() {
        assert_eq!(condition_icon("Hazy"), condition_icon("cloudy"));
        assert_ne!(condition_icon("Sunny"), condition_icon("Rainy"));
    }
}
