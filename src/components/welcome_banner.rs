use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::{Component, Palette};
use crate::action::Action;
use crate::content::{WELCOME_TEXT, WELCOME_TITLE};

pub const WELCOME_HEIGHT: u16 = 6;

pub struct WelcomeBanner;

pub struct WelcomeBannerProps {
    pub palette: Palette,
}

impl Component<Action> for WelcomeBanner {
    type Props<'a> = WelcomeBannerProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.accent_alt))
            .style(Style::default().bg(palette.selection_bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Min(1),    // Text
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(WELCOME_TITLE, palette.label()))),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(WELCOME_TEXT, palette.text())).wrap(Wrap { trim: true }),
            chunks[1],
        );

        let button = Style::default()
            .fg(palette.accent_alt)
            .bg(palette.text)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Take the Tour ", button),
                Span::raw("  "),
                Span::styled("[x] ", palette.label()),
                Span::styled("Maybe Later", palette.text()),
            ])),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Theme;
    use tui_dispatch::testing::RenderHarness;

    #[test]
    fn test_renders_copy_and_dismiss_hint() {
        let mut render = RenderHarness::new(100, WELCOME_HEIGHT);
        let output = render.render_to_string_plain(|frame| {
            WelcomeBanner.render(
                frame,
                frame.area(),
                WelcomeBannerProps {
                    palette: Palette::for_theme(Theme::Dark),
                },
            );
        });
        assert!(output.contains(WELCOME_TITLE));
        assert!(output.contains("Maybe Later"));
    }
}
