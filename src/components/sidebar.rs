use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_dispatch::EventKind;

use super::{Component, Palette};
use crate::action::Action;
use crate::content::DATA_SOURCES;
use crate::state::{SidebarState, SIDEBAR_ROWS};

pub const SIDEBAR_WIDTH: u16 = 32;

/// Filter panel. Values are editable but nothing reads them.
pub struct Sidebar;

pub struct SidebarProps<'a> {
    pub state: &'a SidebarState,
    pub is_focused: bool,
    pub palette: Palette,
}

fn row_line(label: String, selected: bool, palette: &Palette) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(palette.text)
            .bg(palette.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        palette.text()
    };
    let marker = if selected { "\u{25b8} " } else { "  " };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(palette.accent)),
        Span::styled(label, style),
    ])
}

impl Component<Action> for Sidebar {
    type Props<'a> = SidebarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        let cursor = props.state.cursor;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                Some(Action::SidebarSelect(cursor.checked_sub(1).unwrap_or(SIDEBAR_ROWS - 1)))
            }
            KeyCode::Down | KeyCode::Char('j') => {
                Some(Action::SidebarSelect((cursor + 1) % SIDEBAR_ROWS))
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SidebarActivate),
            KeyCode::Esc | KeyCode::Char('f') => Some(Action::SidebarToggle),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let SidebarProps {
            state,
            is_focused,
            palette,
        } = props;
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(palette.border(is_focused))
            .title(Span::styled(" Filters ", palette.heading()))
            .style(Style::default().bg(palette.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled("Temperature Unit", palette.label())),
            row_line(
                format!("\u{25c2} {} \u{25b8}", state.unit.label()),
                state.cursor == 0,
                &palette,
            ),
            Line::raw(""),
            Line::from(Span::styled("Data Sources", palette.label())),
        ];
        for (index, source) in DATA_SOURCES.iter().enumerate() {
            let checked = state.sources.get(index).copied().unwrap_or(false);
            let mark = if checked { "[x]" } else { "[ ]" };
            lines.push(row_line(
                format!("{mark} {source}"),
                state.cursor == index + 1,
                &palette,
            ));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Update Frequency", palette.label())));
        lines.push(row_line(
            format!("\u{25c2} {} \u{25b8}", state.frequency.label()),
            state.cursor == SIDEBAR_ROWS - 1,
            &palette,
        ));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "\u{2191}\u{2193} move  \u{23ce} change  f close",
            palette.dim(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Theme;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn props(state: &SidebarState) -> SidebarProps<'_> {
        SidebarProps {
            state,
            is_focused: true,
            palette: Palette::for_theme(Theme::Dark),
        }
    }

    #[test]
    fn test_cursor_wraps() {
        let state = SidebarState::default();
        let actions: Vec<_> = Sidebar
            .handle_event(&press(KeyCode::Up), props(&state))
            .into_iter()
            .collect();
        actions.assert_first(Action::SidebarSelect(SIDEBAR_ROWS - 1));
    }

    #[test]
    fn test_enter_activates_row() {
        let state = SidebarState::default();
        let actions: Vec<_> = Sidebar
            .handle_event(&press(KeyCode::Enter), props(&state))
            .into_iter()
            .collect();
        actions.assert_first(Action::SidebarActivate);
    }

    #[test]
    fn test_render_lists_filters() {
        let mut render = RenderHarness::new(SIDEBAR_WIDTH, 20);
        let state = SidebarState::default();
        let output = render.render_to_string_plain(|frame| {
            Sidebar.render(frame, frame.area(), props(&state));
        });
        assert!(output.contains("Celsius"));
        assert!(output.contains("[ ] Satellite Data"));
        assert!(output.contains("Real-time"));
    }
}
