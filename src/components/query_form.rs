use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, Palette};
use crate::action::Action;

/// Location input plus the submit hint, shared by the query pages
pub struct QueryForm {
    input: TextInput,
}

impl Default for QueryForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

pub struct QueryFormProps<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    /// Text of the submit button
    pub submit_label: &'a str,
    pub is_focused: bool,
    pub is_loading: bool,
    pub spinner: &'a str,
    pub palette: Palette,
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl QueryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget cursor state, e.g. when another page takes over the form.
    pub fn reset(&mut self) {
        self.input = TextInput::new();
    }

    fn input_style(palette: &Palette, padding: Padding) -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding,
                bg: None,
                fg: Some(palette.text),
            },
            placeholder_style: Some(palette.dim()),
            cursor_style: None,
        }
    }
}

impl Component<Action> for QueryForm {
    type Props<'a> = QueryFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Esc => return vec![Action::EditStop],
                KeyCode::Enter => return vec![(props.on_submit)(props.value.to_string())],
                _ => {}
            }
        }
        let input_props = TextInputProps {
            value: props.value,
            placeholder: props.placeholder,
            is_focused: true,
            style: Self::input_style(&props.palette, Padding::default()),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Bordered input
            Constraint::Length(1), // Submit hint
        ])
        .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(props.palette.border(props.is_focused));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        let input_props = TextInputProps {
            value: props.value,
            placeholder: props.placeholder,
            is_focused: props.is_focused,
            style: Self::input_style(&props.palette, Padding::xy(1, 0)),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, inner, input_props);

        let hint = if props.is_loading {
            Line::from(vec![
                Span::styled(format!("{} ", props.spinner), props.palette.label()),
                Span::styled("Loading...", props.palette.dim()),
            ])
        } else if props.is_focused {
            Line::from(vec![
                Span::styled("[Enter] ", props.palette.label()),
                Span::styled(props.submit_label.to_string(), props.palette.text()),
                Span::styled("  [Esc] done", props.palette.dim()),
            ])
        } else {
            Line::from(vec![
                Span::styled("[e] ", props.palette.label()),
                Span::styled("edit", props.palette.dim()),
            ])
        };
        frame.render_widget(Paragraph::new(hint).centered(), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Theme;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn props(value: &str, is_focused: bool) -> QueryFormProps<'_> {
        QueryFormProps {
            value,
            placeholder: "Enter location",
            submit_label: "Predict",
            is_focused,
            is_loading: false,
            spinner: "|",
            palette: Palette::for_theme(Theme::Dark),
            on_change: Action::ExtremeQueryChange,
            on_submit: Action::ExtremeSubmit,
        }
    }

    #[test]
    fn test_enter_submits_value() {
        let mut form = QueryForm::new();
        let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let actions: Vec<_> = form
            .handle_event(&enter, props("Lima", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::ExtremeSubmit("Lima".into()));
    }

    #[test]
    fn test_escape_leaves_edit_mode() {
        let mut form = QueryForm::new();
        let esc = EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let actions: Vec<_> = form
            .handle_event(&esc, props("Lima", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::EditStop);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut form = QueryForm::new();
        let actions: Vec<_> = form
            .handle_event(&EventKind::Key(key("a")), props("", false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_shows_placeholder_and_hint() {
        let mut render = RenderHarness::new(50, 4);
        let mut form = QueryForm::new();
        let output = render.render_to_string_plain(|frame| {
            form.render(frame, frame.area(), props("", true));
        });
        assert!(output.contains("Enter location"));
        assert!(output.contains("Predict"));
    }
}
