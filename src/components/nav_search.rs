use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, ScrollbarStyle, SelectList,
    SelectListBehavior, SelectListProps, SelectListStyle, SelectionStyle, TextInput,
    TextInputProps, TextInputStyle, centered_rect, highlight_substring,
};

use super::{Component, Palette};
use crate::action::Action;
use crate::state::Page;

const PLACEHOLDER: &str = "Search...";

/// Header search: type part of a page name, pick a suggestion, jump there
pub struct NavSearch {
    input: TextInput,
    list: SelectList,
    modal: Modal,
    was_open: bool,
}

pub struct NavSearchProps<'a> {
    pub query: &'a str,
    pub suggestions: &'a [Page],
    pub selected: usize,
    pub is_focused: bool,
    pub palette: Palette,
    pub on_query_change: fn(String) -> Action,
    pub on_query_submit: fn(String) -> Action,
    pub on_select: fn(usize) -> Action,
}

impl Default for NavSearch {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl NavSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
            self.list = SelectList::new();
        }
        self.was_open = is_open;
    }

    fn suggestion_items(
        suggestions: &[Page],
        query: &str,
        palette: &Palette,
    ) -> Vec<Line<'static>> {
        let base = palette.text();
        let highlight = Style::default()
            .fg(palette.accent_alt)
            .add_modifier(Modifier::BOLD);
        suggestions
            .iter()
            .map(|page| {
                let mut line = highlight_substring(page.title(), query.trim(), base, highlight);
                line.spans
                    .push(Span::styled(format!("  {}", page.route()), palette.dim()));
                line
            })
            .collect()
    }

    fn list_style(padding: Padding) -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding,
                bg: None,
                fg: None,
            },
            selection: SelectionStyle::default(),
            scrollbar: ScrollbarStyle::default(),
        }
    }
}

impl Component<Action> for NavSearch {
    type Props<'a> = NavSearchProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::NavClose],
            KeyCode::Enter => {
                if props.suggestions.is_empty() {
                    return vec![(props.on_query_submit)(props.query.to_string())];
                }
                return vec![Action::NavConfirm];
            }
            KeyCode::Down | KeyCode::Up => {
                if props.suggestions.is_empty() {
                    return Vec::new();
                }
                let items = Self::suggestion_items(props.suggestions, props.query, &props.palette);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected,
                    is_focused: true,
                    style: Self::list_style(Padding::xy(1, 1)),
                    behavior: SelectListBehavior::default(),
                    on_select: props.on_select,
                    render_item: &|item| item.clone(),
                };
                return self
                    .list
                    .handle_event(event, list_props)
                    .into_iter()
                    .collect();
            }
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_query_change,
            on_submit: props.on_query_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 8 {
            return;
        }

        let NavSearch {
            input, list, modal, ..
        } = self;
        let palette = props.palette;
        let modal_area = centered_rect(56, 12, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Input
                Constraint::Min(1),    // Suggestions
            ])
            .split(content_area);

            let input_props = TextInputProps {
                value: props.query,
                placeholder: PLACEHOLDER,
                is_focused: props.is_focused,
                style: TextInputStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::all(1),
                        bg: Some(palette.selection_bg),
                        fg: Some(palette.text),
                    },
                    placeholder_style: Some(palette.dim()),
                    cursor_style: None,
                },
                on_change: props.on_query_change,
                on_submit: props.on_query_submit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[0], input_props);

            if props.suggestions.is_empty() {
                let hint = if props.query.trim().is_empty() {
                    "Type a page name"
                } else {
                    "No matching page"
                };
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(hint, palette.dim()))).centered(),
                    chunks[1],
                );
                return;
            }

            let items = Self::suggestion_items(props.suggestions, props.query, &palette);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: props.selected,
                is_focused: props.is_focused,
                style: Self::list_style(Padding::all(1)),
                behavior: SelectListBehavior::default(),
                on_select: props.on_select,
                render_item: &|item| item.clone(),
            };
            list.render(frame, chunks[1], list_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(palette.surface),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::NavClose,
                render_content: &mut render_content,
            },
        );
    }
}
