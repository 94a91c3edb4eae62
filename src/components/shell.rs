use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::extreme_page::{ExtremePage, ExtremePageProps};
use super::forecast_page::{ForecastPage, ForecastPageProps};
use super::header::{Header, HeaderProps, HEADER_OVERHEAD};
use super::home_page::{HomePage, HomePageProps};
use super::info_pages::{AboutPage, AboutPageProps, ContactPage, ContactPageProps};
use super::query_form::{QueryForm, QueryFormProps};
use super::sidebar::{Sidebar, SidebarProps, SIDEBAR_WIDTH};
use super::visual_page::{VisualPage, VisualPageProps};
use super::{Component, Footer, FooterProps, Palette};
use crate::action::Action;
use crate::state::{AppState, Page};

/// Height of the miniwi title font
const TITLE_HEIGHT: u16 = 4;
/// Heading + bordered input + hint + spacer
const FORM_HEIGHT: u16 = 6;

/// How a query page wires its input
pub struct QueryBinding {
    pub heading: &'static str,
    pub placeholder: &'static str,
    pub submit_label: &'static str,
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

pub fn query_binding(page: Page) -> Option<QueryBinding> {
    match page {
        Page::Forecast => Some(QueryBinding {
            heading: "Quantum Weather Forecaster",
            placeholder: "Enter a location (e.g., New York)",
            submit_label: "Get Forecast",
            on_change: Action::ForecastQueryChange,
            on_submit: Action::ForecastSubmit,
        }),
        Page::Extreme => Some(QueryBinding {
            heading: "Weather Prediction",
            placeholder: "Enter location",
            submit_label: "Predict",
            on_change: Action::ExtremeQueryChange,
            on_submit: Action::ExtremeSubmit,
        }),
        Page::Visualization => Some(QueryBinding {
            heading: "Quantum Weather Predictor",
            placeholder: "Enter city name",
            submit_label: "Generate Visualization",
            on_change: Action::VisualQueryChange,
            on_submit: Action::VisualSubmit,
        }),
        Page::Home | Page::About | Page::Contact => None,
    }
}

/// Read-only view of state for the shell
pub struct AppShellProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Whole-screen chrome: header, current page, sidebar, footer, key hints.
///
/// Owns every page so their images live exactly as long as the page is shown.
pub struct AppShell {
    form: QueryForm,
    home: HomePage,
    forecast: ForecastPage,
    extreme: ExtremePage,
    visual: VisualPage,
    about: AboutPage,
    shown: Option<Page>,
}

impl Default for AppShell {
    fn default() -> Self {
        Self {
            form: QueryForm::new(),
            home: HomePage::new(),
            forecast: ForecastPage::new(),
            extreme: ExtremePage,
            visual: VisualPage::new(),
            about: AboutPage::new(),
            shown: None,
        }
    }
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a key to the focused query input.
    pub fn handle_input_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let (Some(binding), Some(value)) = (query_binding(state.page), state.current_query())
        else {
            return Vec::new();
        };
        self.form
            .handle_event(
                event,
                QueryFormProps {
                    value,
                    placeholder: binding.placeholder,
                    submit_label: binding.submit_label,
                    is_focused: state.editing,
                    is_loading: false,
                    spinner: state.spinner(),
                    palette: Palette::for_theme(state.theme),
                    on_change: binding.on_change,
                    on_submit: binding.on_submit,
                },
            )
            .into_iter()
            .collect()
    }

    /// Release whatever the previous page held once another page is shown.
    fn track_page(&mut self, page: Page) {
        if self.shown == Some(page) {
            return;
        }
        match self.shown {
            Some(Page::Home) => self.home.leave(),
            Some(Page::Forecast) => self.forecast.leave(),
            Some(Page::Visualization) => self.visual.leave(),
            Some(Page::About) => self.about.leave(),
            _ => {}
        }
        self.form.reset();
        self.shown = Some(page);
    }

    fn shell_key(state: &AppState, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Char(c @ '1'..='6') => Page::from_hotkey(c).map(Action::NavGoto),
            KeyCode::Char('/') => Some(Action::NavOpen),
            KeyCode::Char('t') => Some(Action::UiToggleTheme),
            KeyCode::Char('f') => Some(Action::SidebarToggle),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('x') if state.page == Page::Home && state.welcome_visible => {
                Some(Action::UiDismissWelcome)
            }
            KeyCode::Char('e') | KeyCode::Char('i') if state.page.has_query() => {
                Some(Action::EditStart)
            }
            KeyCode::Up if state.page == Page::Forecast && !state.history.is_empty() => {
                let last = state.history.len() - 1;
                let index = state.history.selected.checked_sub(1).unwrap_or(last);
                Some(Action::ForecastHistorySelect(index))
            }
            KeyCode::Down if state.page == Page::Forecast && !state.history.is_empty() => {
                Some(Action::ForecastHistorySelect(
                    (state.history.selected + 1) % state.history.len(),
                ))
            }
            KeyCode::Enter if state.page == Page::Forecast && !state.history.is_empty() => {
                Some(Action::ForecastHistoryPick)
            }
            KeyCode::Enter if state.page.has_query() => Some(Action::EditStart),
            _ => None,
        }
    }

    fn hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
        if state.editing {
            return vec![
                StatusBarHint::new("enter", "submit"),
                StatusBarHint::new("esc", "done"),
            ];
        }
        let mut hints = vec![
            StatusBarHint::new("1-6", "pages"),
            StatusBarHint::new("/", "search"),
        ];
        if state.page.has_query() {
            hints.push(StatusBarHint::new("e", "edit"));
        }
        if state.page == Page::Forecast && !state.history.is_empty() {
            hints.push(StatusBarHint::new("\u{2191}\u{2193}", "history"));
        }
        if state.page == Page::Home && state.welcome_visible {
            hints.push(StatusBarHint::new("x", "dismiss"));
        }
        hints.push(StatusBarHint::new("f", "filters"));
        hints.push(StatusBarHint::new("t", "theme"));
        hints.push(StatusBarHint::new("q", "quit"));
        hints
    }

    fn render_page(&mut self, frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
        let spinner = state.spinner();
        let body = match query_binding(state.page) {
            Some(binding) => {
                let chunks = Layout::vertical([
                    Constraint::Length(1),               // Heading
                    Constraint::Length(FORM_HEIGHT - 2), // Form
                    Constraint::Length(1),               // Spacer
                    Constraint::Fill(1),                 // Page
                ])
                .split(area);
                frame.render_widget(
                    Paragraph::new(
                        Line::from(Span::styled(binding.heading, palette.label())).centered(),
                    ),
                    chunks[0],
                );
                self.form.render(
                    frame,
                    chunks[1],
                    QueryFormProps {
                        value: state.current_query().unwrap_or_default(),
                        placeholder: binding.placeholder,
                        submit_label: binding.submit_label,
                        is_focused: state.editing,
                        is_loading: state.page_loading(),
                        spinner,
                        palette,
                        on_change: binding.on_change,
                        on_submit: binding.on_submit,
                    },
                );
                chunks[3]
            }
            None => area,
        };

        match state.page {
            Page::Home => self.home.render(
                frame,
                body,
                HomePageProps {
                    welcome_visible: state.welcome_visible,
                    thumbnails: &state.thumbnails,
                    palette,
                },
            ),
            Page::Forecast => self.forecast.render(
                frame,
                body,
                ForecastPageProps {
                    forecast: &state.forecast,
                    history: &state.history,
                    spinner,
                    palette,
                },
            ),
            Page::Extreme => self.extreme.render(
                frame,
                body,
                ExtremePageProps {
                    extreme: &state.extreme,
                    spinner,
                    palette,
                },
            ),
            Page::Visualization => self.visual.render(
                frame,
                body,
                VisualPageProps {
                    visualization: &state.visualization,
                    spinner,
                    palette,
                },
            ),
            Page::About => self.about.render(
                frame,
                body,
                AboutPageProps {
                    thumbnails: &state.thumbnails,
                    palette,
                },
            ),
            Page::Contact => ContactPage.render(frame, body, ContactPageProps { palette }),
        }
    }
}

impl Component<Action> for AppShell {
    type Props<'a> = AppShellProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => Self::shell_key(props.state, key.code),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: AppShellProps<'_>) {
        let state = props.state;
        let palette = Palette::for_theme(state.theme);
        self.track_page(state.page);

        frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

        let chunks = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT + HEADER_OVERHEAD), // Header
            Constraint::Length(1),                              // Spacer
            Constraint::Min(1),                                 // Page
            Constraint::Length(1),                              // Footer
            Constraint::Length(1),                              // Help bar
        ])
        .split(area);

        Header.render(
            frame,
            chunks[0],
            HeaderProps {
                page: state.page,
                theme: state.theme,
                palette,
                is_loading: state.any_loading(),
                tick_count: state.tick_count,
            },
        );

        let (page_area, sidebar_area) = if state.sidebar.open {
            let columns =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(SIDEBAR_WIDTH)])
                    .split(chunks[2]);
            (columns[0], Some(columns[1]))
        } else {
            (chunks[2], None)
        };
        self.render_page(frame, page_area, state, palette);
        if let Some(sidebar_area) = sidebar_area {
            Sidebar.render(
                frame,
                sidebar_area,
                SidebarProps {
                    state: &state.sidebar,
                    is_focused: true,
                    palette,
                },
            );
        }

        Footer.render(frame, chunks[3], FooterProps { palette });

        let hints = Self::hints(state);
        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ResolvedLocation;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn actions_for(state: &AppState, event: EventKind) -> Vec<Action> {
        let mut shell = AppShell::new();
        shell
            .handle_event(
                &event,
                AppShellProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_number_keys_navigate() {
        let state = AppState::default();
        actions_for(&state, EventKind::Key(key("2"))).assert_first(Action::NavGoto(Page::Forecast));
        actions_for(&state, EventKind::Key(key("6"))).assert_first(Action::NavGoto(Page::Contact));
        actions_for(&state, EventKind::Key(key("7"))).assert_empty();
    }

    #[test]
    fn test_edit_only_on_query_pages() {
        let home = AppState::default();
        actions_for(&home, EventKind::Key(key("e"))).assert_empty();

        let extreme = AppState::new(Page::Extreme, Default::default());
        actions_for(&extreme, EventKind::Key(key("e"))).assert_first(Action::EditStart);
    }

    #[test]
    fn test_history_keys_on_forecast_page() {
        let mut state = AppState::new(Page::Forecast, Default::default());
        for address in ["Oslo", "Lima"] {
            state.history.record(&ResolvedLocation {
                address: address.into(),
                lat: 0.0,
                lon: 0.0,
            });
        }
        actions_for(&state, press(KeyCode::Down)).assert_first(Action::ForecastHistorySelect(1));
        actions_for(&state, press(KeyCode::Up)).assert_first(Action::ForecastHistorySelect(1));
        actions_for(&state, press(KeyCode::Enter)).assert_first(Action::ForecastHistoryPick);
    }

    #[test]
    fn test_dismiss_welcome_only_on_home() {
        let state = AppState::default();
        actions_for(&state, EventKind::Key(key("x"))).assert_first(Action::UiDismissWelcome);

        let about = AppState::new(Page::About, Default::default());
        actions_for(&about, EventKind::Key(key("x"))).assert_empty();
    }

    #[test]
    fn test_unfocused_ignores() {
        let state = AppState::default();
        let mut shell = AppShell::new();
        let actions: Vec<_> = shell
            .handle_event(
                &EventKind::Key(key("q")),
                AppShellProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_input_routes_to_current_page() {
        let mut shell = AppShell::new();
        let mut state = AppState::new(Page::Visualization, Default::default());
        state.editing = true;
        state.visualization.query = "Paris".into();
        let actions = shell.handle_input_event(&press(KeyCode::Enter), &state);
        actions.assert_first(Action::VisualSubmit("Paris".into()));
    }
}
