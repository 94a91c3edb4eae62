//! Reducer - pure function: (state, action) -> DispatchResult

use tracing::debug;
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::api::{
    self, Contract, ExtremeContract, ForecastContract, QueryGate, VisualizationContract,
};
use crate::content;
use crate::effect::Effect;
use crate::state::{suggest_pages, AppState, Page, Submission, Thumbnail, SIDEBAR_ROWS};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Forecast actions =====
        Action::ForecastQueryChange(query) => {
            state.forecast.query = query;
            DispatchResult::changed()
        }

        Action::ForecastSubmit(query) => {
            state.forecast.query = query.clone();
            state.editing = false;
            start::<ForecastContract, _>(&mut state.forecast, &query, |request_id, location| {
                Effect::SubmitForecast {
                    request_id,
                    location,
                }
            })
        }

        Action::ForecastHistorySelect(index) => {
            if index < state.history.len() && index != state.history.selected {
                state.history.selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ForecastHistoryPick => {
            let Some(address) = state
                .history
                .get(state.history.selected)
                .map(|loc| loc.address.clone())
            else {
                return DispatchResult::unchanged();
            };
            state.forecast.query = address.clone();
            let result =
                start::<ForecastContract, _>(&mut state.forecast, &address, |request_id, location| {
                    Effect::SubmitForecast {
                        request_id,
                        location,
                    }
                });
            state.history.picked_request = Some(state.forecast.request_id);
            result
        }

        Action::ForecastDidLoad { request_id, report } => {
            let location = report.location.clone();
            if !settle("forecast", &mut state.forecast, request_id, Ok(report)) {
                return DispatchResult::unchanged();
            }
            if state.history.picked_request.take() == Some(request_id) {
                return DispatchResult::changed();
            }
            if state.history.record(&location) {
                debug!(address = %location.address, "Added location to history");
            }
            DispatchResult::changed()
        }

        Action::ForecastDidError {
            request_id,
            message,
        } => settled(settle("forecast", &mut state.forecast, request_id, Err(message))),

        // ===== Extreme actions =====
        Action::ExtremeQueryChange(query) => {
            state.extreme.query = query;
            DispatchResult::changed()
        }

        Action::ExtremeSubmit(query) => {
            state.extreme.query = query.clone();
            state.editing = false;
            start::<ExtremeContract, _>(&mut state.extreme, &query, |request_id, location| {
                Effect::SubmitExtreme {
                    request_id,
                    location,
                }
            })
        }

        Action::ExtremeDidLoad {
            request_id,
            prediction,
        } => settled(settle("extreme", &mut state.extreme, request_id, Ok(prediction))),

        Action::ExtremeDidError {
            request_id,
            message,
        } => settled(settle("extreme", &mut state.extreme, request_id, Err(message))),

        // ===== Visual actions =====
        Action::VisualQueryChange(query) => {
            state.visualization.query = query;
            DispatchResult::changed()
        }

        Action::VisualSubmit(query) => {
            state.visualization.query = query.clone();
            state.editing = false;
            start::<VisualizationContract, _>(&mut state.visualization, &query, |request_id, city| {
                Effect::SubmitVisualization { request_id, city }
            })
        }

        Action::VisualDidLoad { request_id, image } => settled(settle(
            "visualization",
            &mut state.visualization,
            request_id,
            Ok(image),
        )),

        Action::VisualDidError {
            request_id,
            message,
        } => settled(settle(
            "visualization",
            &mut state.visualization,
            request_id,
            Err(message),
        )),

        // ===== Nav actions =====
        Action::NavOpen => {
            state.nav_open = true;
            state.editing = false;
            state.sidebar.open = false;
            clear_nav(state);
            DispatchResult::changed()
        }

        Action::NavClose => {
            state.nav_open = false;
            clear_nav(state);
            DispatchResult::changed()
        }

        Action::NavQueryChange(query) => {
            state.nav_suggestions = suggest_pages(&query);
            state.nav_query = query;
            state.nav_selected = 0;
            DispatchResult::changed()
        }

        Action::NavQuerySubmit(query) => {
            let target = suggest_pages(&query).first().copied();
            state.nav_open = false;
            clear_nav(state);
            if let Some(page) = target {
                goto(state, page);
            }
            DispatchResult::changed()
        }

        Action::NavSelect(index) => {
            if index < state.nav_suggestions.len() && index != state.nav_selected {
                state.nav_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::NavConfirm => {
            let Some(page) = state.nav_suggestions.get(state.nav_selected).copied() else {
                return DispatchResult::unchanged();
            };
            state.nav_open = false;
            clear_nav(state);
            goto(state, page);
            DispatchResult::changed()
        }

        Action::NavGoto(page) => {
            if page == state.page {
                return DispatchResult::unchanged();
            }
            goto(state, page);
            DispatchResult::changed()
        }

        // ===== Edit actions =====
        Action::EditStart => {
            if state.page.has_query() && !state.editing {
                state.editing = true;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::EditStop => {
            if state.editing {
                state.editing = false;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Sidebar actions =====
        Action::SidebarToggle => {
            state.sidebar.open = !state.sidebar.open;
            state.sidebar.cursor = 0;
            if state.sidebar.open {
                state.editing = false;
            }
            DispatchResult::changed()
        }

        Action::SidebarSelect(index) => {
            if index < SIDEBAR_ROWS && index != state.sidebar.cursor {
                state.sidebar.cursor = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SidebarActivate => {
            let sidebar = &mut state.sidebar;
            match sidebar.cursor {
                0 => sidebar.unit = sidebar.unit.toggle(),
                row if row == SIDEBAR_ROWS - 1 => sidebar.frequency = sidebar.frequency.next(),
                row => {
                    if let Some(checked) = sidebar.sources.get_mut(row - 1) {
                        *checked = !*checked;
                    }
                }
            }
            DispatchResult::changed()
        }

        // ===== Thumbnail actions =====
        Action::ThumbnailDidLoad { url, payload } => {
            state.thumbnails.insert(url, Thumbnail::Ready(payload));
            DispatchResult::changed()
        }

        Action::ThumbnailDidError { url } => {
            state.thumbnails.insert(url, Thumbnail::Failed);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiToggleTheme => {
            state.theme = state.theme.toggle();
            DispatchResult::changed()
        }

        Action::UiDismissWelcome => {
            if state.welcome_visible {
                state.welcome_visible = false;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Init => {
            let urls: Vec<String> = content::artwork_urls()
                .into_iter()
                .filter(|url| !state.thumbnails.contains_key(*url))
                .map(str::to_string)
                .collect();
            if urls.is_empty() {
                return DispatchResult::unchanged();
            }
            for url in &urls {
                state.thumbnails.insert(url.clone(), Thumbnail::Loading);
            }
            DispatchResult::changed_with(Effect::LoadThumbnails { urls })
        }

        Action::Tick => {
            if state.any_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Begin a submission on `cycle` according to the contract's blank-input policy.
fn start<C, F>(cycle: &mut Submission<C::Output>, query: &str, effect: F) -> DispatchResult<Effect>
where
    C: Contract,
    F: FnOnce(u64, String) -> Effect,
{
    match api::gate::<C>(query) {
        QueryGate::Send(query) => {
            let request_id = cycle.begin();
            debug!(contract = C::NAME, request_id, "Submission started");
            DispatchResult::changed_with(effect(request_id, query))
        }
        QueryGate::Skip => DispatchResult::changed(),
        QueryGate::Reject(message) => {
            cycle.reject(message);
            DispatchResult::changed()
        }
    }
}

fn settle<T>(
    name: &'static str,
    cycle: &mut Submission<T>,
    request_id: u64,
    outcome: Result<T, String>,
) -> bool {
    let applied = cycle.resolve(request_id, outcome);
    if !applied {
        debug!(
            contract = name,
            request_id,
            latest = cycle.request_id,
            "Dropped stale response"
        );
    }
    applied
}

fn settled(applied: bool) -> DispatchResult<Effect> {
    if applied {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

fn clear_nav(state: &mut AppState) {
    state.nav_query.clear();
    state.nav_suggestions.clear();
    state.nav_selected = 0;
}

fn goto(state: &mut AppState, page: Page) {
    state.page = page;
    state.editing = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ForecastReport, ResolvedLocation};

    fn report(address: &str) -> ForecastReport {
        ForecastReport {
            location: ResolvedLocation {
                address: address.into(),
                lat: 1.0,
                lon: 2.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_forecast_submit_sets_loading() {
        let mut state = AppState::default();
        state.editing = true;

        let result = reducer(&mut state, Action::ForecastSubmit("Oslo".into()));

        assert!(result.changed);
        assert!(state.forecast.is_loading());
        assert!(!state.editing);
        assert_eq!(
            result.effects,
            vec![Effect::SubmitForecast {
                request_id: 1,
                location: "Oslo".into()
            }]
        );
    }

    #[test]
    fn test_forecast_load_records_history_once() {
        let mut state = AppState::default();

        for _ in 0..2 {
            reducer(&mut state, Action::ForecastSubmit("Oslo".into()));
            let request_id = state.forecast.request_id;
            reducer(
                &mut state,
                Action::ForecastDidLoad {
                    request_id,
                    report: report("Oslo, Norway"),
                },
            );
        }

        assert_eq!(state.history.len(), 1);
        assert!(state.forecast.result.is_loaded());
    }

    #[test]
    fn test_history_pick_resubmits_address() {
        let mut state = AppState::default();
        state.history.record(&report("Oslo, Norway").location);
        state.history.record(&report("Paris, France").location);

        reducer(&mut state, Action::ForecastHistorySelect(1));
        let result = reducer(&mut state, Action::ForecastHistoryPick);

        assert_eq!(
            result.effects,
            vec![Effect::SubmitForecast {
                request_id: 1,
                location: "Paris, France".into()
            }]
        );
    }

    #[test]
    fn test_history_pick_answer_is_not_recorded() {
        let mut state = AppState::default();
        state.history.record(&report("Oslo, Norway").location);

        reducer(&mut state, Action::ForecastHistoryPick);
        let request_id = state.forecast.request_id;
        reducer(
            &mut state,
            Action::ForecastDidLoad {
                request_id,
                report: report("Oslo, Viken, Norway"),
            },
        );

        assert!(state.forecast.result.is_loaded());
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history.picked_request, None);

        reducer(&mut state, Action::ForecastSubmit("Bergen".into()));
        let request_id = state.forecast.request_id;
        reducer(
            &mut state,
            Action::ForecastDidLoad {
                request_id,
                report: report("Bergen, Norway"),
            },
        );
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn test_history_pick_without_entries_is_noop() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::ForecastHistoryPick);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_stale_forecast_error_does_not_clobber_result() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ForecastSubmit("A".into()));
        reducer(&mut state, Action::ForecastSubmit("B".into()));

        reducer(
            &mut state,
            Action::ForecastDidLoad {
                request_id: 2,
                report: report("B"),
            },
        );
        let result = reducer(
            &mut state,
            Action::ForecastDidError {
                request_id: 1,
                message: "late".into(),
            },
        );

        assert!(!result.changed);
        assert_eq!(
            state.forecast.result.data().map(|r| r.location.address.as_str()),
            Some("B")
        );
    }

    #[test]
    fn test_extreme_blank_query_is_ignored() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::ExtremeSubmit(String::new()));

        assert!(result.effects.is_empty());
        assert!(state.extreme.result.is_empty());
    }

    #[test]
    fn test_visual_blank_query_is_rejected() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::VisualSubmit("   ".into()));

        assert!(result.effects.is_empty());
        assert_eq!(
            state.visualization.result.error(),
            Some("Please enter a city name.")
        );
    }

    #[test]
    fn test_nav_query_filters_and_confirm_navigates() {
        let mut state = AppState::default();
        reducer(&mut state, Action::NavOpen);
        reducer(&mut state, Action::NavQueryChange("ab".into()));
        assert_eq!(state.nav_suggestions, vec![Page::About]);

        reducer(&mut state, Action::NavConfirm);
        assert_eq!(state.page, Page::About);
        assert!(!state.nav_open);
        assert!(state.nav_query.is_empty());
        assert!(state.nav_suggestions.is_empty());
    }

    #[test]
    fn test_nav_submit_without_match_stays_put() {
        let mut state = AppState::default();
        reducer(&mut state, Action::NavOpen);
        reducer(&mut state, Action::NavQuerySubmit("weather radar".into()));

        assert_eq!(state.page, Page::Home);
        assert!(!state.nav_open);
        assert!(state.nav_query.is_empty());
    }

    #[test]
    fn test_edit_only_on_query_pages() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::EditStart).changed);

        reducer(&mut state, Action::NavGoto(Page::Extreme));
        assert!(reducer(&mut state, Action::EditStart).changed);
        assert!(state.editing);

        reducer(&mut state, Action::NavGoto(Page::Home));
        assert!(!state.editing);
    }

    #[test]
    fn test_sidebar_rows_cycle_values() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SidebarToggle);

        reducer(&mut state, Action::SidebarActivate);
        assert_eq!(state.sidebar.unit, crate::state::TempUnit::Fahrenheit);

        reducer(&mut state, Action::SidebarSelect(2));
        reducer(&mut state, Action::SidebarActivate);
        assert_eq!(state.sidebar.sources, vec![false, true, false, false]);

        reducer(&mut state, Action::SidebarSelect(SIDEBAR_ROWS - 1));
        reducer(&mut state, Action::SidebarActivate);
        assert_eq!(
            state.sidebar.frequency,
            crate::state::UpdateFrequency::FiveMinutes
        );
    }

    #[test]
    fn test_init_requests_missing_artwork_once() {
        let mut state = AppState::default();

        let first = reducer(&mut state, Action::Init);
        assert_eq!(first.effects.len(), 1);
        assert!(matches!(first.effects[0], Effect::LoadThumbnails { .. }));

        let second = reducer(&mut state, Action::Init);
        assert!(second.effects.is_empty());
    }

    #[test]
    fn test_welcome_dismiss_is_one_way() {
        let mut state = AppState::default();
        assert!(reducer(&mut state, Action::UiDismissWelcome).changed);
        assert!(!reducer(&mut state, Action::UiDismissWelcome).changed);
        assert!(!state.welcome_visible);
    }

    #[test]
    fn test_tick_only_while_loading() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        reducer(&mut state, Action::ExtremeSubmit("Lima".into()));
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }
}
