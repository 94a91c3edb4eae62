//! Store, component and render flows through EffectStoreTestHarness

use quantaweather::{
    action::Action,
    components::{AppShell, AppShellProps, Component},
    content::artwork_urls,
    effect::Effect,
    reducer::reducer,
    state::{AppState, Page, PlotImage, Thumbnail},
};
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;

fn on_page(page: Page) -> AppState {
    AppState::new(page, Default::default())
}

/// Draw the whole screen at a size that fits every page
macro_rules! render_shell {
    ($harness:expr, $shell:expr) => {
        $harness.render_plain(120, 48, |frame, area, state| {
            let props = AppShellProps {
                state,
                is_focused: true,
            };
            $shell.render(frame, area, props);
        })
    };
}

// ============================================================================
// Request/response cycles
// ============================================================================

#[test]
fn test_extreme_prediction_flow() {
    let mut harness = EffectStoreTestHarness::new(on_page(Page::Extreme), reducer);

    harness.dispatch_collect(Action::ExtremeSubmit("Mumbai".into()));
    harness.assert_state(|s| s.extreme.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::SubmitExtreme { request_id: 1, location } if location == "Mumbai")
    });

    harness.complete_action(Action::ExtremeDidLoad {
        request_id: 1,
        prediction: 0.4375,
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");
    harness.assert_state(|s| s.extreme.result.data() == Some(&0.4375));
}

#[test]
fn test_extreme_blank_input_sends_nothing() {
    let mut harness = EffectStoreTestHarness::new(on_page(Page::Extreme), reducer);

    harness.dispatch_collect(Action::ExtremeSubmit(String::new()));
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.extreme.result.is_empty());
}

#[test]
fn test_extreme_whitespace_input_is_sent() {
    let mut harness = EffectStoreTestHarness::new(on_page(Page::Extreme), reducer);

    harness.dispatch_collect(Action::ExtremeSubmit("  ".into()));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::SubmitExtreme { location, .. } if location == "  "),
    );
    harness.assert_state(|s| s.extreme.is_loading());
}

#[test]
fn test_visualization_error_flow() {
    let mut harness = EffectStoreTestHarness::new(on_page(Page::Visualization), reducer);

    harness.dispatch_collect(Action::VisualSubmit("Atlantis".into()));
    harness.drain_effects().effects_first_matches(
        |e| matches!(e, Effect::SubmitVisualization { city, .. } if city == "Atlantis"),
    );

    harness.complete_action(Action::VisualDidError {
        request_id: 1,
        message: "City not found".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.visualization.result.is_failed());
    harness.assert_state(|s| s.visualization.result.error() == Some("City not found"));
}

#[test]
fn test_visualization_blank_input_rejected_locally() {
    let mut harness = EffectStoreTestHarness::new(on_page(Page::Visualization), reducer);

    harness.dispatch_collect(Action::VisualSubmit(String::new()));
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.visualization.result.error() == Some("Please enter a city name."));
}

#[test]
fn test_forecast_blank_input_still_submits() {
    let mut harness = EffectStoreTestHarness::new(on_page(Page::Forecast), reducer);

    harness.dispatch_collect(Action::ForecastSubmit(String::new()));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_all_match(|e| matches!(e, Effect::SubmitForecast { .. }));
    effects.effects_none_match(|e| matches!(e, Effect::SubmitExtreme { .. }));
}

#[test]
fn test_dispatch_all() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let results = harness.dispatch_all([
        Action::UiToggleTheme,
        Action::UiDismissWelcome,
        Action::UiDismissWelcome,
    ]);

    assert_eq!(results, vec![true, true, false]);
}

// ============================================================================
// Artwork
// ============================================================================

#[test]
fn test_init_requests_artwork_and_failures_settle() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    let effects = harness.drain_effects();
    effects.effects_count(1);

    let url = artwork_urls()[0].to_string();
    harness.assert_state(|s| s.thumbnails.values().all(|t| *t == Thumbnail::Loading));

    harness.complete_action(Action::ThumbnailDidError { url: url.clone() });
    harness.process_emitted();
    harness.assert_state(|s| s.thumbnails.get(&url) == Some(&Thumbnail::Failed));
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_keyboard_edit_then_submit() {
    let mut harness = EffectStoreTestHarness::new(on_page(Page::Visualization), reducer);
    let mut shell = AppShell::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("e", |state, event| {
        let props = AppShellProps {
            state,
            is_focused: true,
        };
        shell
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::EditStart);
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.editing);

    let actions = harness.send_keys::<NumericComponentId, _, _>("p", |state, event| {
        shell.handle_input_event(&event.kind, state)
    });
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.visualization.query == "p");

    harness.dispatch_collect(Action::VisualSubmit("Paris".into()));
    harness.assert_state(|s| !s.editing && s.visualization.is_loading());
}

#[test]
fn test_keyboard_page_switch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut shell = AppShell::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("5", |state, event| {
        let props = AppShellProps {
            state,
            is_focused: true,
        };
        shell
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.page == Page::About);
}

// ============================================================================
// Render Tests with Harness
// ============================================================================

#[test]
fn test_render_error_replaces_result() {
    let mut harness = EffectStoreTestHarness::new(on_page(Page::Visualization), reducer);
    let mut shell = AppShell::new();

    harness.dispatch_collect(Action::VisualSubmit("Paris".into()));
    harness.complete_action(Action::VisualDidLoad {
        request_id: 1,
        image: PlotImage {
            payload: "not-an-image".into(),
        },
    });
    harness.process_emitted();
    let loaded = render_shell!(harness, shell);
    assert!(loaded.contains("Weather Visualization"), "{loaded}");

    harness.dispatch_collect(Action::VisualSubmit("Atlantis".into()));
    harness.complete_action(Action::VisualDidError {
        request_id: 2,
        message: "An error occurred. Please try again.".into(),
    });
    harness.process_emitted();
    let failed = render_shell!(harness, shell);

    assert!(failed.contains("An error occurred. Please try again."), "{failed}");
    assert!(!failed.contains("Weather Visualization"), "{failed}");
}

#[test]
fn test_render_theme_toggle_changes_marker() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut shell = AppShell::new();

    let dark = render_shell!(harness, shell);
    harness.dispatch_collect(Action::UiToggleTheme);
    let light = render_shell!(harness, shell);

    assert!(dark.contains("dark"));
    assert!(light.contains("light"));
    assert_ne!(dark, light);
}
