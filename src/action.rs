//! Actions: user intents plus the results of async work

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{ForecastReport, Page, PlotImage};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Forecast category (quantum forecaster page) =====
    /// Input text changed
    ForecastQueryChange(String),

    /// Submit the typed location
    ForecastSubmit(String),

    /// Move the history cursor
    ForecastHistorySelect(usize),

    /// Re-submit the highlighted history entry
    ForecastHistoryPick,

    /// Result: forecast payload for request `request_id`
    ForecastDidLoad {
        request_id: u64,
        report: ForecastReport,
    },

    /// Result: message to show for request `request_id`
    ForecastDidError { request_id: u64, message: String },

    // ===== Extreme category =====
    ExtremeQueryChange(String),

    ExtremeSubmit(String),

    ExtremeDidLoad { request_id: u64, prediction: f64 },

    ExtremeDidError { request_id: u64, message: String },

    // ===== Visual category (generated plot page) =====
    VisualQueryChange(String),

    VisualSubmit(String),

    VisualDidLoad { request_id: u64, image: PlotImage },

    VisualDidError { request_id: u64, message: String },

    // ===== Nav category (header search) =====
    /// Open the page search overlay
    NavOpen,

    /// Close it without navigating
    NavClose,

    NavQueryChange(String),

    /// Enter pressed in the search field
    NavQuerySubmit(String),

    /// Highlight a suggestion
    NavSelect(usize),

    /// Go to the highlighted suggestion
    NavConfirm,

    /// Jump straight to a page
    NavGoto(Page),

    // ===== Edit category =====
    /// Focus the current page's query input
    EditStart,

    /// Return focus to the page
    EditStop,

    // ===== Sidebar category (inert filters) =====
    SidebarToggle,

    SidebarSelect(usize),

    /// Toggle or cycle the row under the cursor
    SidebarActivate,

    // ===== Thumbnail category =====
    ThumbnailDidLoad { url: String, payload: String },

    ThumbnailDidError { url: String },

    // ===== UI category =====
    /// Switch between dark and light palettes
    UiToggleTheme,

    /// Hide the welcome banner for the rest of the session
    UiDismissWelcome,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Startup: request artwork
    Init,

    /// Spinner tick
    Tick,

    /// Exit the application
    Quit,
}
