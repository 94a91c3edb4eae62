//! Application state - single source of truth

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

// ============================================================================
// Backend payloads
// ============================================================================

/// Numeric series returned by the quantum forecaster, in source order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSeries {
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub thunderstorm_chance: Vec<f64>,
}

/// A location as resolved by the backend geocoder
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedLocation {
    pub address: String,
    pub lat: f64,
    pub lon: f64,
}

/// Successful `/forecast` payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastReport {
    pub weather_data: WeatherSeries,
    pub timestamps: Vec<String>,
    pub location: ResolvedLocation,
    /// Base64 PNG rendered by the backend
    #[serde(default)]
    pub plot_image: Option<String>,
}

/// Opaque image bytes (base64) returned by the visualization backend
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlotImage {
    pub payload: String,
}

// ============================================================================
// Request/response cycle
// ============================================================================

/// One page's fetch cycle: Empty → Loading → Loaded/Failed.
///
/// `request_id` identifies the latest submission. Responses carrying an older id
/// are dropped, so the last submitted query always wins.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Submission<T> {
    /// Text currently in the page's input field
    pub query: String,
    pub result: DataResource<T>,
    pub request_id: u64,
}

impl<T> Default for Submission<T> {
    fn default() -> Self {
        Self {
            query: String::new(),
            result: DataResource::Empty,
            request_id: 0,
        }
    }
}

impl<T> Submission<T> {
    /// Clear the previous outcome and start a new request. Returns its id.
    pub fn begin(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.result = DataResource::Loading;
        self.request_id
    }

    /// Apply a response. Returns false (and leaves state alone) for stale ids.
    pub fn resolve(&mut self, request_id: u64, outcome: Result<T, String>) -> bool {
        if request_id != self.request_id {
            return false;
        }
        self.result = match outcome {
            Ok(data) => DataResource::Loaded(data),
            Err(message) => DataResource::Failed(message),
        };
        true
    }

    /// Client-side rejection: shown like any other error, no request issued.
    pub fn reject(&mut self, message: &str) {
        self.request_id = self.request_id.wrapping_add(1);
        self.result = DataResource::Failed(message.to_string());
    }

    pub fn is_loading(&self) -> bool {
        self.result.is_loading()
    }
}

/// Previously resolved locations, unique by address, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationHistory {
    pub entries: Vec<ResolvedLocation>,
    pub selected: usize,
    /// Request started by picking an entry; its answer is not recorded again
    #[serde(default)]
    pub picked_request: Option<u64>,
}

impl LocationHistory {
    /// Append unless an entry with the same address exists.
    pub fn record(&mut self, location: &ResolvedLocation) -> bool {
        if self.entries.iter().any(|e| e.address == location.address) {
            return false;
        }
        self.entries.push(location.clone());
        true
    }

    pub fn get(&self, index: usize) -> Option<&ResolvedLocation> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Navigation & chrome
// ============================================================================

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Forecast,
    Extreme,
    Visualization,
    About,
    Contact,
}

impl Page {
    /// Catalogue searched by the header
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Forecast,
        Page::Visualization,
        Page::Extreme,
        Page::About,
        Page::Contact,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Forecast => "Forecast",
            Page::Visualization => "Quantum Weather Prediction",
            Page::Extreme => "Extreme Prediction",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }

    pub fn route(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Forecast => "/weather-prediction",
            Page::Visualization => "/forecast",
            Page::Extreme => "/extreme",
            Page::About => "/about",
            Page::Contact => "/contact",
        }
    }

    /// Number key that jumps to this page
    pub fn hotkey(&self) -> char {
        let index = Page::ALL.iter().position(|p| p == self).unwrap_or(0);
        char::from(b'1' + index as u8)
    }

    pub fn from_hotkey(c: char) -> Option<Page> {
        let digit = c.to_digit(10)? as usize;
        Page::ALL.get(digit.checked_sub(1)?).copied()
    }

    /// Pages that own a query input
    pub fn has_query(&self) -> bool {
        matches!(self, Page::Forecast | Page::Extreme | Page::Visualization)
    }
}

/// Case-insensitive substring match over page titles; blank input matches nothing.
pub fn suggest_pages(query: &str) -> Vec<Page> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    Page::ALL
        .iter()
        .copied()
        .filter(|page| page.title().to_lowercase().contains(&needle))
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

// ============================================================================
// Sidebar filters (display only)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "Celsius",
            TempUnit::Fahrenheit => "Fahrenheit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum UpdateFrequency {
    #[default]
    RealTime,
    FiveMinutes,
    FifteenMinutes,
    Hourly,
}

impl UpdateFrequency {
    pub fn next(&self) -> Self {
        match self {
            UpdateFrequency::RealTime => UpdateFrequency::FiveMinutes,
            UpdateFrequency::FiveMinutes => UpdateFrequency::FifteenMinutes,
            UpdateFrequency::FifteenMinutes => UpdateFrequency::Hourly,
            UpdateFrequency::Hourly => UpdateFrequency::RealTime,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpdateFrequency::RealTime => "Real-time",
            UpdateFrequency::FiveMinutes => "Every 5 minutes",
            UpdateFrequency::FifteenMinutes => "Every 15 minutes",
            UpdateFrequency::Hourly => "Every hour",
        }
    }
}

/// Rows: unit, one per data source, frequency
pub const SIDEBAR_ROWS: usize = 2 + crate::content::DATA_SOURCES.len();

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SidebarState {
    pub open: bool,
    pub cursor: usize,
    pub unit: TempUnit,
    pub sources: Vec<bool>,
    pub frequency: UpdateFrequency,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            open: false,
            cursor: 0,
            unit: TempUnit::default(),
            sources: vec![false; crate::content::DATA_SOURCES.len()],
            frequency: UpdateFrequency::default(),
        }
    }
}

// ============================================================================
// Banner artwork
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Thumbnail {
    Loading,
    /// Base64 of the downloaded image bytes
    Ready(String),
    Failed,
}

/// Spinner timing while a request is in flight.
pub const LOADING_ANIM_TICK_MS: u64 = 120;
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

// ============================================================================
// AppState
// ============================================================================

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Navigation", label = "Page", debug_fmt)]
    pub page: Page,

    #[debug(section = "Navigation", label = "Theme", debug_fmt)]
    pub theme: Theme,

    /// Welcome banner; once dismissed it stays hidden
    #[debug(section = "Navigation", label = "Welcome")]
    pub welcome_visible: bool,

    // --- Forecast pages ---
    #[debug(section = "Forecast", label = "Cycle", debug_fmt)]
    pub forecast: Submission<ForecastReport>,

    #[debug(section = "Forecast", label = "History", debug_fmt)]
    pub history: LocationHistory,

    #[debug(section = "Extreme", label = "Cycle", debug_fmt)]
    pub extreme: Submission<f64>,

    #[debug(skip)]
    pub visualization: Submission<PlotImage>,

    /// Whether the current page's query input has focus
    #[debug(section = "Navigation", label = "Editing")]
    pub editing: bool,

    // --- Header search (skipped) ---
    #[debug(skip)]
    pub nav_open: bool,

    #[debug(skip)]
    pub nav_query: String,

    #[debug(skip)]
    pub nav_suggestions: Vec<Page>,

    #[debug(skip)]
    pub nav_selected: usize,

    // --- Chrome ---
    #[debug(section = "Sidebar", label = "Filters", debug_fmt)]
    pub sidebar: SidebarState,

    #[debug(skip)]
    pub thumbnails: BTreeMap<String, Thumbnail>,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(page: Page, theme: Theme) -> Self {
        Self {
            page,
            theme,
            welcome_visible: true,
            forecast: Submission::default(),
            history: LocationHistory::default(),
            extreme: Submission::default(),
            visualization: Submission::default(),
            editing: false,
            nav_open: false,
            nav_query: String::new(),
            nav_suggestions: Vec::new(),
            nav_selected: 0,
            sidebar: SidebarState::default(),
            thumbnails: BTreeMap::new(),
            tick_count: 0,
        }
    }

    pub fn any_loading(&self) -> bool {
        self.forecast.is_loading() || self.extreme.is_loading() || self.visualization.is_loading()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }

    /// Whether the current page's own submission is in flight
    pub fn page_loading(&self) -> bool {
        match self.page {
            Page::Forecast => self.forecast.is_loading(),
            Page::Extreme => self.extreme.is_loading(),
            Page::Visualization => self.visualization.is_loading(),
            _ => false,
        }
    }

    /// Query text of the current page, if it has one
    pub fn current_query(&self) -> Option<&str> {
        match self.page {
            Page::Forecast => Some(&self.forecast.query),
            Page::Extreme => Some(&self.extreme.query),
            Page::Visualization => Some(&self.visualization.query),
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Page::default(), Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delhi() -> ResolvedLocation {
        ResolvedLocation {
            address: "New Delhi".into(),
            lat: 28.6,
            lon: 77.2,
        }
    }

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut cycle = Submission::<f64>::default();
        let first = cycle.begin();
        assert!(cycle.resolve(first, Err("boom".into())));
        assert!(cycle.result.is_failed());

        let second = cycle.begin();
        assert!(cycle.is_loading());
        assert!(cycle.result.error().is_none());
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut cycle = Submission::<f64>::default();
        let slow = cycle.begin();
        let fast = cycle.begin();

        assert!(cycle.resolve(fast, Ok(0.75)));
        assert!(!cycle.resolve(slow, Ok(0.10)));
        assert_eq!(cycle.result.data(), Some(&0.75));
    }

    #[test]
    fn test_reject_invalidates_in_flight_request() {
        let mut cycle = Submission::<PlotImage>::default();
        let pending = cycle.begin();
        cycle.reject("Please enter a city name.");

        assert!(!cycle.resolve(pending, Ok(PlotImage::default())));
        assert_eq!(cycle.result.error(), Some("Please enter a city name."));
    }

    #[test]
    fn test_page_loading_tracks_current_page_only() {
        let mut state = AppState::new(Page::Forecast, Theme::Dark);
        state.extreme.begin();
        assert!(state.any_loading());
        assert!(!state.page_loading());

        state.page = Page::Extreme;
        assert!(state.page_loading());
    }

    #[test]
    fn test_history_dedupes_by_address() {
        let mut history = LocationHistory::default();
        assert!(history.record(&delhi()));

        let moved = ResolvedLocation {
            lat: 0.0,
            ..delhi()
        };
        assert!(!history.record(&moved));
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).unwrap().lat, 28.6);
    }

    #[test]
    fn test_suggest_pages_case_insensitive() {
        assert_eq!(
            suggest_pages("PREDICT"),
            vec![Page::Visualization, Page::Extreme]
        );
        assert_eq!(suggest_pages("home"), vec![Page::Home]);
        assert!(suggest_pages("   ").is_empty());
        assert!(suggest_pages("zzz").is_empty());
    }

    #[test]
    fn test_page_hotkeys_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_hotkey(page.hotkey()), Some(page));
        }
        assert_eq!(Page::from_hotkey('0'), None);
        assert_eq!(Page::from_hotkey('9'), None);
    }
}
