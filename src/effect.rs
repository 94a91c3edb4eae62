//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `POST /forecast` with `{ location }`
    SubmitForecast { request_id: u64, location: String },
    /// `POST /predict` with `{ location }`
    SubmitExtreme { request_id: u64, location: String },
    /// `POST /get_weather_visualization` with `{ city }`
    SubmitVisualization { request_id: u64, city: String },
    /// Download banner artwork
    LoadThumbnails { urls: Vec<String> },
}
