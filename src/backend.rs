//! Backend tasks - turns effects into requests against the prediction services

use std::sync::Arc;

use reqwest::Client;
use tracing::warn;
use tui_dispatch::{TaskKey, TaskManager};

use crate::action::Action;
use crate::api::{self, Contract, ExtremeContract, ForecastContract, VisualizationContract};
use crate::config::Endpoints;
use crate::effect::Effect;

/// What the effect handler needs to reach the backends
#[derive(Debug, Clone)]
pub struct Backends {
    pub client: Client,
    pub endpoints: Endpoints,
}

impl Backends {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }
}

/// Key for one submission. Each request id gets its own task, so a newer
/// submission never aborts one that is still in flight.
pub fn submission_key<C: Contract>(request_id: u64) -> TaskKey {
    TaskKey::new(format!("{}:{request_id}", C::NAME))
}

/// Spawn the task(s) for an effect
pub fn spawn_effect(effect: Effect, tasks: &mut TaskManager<Action>, backends: &Arc<Backends>) {
    match effect {
        Effect::SubmitForecast {
            request_id,
            location,
        } => {
            let backends = Arc::clone(backends);
            tasks.spawn(
                submission_key::<ForecastContract>(request_id),
                async move {
                    match api::submit::<ForecastContract>(
                        &backends.client,
                        &backends.endpoints.forecast_url,
                        &location,
                    )
                    .await
                    {
                        Ok(report) => Action::ForecastDidLoad { request_id, report },
                        Err(e) => Action::ForecastDidError {
                            request_id,
                            message: e.display_message::<ForecastContract>(),
                        },
                    }
                },
            );
        }
        Effect::SubmitExtreme {
            request_id,
            location,
        } => {
            let backends = Arc::clone(backends);
            tasks.spawn(submission_key::<ExtremeContract>(request_id), async move {
                match api::submit::<ExtremeContract>(
                    &backends.client,
                    &backends.endpoints.extreme_url,
                    &location,
                )
                .await
                {
                    Ok(prediction) => Action::ExtremeDidLoad {
                        request_id,
                        prediction,
                    },
                    Err(e) => Action::ExtremeDidError {
                        request_id,
                        message: e.display_message::<ExtremeContract>(),
                    },
                }
            });
        }
        Effect::SubmitVisualization { request_id, city } => {
            let backends = Arc::clone(backends);
            tasks.spawn(
                submission_key::<VisualizationContract>(request_id),
                async move {
                    match api::submit::<VisualizationContract>(
                        &backends.client,
                        &backends.endpoints.visualization_url,
                        &city,
                    )
                    .await
                    {
                        Ok(image) => Action::VisualDidLoad { request_id, image },
                        Err(e) => Action::VisualDidError {
                            request_id,
                            message: e.display_message::<VisualizationContract>(),
                        },
                    }
                },
            );
        }
        Effect::LoadThumbnails { urls } => {
            for url in urls {
                let backends = Arc::clone(backends);
                tasks.spawn(TaskKey::new(format!("thumbnail:{url}")), async move {
                    match api::fetch_thumbnail(&backends.client, &url).await {
                        Ok(payload) => Action::ThumbnailDidLoad { url, payload },
                        Err(e) => {
                            warn!(%url, error = %e, "Thumbnail unavailable");
                            Action::ThumbnailDidError { url }
                        }
                    }
                });
            }
        }
    }
}
