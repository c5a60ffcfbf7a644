//! Turns user intent into requests and reducer actions

use crate::{ApiConfig, ClientError, ForecastClient, TaskHandle, file_meta};
use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use iq_core::{ComparisonOverlay, ForecastRequest, Horizon, Sku, validate_upload};
use iq_state::{Action, AppState, RequestToken, ViewState};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

/// Orchestrates requests against the forecasting service
///
/// Every request takes a fresh [`RequestToken`] and reports back through
/// `Started` / `Succeeded` / `Failed` actions; the reducer drops responses
/// that are no longer the latest for their channel. Methods returning
/// `bool` report whether a successful response was applied; a failure or
/// a stale response yields `false`.
#[derive(Clone)]
pub struct ForecastController {
    state: AppState,
    client: ForecastClient,
}

impl ForecastController {
    pub fn new(state: AppState, config: ApiConfig) -> Self {
        Self {
            state,
            client: ForecastClient::new(config),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ApiConfig {
        self.client.config()
    }

    // ========================================================================
    // Upload
    // ========================================================================

    /// Send a sales history CSV; replaces the SKU catalog on success
    pub async fn upload(&self, file: Option<File>) -> bool {
        let meta = file.as_ref().map(file_meta);
        if let Err(err) = validate_upload(meta.as_ref()) {
            self.reject(err.into());
            return false;
        }
        let Some(file) = file else {
            return false;
        };

        let token = self.state.issue_token();
        tracing::info!(file = %file.name(), %token, "uploading sales history");
        self.state.dispatch(Action::UploadStarted(token));

        let outcome = self.client.upload(&file).await;
        let applied = response_applied(self.is_pending(token, |v| v.pending.upload), &outcome);

        match outcome {
            Ok(catalog) => {
                tracing::info!(skus = catalog.skus.len(), "upload complete");
                self.state.dispatch(Action::UploadSucceeded {
                    token,
                    catalog,
                    at: Utc::now(),
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "upload failed");
                self.state.dispatch(Action::UploadFailed {
                    token,
                    message: err.to_string(),
                });
            }
        }
        applied
    }

    // ========================================================================
    // Forecasts
    // ========================================================================

    /// Fetch a forecast and make it the active result
    ///
    /// `horizon` becomes the selected horizon only once the result is applied.
    pub async fn request_forecast(&self, sku: Option<Sku>, horizon: Horizon) -> bool {
        let Some(sku) = sku else {
            self.reject(ClientError::MissingSku);
            return false;
        };

        self.fetch_active(sku, horizon).await
    }

    /// Change the horizon and re-fetch whatever is on screen
    ///
    /// With an active result the new horizon is committed by the re-fetch,
    /// so a failed request leaves the previous horizon selected.
    pub async fn set_horizon(&self, horizon: Horizon) {
        let (active, comparison) = self.state.view.with_untracked(|v| {
            (
                v.active_sku().cloned(),
                v.comparison.as_ref().map(|c| c.sku.clone()),
            )
        });
        if active.is_none() {
            self.state.dispatch(Action::SetHorizon(horizon));
        }

        let refresh_active = async {
            if let Some(sku) = active {
                self.fetch_active(sku, horizon).await;
            }
        };
        let refresh_comparison = async {
            if let Some(sku) = comparison {
                self.fetch_comparison(sku, horizon).await;
            }
        };

        futures::join!(refresh_active, refresh_comparison);
    }

    /// Pick the SKU under analysis; a concrete SKU is fetched as the active result
    pub async fn select_sku(&self, sku: Option<Sku>) -> bool {
        match sku {
            Some(sku) => {
                let horizon = self.state.view.with_untracked(|v| v.selection.horizon);
                self.fetch_active(sku, horizon).await
            }
            None => {
                self.state.dispatch(Action::SelectSku(None));
                false
            }
        }
    }

    /// Overlay another SKU on the chart, or clear the overlay with `None`
    ///
    /// Without an active result the chosen SKU becomes the active one.
    pub async fn select_comparison(&self, sku: Option<Sku>) -> bool {
        let Some(sku) = sku else {
            self.state.dispatch(Action::ClearComparison);
            return false;
        };

        let (active, horizon) = self
            .state
            .view
            .with_untracked(|v| (v.active_sku().cloned(), v.selection.horizon));

        match active {
            None => self.fetch_active(sku, horizon).await,
            Some(active) if active == sku => {
                self.state.dispatch(Action::ClearComparison);
                false
            }
            Some(_) => self.fetch_comparison(sku, horizon).await,
        }
    }

    async fn fetch_active(&self, sku: Sku, horizon: Horizon) -> bool {
        let token = self.state.issue_token();
        tracing::info!(%sku, days = horizon.days(), %token, "requesting forecast");
        self.state.dispatch(Action::ForecastStarted(token));

        let outcome = self.client.forecast(&ForecastRequest::new(sku, horizon)).await;
        let current = self.is_pending(token, |v| v.pending.forecast);
        if !current {
            tracing::warn!(%token, "discarding stale forecast response");
        }
        let applied = response_applied(current, &outcome);

        match outcome {
            Ok(result) => {
                tracing::info!(%token, days = result.horizon_days(), "forecast received");
                self.state.dispatch(Action::ForecastSucceeded {
                    token,
                    horizon,
                    result,
                });
            }
            Err(err) => {
                tracing::warn!(%token, error = %err, "forecast failed");
                self.state.dispatch(Action::ForecastFailed {
                    token,
                    message: err.to_string(),
                });
            }
        }
        applied
    }

    async fn fetch_comparison(&self, sku: Sku, horizon: Horizon) -> bool {
        let token = self.state.issue_token();
        tracing::info!(%sku, days = horizon.days(), %token, "requesting comparison");
        self.state.dispatch(Action::ComparisonStarted {
            token,
            sku: sku.clone(),
        });

        let outcome = self
            .client
            .forecast(&ForecastRequest::new(sku.clone(), horizon))
            .await;
        let current = self.is_pending(token, |v| v.pending.comparison);
        if !current {
            tracing::warn!(%token, "discarding stale comparison response");
        }
        let applied = response_applied(current, &outcome);

        match outcome {
            Ok(result) => {
                self.state.dispatch(Action::ComparisonSucceeded {
                    token,
                    overlay: ComparisonOverlay::from_result(sku, result),
                });
            }
            Err(err) => {
                tracing::warn!(%token, error = %err, "comparison failed");
                self.state.dispatch(Action::ComparisonFailed {
                    token,
                    message: err.to_string(),
                });
            }
        }
        applied
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Fetch `/skus`; failures only mark the service unreachable
    pub async fn refresh_catalog(&self) -> bool {
        match self.client.skus().await {
            Ok(catalog) => {
                tracing::debug!(skus = catalog.skus.len(), "catalog refreshed");
                self.state.dispatch(Action::CatalogRefreshed {
                    catalog,
                    at: Utc::now(),
                });
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog refresh failed");
                self.state
                    .dispatch(Action::CatalogRefreshFailed(err.to_string()));
                false
            }
        }
    }

    /// Refresh the catalog now and then every `catalog_poll_ms` (0 = once)
    pub fn start_catalog_poller(&self) -> TaskHandle {
        let controller = self.clone();
        let interval_ms = self.config().catalog_poll_ms;
        let handle = TaskHandle::new();
        let task = handle.clone();

        spawn_local(async move {
            loop {
                if task.is_stopped() {
                    tracing::info!("catalog poller stopped");
                    break;
                }

                controller.refresh_catalog().await;

                if interval_ms == 0 {
                    task.stop();
                    break;
                }
                TimeoutFuture::new(interval_ms).await;
            }
        });

        handle
    }

    // ========================================================================
    // Local actions
    // ========================================================================

    /// Drop the active result and return to the upload view
    pub fn reset(&self) {
        tracing::info!("resetting dashboard");
        self.state.dispatch(Action::Reset);
    }

    pub fn dismiss_alert(&self) {
        self.state.dispatch(Action::DismissAlert);
    }

    fn reject(&self, err: ClientError) {
        tracing::warn!(error = %err, "request rejected");
        self.state.dispatch(Action::Rejected(err.to_string()));
    }

    fn is_pending(&self, token: RequestToken, slot: impl Fn(&ViewState) -> Option<RequestToken>) -> bool {
        self.state.view.with_untracked(|v| slot(v) == Some(token))
    }
}

/// A response counts as applied when it succeeded and was still the latest
fn response_applied<T, E>(current: bool, outcome: &Result<T, E>) -> bool {
    current && outcome.is_ok()
}

// ============================================================================
// LEPTOS INTEGRATION
// ============================================================================

/// Provide the controller to the component tree
pub fn provide_controller(state: AppState, config: ApiConfig) -> ForecastController {
    let controller = ForecastController::new(state, config);
    provide_context(controller.clone());
    controller
}

/// Use the controller from context
pub fn use_controller() -> ForecastController {
    expect_context::<ForecastController>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_response_is_not_applied() {
        let failed: Result<(), ClientError> = Err(ClientError::Server {
            status: 200,
            message: "Insufficient data for SKU-1".into(),
        });
        assert!(!response_applied(true, &failed));
    }

    #[test]
    fn test_only_current_success_is_applied() {
        let ok: Result<u32, ClientError> = Ok(1);
        assert!(response_applied(true, &ok));
        assert!(!response_applied(false, &ok));
        assert!(!response_applied(false, &Err::<u32, _>(ClientError::Timeout(30_000))));
    }
}
