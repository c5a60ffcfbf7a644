//! Immutable view state and the reducer that advances it
//!
//! Every change goes through [`reduce`]. Responses carry the
//! [`RequestToken`] issued when their request started; a response whose
//! token is no longer the pending one for its channel is dropped.

use chrono::{DateTime, Utc};
use iq_core::{ComparisonOverlay, ForecastResult, Horizon, ServiceStatus, Sku, SkuCatalog};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// REQUEST TOKENS
// ============================================================================

/// Identifies one request; later requests carry larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues monotonically increasing request tokens
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    last: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestToken {
        RequestToken(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// In-flight requests, one slot per channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingRequests {
    pub upload: Option<RequestToken>,
    pub forecast: Option<RequestToken>,
    pub comparison: Option<RequestToken>,
}

impl PendingRequests {
    pub fn any(&self) -> bool {
        self.upload.is_some() || self.forecast.is_some() || self.comparison.is_some()
    }
}

// ============================================================================
// VIEW STATE
// ============================================================================

/// What the user has picked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub sku: Option<Sku>,
    pub horizon: Horizon,
    pub comparison: Option<Sku>,
}

/// Snapshot of everything the dashboard renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub catalog: SkuCatalog,
    pub service: ServiceStatus,
    pub catalog_refreshed_at: Option<DateTime<Utc>>,
    /// Non-blocking notice from background catalog refreshes
    pub catalog_warning: Option<String>,
    pub active: Option<ForecastResult>,
    pub comparison: Option<ComparisonOverlay>,
    pub selection: Selection,
    pub pending: PendingRequests,
    /// User-visible failure message
    pub alert: Option<String>,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.pending.any()
    }

    pub fn is_uploading(&self) -> bool {
        self.pending.upload.is_some()
    }

    pub fn is_forecasting(&self) -> bool {
        self.pending.forecast.is_some()
    }

    pub fn has_data(&self) -> bool {
        !self.catalog.is_empty()
    }

    pub fn active_sku(&self) -> Option<&Sku> {
        self.active.as_ref().and_then(|r| r.sku.as_ref())
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Everything that can change the view state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UploadStarted(RequestToken),
    UploadSucceeded {
        token: RequestToken,
        catalog: SkuCatalog,
        at: DateTime<Utc>,
    },
    UploadFailed {
        token: RequestToken,
        message: String,
    },
    CatalogRefreshed {
        catalog: SkuCatalog,
        at: DateTime<Utc>,
    },
    CatalogRefreshFailed(String),
    SelectSku(Option<Sku>),
    SetHorizon(Horizon),
    ForecastStarted(RequestToken),
    /// Applied result; `horizon` becomes the selected horizon
    ForecastSucceeded {
        token: RequestToken,
        horizon: Horizon,
        result: ForecastResult,
    },
    ForecastFailed {
        token: RequestToken,
        message: String,
    },
    ComparisonStarted {
        token: RequestToken,
        sku: Sku,
    },
    ComparisonSucceeded {
        token: RequestToken,
        overlay: ComparisonOverlay,
    },
    ComparisonFailed {
        token: RequestToken,
        message: String,
    },
    ClearComparison,
    /// Input rejected before any request was made
    Rejected(String),
    DismissAlert,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UploadStarted(_) => "upload_started",
            Self::UploadSucceeded { .. } => "upload_succeeded",
            Self::UploadFailed { .. } => "upload_failed",
            Self::CatalogRefreshed { .. } => "catalog_refreshed",
            Self::CatalogRefreshFailed(_) => "catalog_refresh_failed",
            Self::SelectSku(_) => "select_sku",
            Self::SetHorizon(_) => "set_horizon",
            Self::ForecastStarted(_) => "forecast_started",
            Self::ForecastSucceeded { .. } => "forecast_succeeded",
            Self::ForecastFailed { .. } => "forecast_failed",
            Self::ComparisonStarted { .. } => "comparison_started",
            Self::ComparisonSucceeded { .. } => "comparison_succeeded",
            Self::ComparisonFailed { .. } => "comparison_failed",
            Self::ClearComparison => "clear_comparison",
            Self::Rejected(_) => "rejected",
            Self::DismissAlert => "dismiss_alert",
            Self::Reset => "reset",
        }
    }
}

// ============================================================================
// REDUCER
// ============================================================================

/// Compute the next state; `state` itself is never mutated
pub fn reduce(state: &ViewState, action: Action) -> ViewState {
    let mut next = state.clone();

    match action {
        Action::UploadStarted(token) => {
            next.pending.upload = Some(token);
            next.alert = None;
        }
        Action::UploadSucceeded { token, catalog, at } => {
            if next.pending.upload != Some(token) {
                return stale(state, "upload", token);
            }
            next.pending.upload = None;
            apply_catalog(&mut next, catalog, at);
        }
        Action::UploadFailed { token, message } => {
            if next.pending.upload != Some(token) {
                return stale(state, "upload", token);
            }
            next.pending.upload = None;
            next.alert = Some(message);
        }
        Action::CatalogRefreshed { catalog, at } => {
            apply_catalog(&mut next, catalog, at);
        }
        Action::CatalogRefreshFailed(message) => {
            next.service = ServiceStatus::Unreachable;
            next.catalog_warning = Some(message);
        }
        Action::SelectSku(sku) => {
            next.selection.sku = sku;
        }
        Action::SetHorizon(horizon) => {
            next.selection.horizon = horizon;
        }
        Action::ForecastStarted(token) => {
            next.pending.forecast = Some(token);
            next.alert = None;
        }
        Action::ForecastSucceeded { token, horizon, result } => {
            if next.pending.forecast != Some(token) {
                return stale(state, "forecast", token);
            }
            next.pending.forecast = None;
            next.selection.horizon = horizon;
            if let Some(sku) = &result.sku {
                next.selection.sku = Some(sku.clone());
                if next.selection.comparison.as_ref() == Some(sku) {
                    next.selection.comparison = None;
                    next.comparison = None;
                    next.pending.comparison = None;
                }
            }
            next.active = Some(result);
        }
        Action::ForecastFailed { token, message } => {
            if next.pending.forecast != Some(token) {
                return stale(state, "forecast", token);
            }
            next.pending.forecast = None;
            next.alert = Some(message);
        }
        Action::ComparisonStarted { token, sku } => {
            next.pending.comparison = Some(token);
            next.selection.comparison = Some(sku);
            next.alert = None;
        }
        Action::ComparisonSucceeded { token, overlay } => {
            if next.pending.comparison != Some(token) {
                return stale(state, "comparison", token);
            }
            next.pending.comparison = None;
            next.selection.comparison = Some(overlay.sku.clone());
            next.comparison = Some(overlay);
        }
        Action::ComparisonFailed { token, message } => {
            if next.pending.comparison != Some(token) {
                return stale(state, "comparison", token);
            }
            next.pending.comparison = None;
            next.selection.comparison = next.comparison.as_ref().map(|c| c.sku.clone());
            next.alert = Some(message);
        }
        Action::ClearComparison => {
            next.pending.comparison = None;
            next.selection.comparison = None;
            next.comparison = None;
        }
        Action::Rejected(message) => {
            next.alert = Some(message);
        }
        Action::DismissAlert => {
            next.alert = None;
        }
        Action::Reset => {
            next.active = None;
            next.comparison = None;
            next.pending.forecast = None;
            next.pending.comparison = None;
            next.selection = Selection::default();
        }
    }

    next
}

fn apply_catalog(state: &mut ViewState, catalog: SkuCatalog, at: DateTime<Utc>) {
    state.service = catalog.status();
    state.catalog = catalog;
    state.catalog_refreshed_at = Some(at);
    state.catalog_warning = None;
}

fn stale(state: &ViewState, channel: &str, token: RequestToken) -> ViewState {
    tracing::debug!(channel, %token, "dropping stale response");
    state.clone()
}
