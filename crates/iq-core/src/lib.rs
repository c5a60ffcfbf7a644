//! # iq-core
//!
//! Core domain types for the InventoryIQ demand dashboard.
//! Implements Strategy pattern for number formatting.

pub mod catalog;
pub mod forecast;
pub mod horizon;
pub mod upload;

pub use catalog::*;
pub use forecast::*;
pub use horizon::*;
pub use upload::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for rendering a number on a tile or axis
pub trait NumberFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Rounds to the nearest integer and groups thousands ("12,345")
#[derive(Debug, Clone, Default)]
pub struct GroupedIntegerFormatter;

impl NumberFormatter for GroupedIntegerFormatter {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "0".to_string();
        }

        let rounded = value.round() as i64;
        let digits = rounded.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if rounded < 0 {
            grouped.push('-');
        }

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        grouped
    }
}

/// Shorthand for [`GroupedIntegerFormatter`]
pub fn format_units(value: f64) -> String {
    GroupedIntegerFormatter.format(value)
}

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// Stock-keeping unit identifier (e.g., "SKU-001")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(pub String);

impl Sku {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a value coming from a `<select>`; the empty option means "none"
    pub fn from_selection(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::new(trimmed))
        }
    }
}

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// WIRE ENVELOPE
// ============================================================================

/// Error body returned by the forecasting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Response envelope: every endpoint answers with either its payload or
/// `{ "error": "..." }`, sometimes with a 200 status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Failure(ApiErrorBody),
    Success(T),
}

/// Backend availability as seen by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Ready,
    NoData,
    Unreachable,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Checking...",
            Self::Ready => "Ready",
            Self::NoData => "No Data",
            Self::Unreachable => "Offline",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Unknown => "svc-unknown",
            Self::Ready => "svc-ready",
            Self::NoData => "svc-no-data",
            Self::Unreachable => "svc-unreachable",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Ready => colors::SUCCESS,
            Self::Unknown => colors::TEXT_MUTED,
            Self::NoData | Self::Unreachable => colors::ACCENT,
        }
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const PRIMARY: &str = "#6366f1";
    pub const SECONDARY: &str = "#06b6d4";
    pub const ACCENT: &str = "#f43f5e";
    pub const SUCCESS: &str = "#10b981";
    pub const WARN: &str = "#f59e0b";
    pub const COMPARE: &str = "#f43f5e";
    pub const BG_PANEL: &str = "rgba(0, 0, 0, 0.02)";
    pub const TEXT_PRIMARY: &str = "#0f172a";
    pub const TEXT_MUTED: &str = "#94a3b8";
    pub const GRID: &str = "#e2e8f0";

    pub fn accent_alpha(alpha: f64) -> String {
        format!("rgba(244, 63, 94, {:.2})", alpha)
    }

    pub fn success_alpha(alpha: f64) -> String {
        format!("rgba(16, 185, 129, {:.2})", alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_integer_formatter() {
        let formatter = GroupedIntegerFormatter;
        assert_eq!(formatter.format(0.0), "0");
        assert_eq!(formatter.format(999.4), "999");
        assert_eq!(formatter.format(1234.6), "1,235");
        assert_eq!(formatter.format(1_234_567.0), "1,234,567");
        assert_eq!(formatter.format(-4200.0), "-4,200");
        assert_eq!(formatter.format(f64::NAN), "0");
    }

    #[test]
    fn test_sku_from_selection() {
        assert_eq!(Sku::from_selection(""), None);
        assert_eq!(Sku::from_selection("  "), None);
        assert_eq!(Sku::from_selection("SKU-7"), Some(Sku::new("SKU-7")));
    }

    #[test]
    fn test_error_envelope_wins_over_payload() {
        let body = r#"{"error": "Insufficient data for forecasting (min 14 days required)"}"#;
        let parsed: ApiResponse<SkuCatalog> = serde_json::from_str(body).unwrap();
        match parsed {
            ApiResponse::Failure(body) => assert!(body.error.starts_with("Insufficient data")),
            ApiResponse::Success(_) => panic!("error envelope decoded as a catalog"),
        }
    }
}
