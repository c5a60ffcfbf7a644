//! Forecast result types returned by the `/forecast` endpoint

use crate::{colors, Sku};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode a numeric series where missing samples arrive as `null`.
/// Those samples become NaN and are skipped by every consumer.
pub fn lenient_series<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<f64>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0.0))
}

/// Stock-out risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => colors::TEXT_PRIMARY,
            Self::Moderate => colors::SECONDARY,
            Self::High => colors::WARN,
            Self::Critical => colors::ACCENT,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Low => "risk-low",
            Self::Moderate => "risk-moderate",
            Self::High => "risk-high",
            Self::Critical => "risk-critical",
        }
    }
}

/// Full forecast for a single SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Present when the service echoes it; filled in by the client otherwise
    #[serde(default)]
    pub sku: Option<Sku>,
    /// Daily actuals, oldest first
    #[serde(default, deserialize_with = "lenient_series")]
    pub historical: Vec<f64>,
    /// Predicted values following the last actual
    #[serde(default, deserialize_with = "lenient_series")]
    pub forecast: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub upper_ci: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub lower_ci: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub reorder_point: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub avg_demand: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub safety_stock: f64,
    /// Model accuracy in percent
    #[serde(default, deserialize_with = "lenient_number")]
    pub accuracy: f64,
    /// Stock-out health in percent (0..100)
    #[serde(default, deserialize_with = "lenient_number")]
    pub health_pct: f64,
    #[serde(default)]
    pub risk: RiskLevel,
    #[serde(default, deserialize_with = "lenient_series")]
    pub trend_line: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub seasonal_line: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub resid_line: Vec<f64>,
    #[serde(default)]
    pub should_restock: bool,
    #[serde(default)]
    pub recommendation: String,
}

impl ForecastResult {
    /// Sum of the forecast region (expected sales over the horizon)
    pub fn expected_sales(&self) -> f64 {
        self.forecast.iter().filter(|v| v.is_finite()).sum()
    }

    /// Forecast length in days
    pub fn horizon_days(&self) -> usize {
        self.forecast.len()
    }

    /// Both confidence bounds are present and aligned with the forecast
    pub fn has_confidence_band(&self) -> bool {
        !self.upper_ci.is_empty()
            && !self.lower_ci.is_empty()
            && self.upper_ci.len() == self.forecast.len()
            && self.lower_ci.len() == self.forecast.len()
    }

    /// Last `n` historical samples
    pub fn recent_history(&self, n: usize) -> &[f64] {
        let start = self.historical.len().saturating_sub(n);
        &self.historical[start..]
    }

    /// Attach the requested SKU when the service did not echo it
    pub fn with_sku(mut self, sku: &Sku) -> Self {
        if self.sku.is_none() {
            self.sku = Some(sku.clone());
        }
        self
    }

    pub fn sku_label(&self) -> &str {
        self.sku.as_ref().map_or("N/A", Sku::as_str)
    }

    pub fn headline(&self) -> &'static str {
        if self.should_restock {
            "Critical Inventory Alert"
        } else {
            "Healthy Inventory Status"
        }
    }
}

/// Second SKU drawn on top of the active forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOverlay {
    pub sku: Sku,
    pub historical: Vec<f64>,
    pub forecast: Vec<f64>,
}

impl ComparisonOverlay {
    pub fn from_result(sku: Sku, result: ForecastResult) -> Self {
        Self {
            sku,
            historical: result.historical,
            forecast: result.forecast,
        }
    }

    /// Samples occupied on the shared horizontal axis
    pub fn len(&self) -> usize {
        self.historical.len() + self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "sku": "SKU-001",
        "historical": [10, 12, null, 15],
        "forecast": [16.5, 17.0],
        "upper_ci": [20.0, 21.0],
        "lower_ci": [13.0, 13.5],
        "reorder_point": 120.4,
        "avg_demand": 14.2,
        "safety_stock": 21.0,
        "accuracy": 91.3,
        "health_pct": 42.0,
        "risk": "High",
        "trend_line": [0, 1, 2],
        "seasonal_line": [1, -1, 0],
        "resid_line": [0, 0, 0],
        "should_restock": true,
        "recommendation": "Reorder recommended within next 5 days."
    }"#;

    #[test]
    fn test_decode_forecast_result() {
        let result: ForecastResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.sku, Some(Sku::new("SKU-001")));
        assert_eq!(result.historical.len(), 4);
        assert!(result.historical[2].is_nan());
        assert_eq!(result.risk, RiskLevel::High);
        assert!(result.should_restock);
        assert!(result.has_confidence_band());
        assert_eq!(result.headline(), "Critical Inventory Alert");
    }

    #[test]
    fn test_missing_fields_default() {
        let result: ForecastResult =
            serde_json::from_str(r#"{"historical": [1, 2], "forecast": [3]}"#).unwrap();
        assert_eq!(result.risk, RiskLevel::Low);
        assert!(result.upper_ci.is_empty());
        assert!(!result.has_confidence_band());
        assert_eq!(result.sku_label(), "N/A");
    }

    #[test]
    fn test_expected_sales_skips_nan() {
        let result: ForecastResult =
            serde_json::from_str(r#"{"forecast": [1.5, null, 2.5]}"#).unwrap();
        assert_eq!(result.expected_sales(), 4.0);
        assert_eq!(result.horizon_days(), 3);
    }

    #[test]
    fn test_recent_history() {
        let result: ForecastResult =
            serde_json::from_str(r#"{"historical": [1, 2, 3, 4, 5]}"#).unwrap();
        assert_eq!(result.recent_history(3), &[3.0, 4.0, 5.0]);
        assert_eq!(result.recent_history(30).len(), 5);
    }

    #[test]
    fn test_with_sku_keeps_echoed_value() {
        let result: ForecastResult = serde_json::from_str(SAMPLE).unwrap();
        let result = result.with_sku(&Sku::new("OTHER"));
        assert_eq!(result.sku_label(), "SKU-001");
    }

    #[test]
    fn test_comparison_overlay_len() {
        let result: ForecastResult =
            serde_json::from_str(r#"{"historical": [1, 2, 3], "forecast": [4, 5]}"#).unwrap();
        let overlay = ComparisonOverlay::from_result(Sku::new("B"), result);
        assert_eq!(overlay.len(), 5);
        assert!(!overlay.is_empty());
    }
}
