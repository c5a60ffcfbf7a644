//! Sparkline charts for compact inline visualizations
//!
//! Mini charts for the trend/seasonality panel and the stock health bar.

use crate::{chartkit::polyline_points, colors};
use leptos::prelude::*;

// ============================================================================
// MINI CHART
// ============================================================================

/// Sparkline configuration
#[derive(Debug, Clone)]
pub struct SparklineConfig {
    pub width: f64,
    pub height: f64,
    /// Vertical distance between the series min and max
    pub span: f64,
    pub stroke_width: f64,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 40.0,
            span: 35.0,
            stroke_width: 3.0,
        }
    }
}

/// Map a short series into the strip: min at the bottom edge, max `span` above it
pub fn sparkline_points(data: &[f64], config: &SparklineConfig) -> Vec<(f64, f64)> {
    let finite = data.iter().copied().filter(|v| v.is_finite());
    let Some(min) = finite.clone().reduce(f64::min) else {
        return Vec::new();
    };
    let max = finite.reduce(f64::max).unwrap_or(min);

    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let x_step = config.width / data.len().saturating_sub(1).max(1) as f64;

    data.iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| {
            let x = i as f64 * x_step;
            let y = config.height - (v - min) * config.span / range;
            (x, y)
        })
        .collect()
}

/// Mini line chart; an empty series keeps its height as a placeholder
#[component]
pub fn MiniChart(
    #[prop(into)] data: Signal<Vec<f64>>,
    #[prop(optional)] color: Option<&'static str>,
    #[prop(optional)] config: Option<SparklineConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let stroke = color.unwrap_or(colors::PRIMARY);
    let w = config.width;
    let h = config.height;
    let stroke_w = config.stroke_width;

    let points = move || data.with(|d| sparkline_points(d, &config));

    move || {
        let pts = points();
        if pts.is_empty() {
            view! { <div class="mini-chart-empty" style=format!("height: {}px;", h) /> }.into_any()
        } else {
            view! {
                <svg
                    class="mini-chart"
                    viewBox=format!("0 0 {} {}", w, h)
                    preserveAspectRatio="none"
                    style=format!("width: 100%; height: {}px; overflow: visible;", h)
                >
                    <polyline
                        points=polyline_points(&pts)
                        fill="none"
                        stroke=stroke
                        stroke-width=stroke_w
                        stroke-linejoin="round"
                        stroke-linecap="round"
                    />
                </svg>
            }
            .into_any()
        }
    }
}

// ============================================================================
// HEALTH BAR
// ============================================================================

/// Stock-out health band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Critical,
    Warning,
    Healthy,
}

impl HealthBand {
    pub fn from_pct(pct: f64) -> Self {
        if pct < 30.0 {
            Self::Critical
        } else if pct < 70.0 {
            Self::Warning
        } else {
            Self::Healthy
        }
    }

    pub fn fill(&self) -> String {
        match self {
            Self::Critical => colors::ACCENT.to_string(),
            Self::Warning => colors::WARN.to_string(),
            Self::Healthy => format!(
                "linear-gradient(90deg, {}, {})",
                colors::PRIMARY,
                colors::SECONDARY
            ),
        }
    }
}

/// Clamp a health percentage into 0..=100 (non-numeric reads as 0)
pub fn clamp_pct(pct: f64) -> f64 {
    if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 }
}

/// Horizontal progress bar for stock-out health (0..100)
#[component]
pub fn HealthBar(
    #[prop(into)] value: Signal<f64>,
    #[prop(default = 8.0)] height: f64,
) -> impl IntoView {
    let bar_style = move || {
        let pct = clamp_pct(value.get());
        format!(
            "width: {pct}%; height: {height}px; background: {}; transition: width 1s cubic-bezier(0.19, 1, 0.22, 1);",
            HealthBand::from_pct(pct).fill()
        )
    };

    view! {
        <div class="progress-bar-bg" style=format!("height: {}px;", height)>
            <div class="progress-bar-fill" style=bar_style />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_at_bottom_max_at_top() {
        let config = SparklineConfig::default();
        let pts = sparkline_points(&[5.0, 10.0, 15.0], &config);

        assert_eq!(pts, vec![(0.0, 40.0), (50.0, 22.5), (100.0, 5.0)]);
    }

    #[test]
    fn test_single_value_has_no_division_error() {
        let pts = sparkline_points(&[42.0], &SparklineConfig::default());

        assert_eq!(pts, vec![(0.0, 40.0)]);
        assert!(pts.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn test_flat_series() {
        let pts = sparkline_points(&[3.0, 3.0, 3.0], &SparklineConfig::default());
        assert!(pts.iter().all(|&(_, y)| y == 40.0));
    }

    #[test]
    fn test_empty_series() {
        assert!(sparkline_points(&[], &SparklineConfig::default()).is_empty());
        assert!(sparkline_points(&[f64::NAN], &SparklineConfig::default()).is_empty());
    }

    #[test]
    fn test_health_band_thresholds() {
        assert_eq!(HealthBand::from_pct(12.0), HealthBand::Critical);
        assert_eq!(HealthBand::from_pct(30.0), HealthBand::Warning);
        assert_eq!(HealthBand::from_pct(69.9), HealthBand::Warning);
        assert_eq!(HealthBand::from_pct(70.0), HealthBand::Healthy);
        assert!(HealthBand::Healthy.fill().starts_with("linear-gradient"));
    }

    #[test]
    fn test_clamp_pct() {
        assert_eq!(clamp_pct(140.0), 100.0);
        assert_eq!(clamp_pct(-3.0), 0.0);
        assert_eq!(clamp_pct(f64::NAN), 0.0);
    }
}
