//! Demand chart: history, dashed forecast, confidence band, optional
//! comparison SKU.
//!
//! All series share one horizontal index axis: historical samples occupy
//! `0..h`, forecast sample `i` sits at `h + i`. The forecast line is drawn
//! from the last historical sample so the two segments touch.

use crate::{
    chartkit::{format_axis_value, line_path, polygon_path, LinearScale, Scale},
    colors, ChartDimensions, ChartMargin,
};
use iq_core::{ComparisonOverlay, ForecastResult};
use leptos::prelude::*;

/// Multiplier applied to the largest sample for the top of the y domain
pub const HEADROOM: f64 = 1.2;

/// Top of the y domain when no sample is usable
pub const FALLBACK_DOMAIN_MAX: f64 = 100.0;

/// Number of horizontal gridlines (0%, 25%, 50%, 75%, 100%)
pub const GRIDLINE_COUNT: usize = 5;

/// Forecast chart configuration
#[derive(Debug, Clone)]
pub struct ForecastChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
    /// Trailing historical samples shown on the dashboard
    pub history_window: usize,
    pub stroke_width: f64,
    pub show_legend: bool,
}

impl Default for ForecastChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 350.0,
            margin: ChartMargin::forecast(),
            history_window: 30,
            stroke_width: 3.0,
            show_legend: true,
        }
    }
}

impl ForecastChartConfig {
    pub fn dimensions(&self) -> ChartDimensions {
        ChartDimensions::new(self.width, self.height).with_margin(self.margin)
    }
}

/// Borrowed series handed to the layout
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastChartInput<'a> {
    pub historical: &'a [f64],
    pub forecast: &'a [f64],
    pub upper: &'a [f64],
    pub lower: &'a [f64],
    pub comparison: Option<&'a ComparisonOverlay>,
}

impl<'a> ForecastChartInput<'a> {
    pub fn new(historical: &'a [f64], forecast: &'a [f64]) -> Self {
        Self {
            historical,
            forecast,
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, upper: &'a [f64], lower: &'a [f64]) -> Self {
        self.upper = upper;
        self.lower = lower;
        self
    }

    pub fn with_comparison(mut self, comparison: Option<&'a ComparisonOverlay>) -> Self {
        self.comparison = comparison;
        self
    }

    /// Chart input for a fetched result, trimmed to the last `history_window` actuals
    pub fn from_result(
        result: &'a ForecastResult,
        comparison: Option<&'a ComparisonOverlay>,
        history_window: usize,
    ) -> Self {
        let input = Self::new(result.recent_history(history_window), &result.forecast)
            .with_comparison(comparison);
        if result.has_confidence_band() {
            input.with_bounds(&result.upper_ci, &result.lower_ci)
        } else {
            input
        }
    }

    /// Both bounds are present and align with the forecast samples
    pub fn has_band(&self) -> bool {
        !self.upper.is_empty()
            && self.upper.len() == self.forecast.len()
            && self.lower.len() == self.forecast.len()
    }

    /// Width of the shared index axis
    pub fn total_points(&self) -> usize {
        let primary = self.historical.len() + self.forecast.len();
        let comparison = self.comparison.map_or(0, ComparisonOverlay::len);
        primary.max(comparison)
    }

    /// Largest finite sample across every provided series
    pub fn max_observed(&self) -> Option<f64> {
        let comparison = self
            .comparison
            .map(|c| (c.historical.as_slice(), c.forecast.as_slice()));
        let (comp_hist, comp_fore) = comparison.unwrap_or((&[], &[]));
        let (upper, lower) = if self.has_band() { (self.upper, self.lower) } else { (&[][..], &[][..]) };

        [self.historical, self.forecast, upper, lower, comp_hist, comp_fore]
            .into_iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}

/// One horizontal gridline with its label
#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    /// Fraction of the pre-headroom maximum (0.0..=1.0)
    pub fraction: f64,
    pub value: f64,
    pub y: f64,
    pub label: String,
}

/// Fully mapped chart geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastLayout {
    pub dims: ChartDimensions,
    pub total_points: usize,
    /// Largest observed sample (pre-headroom)
    pub max_value: f64,
    /// Top of the y domain (`max_value * HEADROOM`)
    pub y_max: f64,
    pub historical: Vec<(f64, f64)>,
    pub forecast: Vec<(f64, f64)>,
    /// Upper bound forward, then lower bound reversed
    pub band: Vec<(f64, f64)>,
    pub comparison_historical: Vec<(f64, f64)>,
    pub comparison_forecast: Vec<(f64, f64)>,
    pub gridlines: Vec<Gridline>,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl ForecastLayout {
    pub fn compute(input: &ForecastChartInput<'_>, dims: ChartDimensions) -> Self {
        let total_points = input.total_points();

        let y_max = match input.max_observed() {
            Some(max) if max > 0.0 => max * HEADROOM,
            _ => FALLBACK_DOMAIN_MAX,
        };
        let max_value = y_max / HEADROOM;

        let x_scale = LinearScale::new()
            .domain(0.0, total_points.saturating_sub(1).max(1) as f64)
            .range(dims.plot_left(), dims.plot_right());
        let y_scale = LinearScale::new()
            .domain(0.0, y_max)
            .range(dims.plot_bottom(), dims.margin.top);

        let mut layout = Self {
            dims,
            total_points,
            max_value,
            y_max,
            historical: Vec::new(),
            forecast: Vec::new(),
            band: Vec::new(),
            comparison_historical: Vec::new(),
            comparison_forecast: Vec::new(),
            gridlines: Vec::new(),
            x_scale,
            y_scale,
        };

        layout.historical = layout.line(input.historical, 0);
        layout.forecast = layout.continuation(input.historical, input.forecast);
        if input.has_band() {
            layout.band = layout.band(input.historical.len(), input.upper, input.lower);
        }

        if let Some(comparison) = input.comparison {
            layout.comparison_historical = layout.line(&comparison.historical, 0);
            layout.comparison_forecast =
                layout.continuation(&comparison.historical, &comparison.forecast);
        }

        layout.gridlines = layout.gridlines();
        layout
    }

    /// Horizontal pixel position of sample index `i`
    pub fn x(&self, index: usize) -> f64 {
        self.x_scale.scale(index as f64)
    }

    /// Vertical pixel position of a value
    pub fn y(&self, value: f64) -> f64 {
        self.y_scale.scale(value)
    }

    /// Map a series starting at `start`; fewer than two usable points draw nothing
    fn line(&self, values: &[f64], start: usize) -> Vec<(f64, f64)> {
        if values.len() < 2 {
            return Vec::new();
        }

        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, &v)| (self.x(start + i), self.y(v)))
            .collect();

        if points.len() < 2 { Vec::new() } else { points }
    }

    /// Forecast segment prefixed with the last finite actual
    fn continuation(&self, historical: &[f64], forecast: &[f64]) -> Vec<(f64, f64)> {
        if forecast.is_empty() {
            return Vec::new();
        }

        let offset = historical.len();
        let anchor = historical
            .iter()
            .rposition(|v| v.is_finite())
            .map(|k| (self.x(k), self.y(historical[k])));

        let points: Vec<(f64, f64)> = anchor
            .into_iter()
            .chain(
                forecast
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, &v)| (self.x(offset + i), self.y(v))),
            )
            .collect();

        if points.len() < 2 { Vec::new() } else { points }
    }

    fn band(&self, offset: usize, upper: &[f64], lower: &[f64]) -> Vec<(f64, f64)> {
        if upper.is_empty() || lower.is_empty() {
            return Vec::new();
        }

        let forward = upper
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, &v)| (self.x(offset + i), self.y(v)));

        let backward = lower
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, &v)| (self.x(offset + i), self.y(v)));

        forward.chain(backward).collect()
    }

    fn gridlines(&self) -> Vec<Gridline> {
        let ticks = LinearScale::new().domain(0.0, 1.0).ticks(GRIDLINE_COUNT);

        ticks
            .into_iter()
            .map(|fraction| {
                let value = self.max_value * fraction;
                Gridline {
                    fraction,
                    value,
                    y: self.y(value),
                    label: format_axis_value(value),
                }
            })
            .collect()
    }
}

/// Forecast chart component
#[component]
pub fn ForecastChart(
    #[prop(into)] result: Signal<Option<ForecastResult>>,
    #[prop(into)] comparison: Signal<Option<ComparisonOverlay>>,
    #[prop(optional)] config: Option<ForecastChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let dims = config.dimensions();
    let window = config.history_window;
    let stroke_w = config.stroke_width;
    let show_legend = config.show_legend;

    let chart_layout = move || {
        let result = result.get()?;
        let comparison = comparison.get();
        let input = ForecastChartInput::from_result(&result, comparison.as_ref(), window);
        let layout = ForecastLayout::compute(&input, dims);
        tracing::trace!(
            points = layout.total_points,
            y_max = layout.y_max,
            "forecast layout computed"
        );
        Some(layout)
    };

    let has_comparison = move || comparison.with(Option::is_some);

    view! {
        <svg
            class="forecast-chart"
            viewBox=dims.viewbox()
            preserveAspectRatio="none"
            style="width: 100%; height: 100%;"
        >
            <rect
                width=dims.width
                height=dims.height
                fill=colors::BG_PANEL
                rx="16"
            />

            {move || {
                chart_layout().map(|layout| {
                    view! {
                        <>
                            // Gridlines
                            {layout.gridlines.iter().map(|grid| {
                                view! {
                                    <g class="forecast-grid">
                                        <line
                                            x1=dims.plot_left() y1=grid.y
                                            x2=dims.plot_right() y2=grid.y
                                            stroke=colors::GRID
                                            stroke-width="1"
                                            stroke-dasharray="4,4"
                                        />
                                        <text
                                            x=dims.plot_left() - 10.0
                                            y=grid.y + 4.0
                                            text-anchor="end"
                                            font-size="10"
                                            fill=colors::TEXT_MUTED
                                        >
                                            {grid.label.clone()}
                                        </text>
                                    </g>
                                }
                            }).collect_view()}

                            // Confidence band
                            {(!layout.band.is_empty()).then(|| view! {
                                <path
                                    class="confidence-band"
                                    d=polygon_path(&layout.band)
                                    fill=colors::PRIMARY
                                    opacity="0.1"
                                />
                            })}

                            <SeriesLine points=layout.historical.clone() color=colors::PRIMARY stroke_width=stroke_w dashed=false />
                            <SeriesLine points=layout.forecast.clone() color=colors::SECONDARY stroke_width=stroke_w dashed=true />
                            <SeriesLine points=layout.comparison_historical.clone() color=colors::COMPARE stroke_width=stroke_w dashed=false />
                            <SeriesLine points=layout.comparison_forecast.clone() color=colors::COMPARE stroke_width=stroke_w dashed=true />
                        </>
                    }
                })
            }}

            {if show_legend {
                Some(view! {
                    <g class="forecast-legend" transform=format!("translate({}, {})", dims.plot_left(), dims.height - 15.0)>
                        <rect x="0" y="-4" width="12" height="3" fill=colors::PRIMARY />
                        <text x="18" y="0" fill=colors::TEXT_MUTED font-size="11" font-weight="600">"Historic"</text>

                        <line x1="90" y1="-2.5" x2="102" y2="-2.5" stroke=colors::SECONDARY stroke-width="3" stroke-dasharray="3,2" />
                        <text x="108" y="0" fill=colors::TEXT_MUTED font-size="11" font-weight="600">"Forecast"</text>

                        {move || has_comparison().then(|| view! {
                            <rect x="185" y="-4" width="12" height="3" fill=colors::COMPARE />
                            <text x="203" y="0" fill=colors::TEXT_MUTED font-size="11" font-weight="600">"Comparison"</text>
                        })}
                    </g>
                })
            } else {
                None
            }}
        </svg>
    }
}

/// One polyline; empty point lists render nothing
#[component]
fn SeriesLine(
    points: Vec<(f64, f64)>,
    color: &'static str,
    stroke_width: f64,
    dashed: bool,
) -> impl IntoView {
    let dash = if dashed { "6,6" } else { "0" };

    (points.len() >= 2).then(|| {
        view! {
            <path
                d=line_path(&points)
                fill="none"
                stroke=color
                stroke-width=stroke_width
                stroke-dasharray=dash
                stroke-linecap="round"
                stroke-linejoin="round"
            />
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use iq_core::Sku;

    fn layout(input: &ForecastChartInput<'_>) -> ForecastLayout {
        ForecastLayout::compute(input, ChartDimensions::default())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_line_endpoints_follow_index_mapping() {
        let hist = [10.0, 20.0, 30.0, 40.0];
        let input = ForecastChartInput::new(&hist, &[]);
        let l = layout(&input);

        assert_eq!(l.historical.len(), 4);
        assert_eq!(l.historical[0], (l.x(0), l.y(10.0)));
        assert_eq!(l.historical[3], (l.x(3), l.y(40.0)));
        // Index 0 on the left margin, last index on the right margin
        assert_eq!(l.x(0), 60.0);
        assert_eq!(l.x(3), 740.0);
    }

    #[test]
    fn test_forecast_starts_at_last_historical_point() {
        let hist = [5.0, 8.0, 6.0];
        let fore = [7.0, 9.0];
        let l = layout(&ForecastChartInput::new(&hist, &fore));

        assert_eq!(l.forecast.first(), l.historical.last());
        assert_eq!(l.forecast.len(), 3);
        assert_eq!(*l.forecast.last().unwrap(), (l.x(4), l.y(9.0)));
        assert_eq!(l.total_points, 5);
    }

    #[test]
    fn test_vertical_domain_has_headroom() {
        let hist = [10.0, 50.0];
        let fore = [40.0];
        let l = layout(&ForecastChartInput::new(&hist, &fore));

        assert!(close(l.y_max, 60.0));
        assert!(close(l.max_value, 50.0));
        assert_eq!(l.y(0.0), 300.0);
        assert_eq!(l.y(l.y_max), 30.0);
    }

    #[test]
    fn test_gridlines_span_pre_headroom_domain() {
        let hist = [10.0, 80.0];
        let l = layout(&ForecastChartInput::new(&hist, &[]));

        let fractions: Vec<f64> = l.gridlines.iter().map(|g| g.fraction).collect();
        assert_eq!(fractions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let top = l.gridlines.last().unwrap();
        assert!(close(top.value, 80.0));
        assert_eq!(top.label, "80");
        assert!(close(top.y, l.y(80.0)));
        assert_eq!(l.gridlines[0].y, l.dims.plot_bottom());
    }

    #[test]
    fn test_upper_bound_counts_towards_domain() {
        let hist = [10.0, 12.0];
        let fore = [11.0, 13.0];
        let upper = [20.0, 25.0];
        let lower = [5.0, 6.0];
        let l = layout(&ForecastChartInput::new(&hist, &fore).with_bounds(&upper, &lower));

        assert!(close(l.max_value, 25.0));
    }

    #[test]
    fn test_default_domain_without_valid_values() {
        let hist = [f64::NAN, f64::NAN];
        let l = layout(&ForecastChartInput::new(&hist, &[]));

        assert_eq!(l.y_max, FALLBACK_DOMAIN_MAX);
        assert!(l.historical.is_empty());

        let empty = layout(&ForecastChartInput::default());
        assert_eq!(empty.y_max, FALLBACK_DOMAIN_MAX);
        assert_eq!(empty.gridlines.len(), GRIDLINE_COUNT);
    }

    #[test]
    fn test_non_numeric_samples_are_skipped() {
        let hist = [10.0, f64::NAN, 30.0];
        let l = layout(&ForecastChartInput::new(&hist, &[]));

        assert!(close(l.max_value, 30.0));
        assert_eq!(l.historical, vec![(l.x(0), l.y(10.0)), (l.x(2), l.y(30.0))]);
    }

    #[test]
    fn test_short_series_draw_nothing() {
        let hist = [42.0];
        let l = layout(&ForecastChartInput::new(&hist, &[]));
        assert!(l.historical.is_empty());
        assert!(l.forecast.is_empty());
    }

    #[test]
    fn test_single_forecast_sample_still_joins_history() {
        let hist = [1.0, 2.0];
        let fore = [3.0];
        let l = layout(&ForecastChartInput::new(&hist, &fore));
        assert_eq!(l.forecast, vec![(l.x(1), l.y(2.0)), (l.x(2), l.y(3.0))]);
    }

    #[test]
    fn test_band_traces_upper_then_lower_reversed() {
        let hist = [8.0, 9.0];
        let fore = [7.0, 9.0, 10.0];
        let upper = [10.0, 12.0, 14.0];
        let lower = [4.0, 5.0, 6.0];
        let l = layout(&ForecastChartInput::new(&hist, &fore).with_bounds(&upper, &lower));

        assert_eq!(l.band.len(), 6);
        assert_eq!(
            l.band,
            vec![
                (l.x(2), l.y(10.0)),
                (l.x(3), l.y(12.0)),
                (l.x(4), l.y(14.0)),
                (l.x(4), l.y(6.0)),
                (l.x(3), l.y(5.0)),
                (l.x(2), l.y(4.0)),
            ]
        );
    }

    #[test]
    fn test_band_requires_both_bounds() {
        let hist = [1.0, 2.0];
        let fore = [3.0, 4.0];
        let upper = [5.0, 6.0];
        let l = layout(&ForecastChartInput::new(&hist, &fore).with_bounds(&upper, &[]));
        assert!(l.band.is_empty());
    }

    #[test]
    fn test_misaligned_bounds_draw_no_band() {
        let hist = [1.0, 2.0];
        let fore = [3.0, 4.0, 5.0];
        let upper = [60.0];
        let lower = [0.5, 0.6, 0.7, 0.8, 0.9];
        let l = layout(&ForecastChartInput::new(&hist, &fore).with_bounds(&upper, &lower));

        assert!(l.band.is_empty());
        assert_eq!(l.total_points, 5);
        assert!(close(l.max_value, 5.0));
    }

    #[test]
    fn test_band_stays_inside_plot() {
        let hist = [1.0, 2.0];
        let fore = [3.0, 4.0, 5.0];
        let upper = [4.0, 5.0, 6.0];
        let lower = [2.0, 3.0, 4.0];
        let l = layout(&ForecastChartInput::new(&hist, &fore).with_bounds(&upper, &lower));

        assert_eq!(l.band.len(), 6);
        assert!(l.band.iter().all(|&(x, _)| x <= l.dims.plot_right()));
    }

    #[test]
    fn test_forecast_anchors_on_last_finite_actual() {
        let hist = [4.0, 6.0, f64::NAN];
        let fore = [7.0, 8.0];
        let l = layout(&ForecastChartInput::new(&hist, &fore));

        assert_eq!(l.forecast, vec![(l.x(1), l.y(6.0)), (l.x(3), l.y(7.0)), (l.x(4), l.y(8.0))]);
        assert_eq!(l.forecast.first(), l.historical.last());
    }

    #[test]
    fn test_from_result_drops_misaligned_bounds() {
        let result: ForecastResult = serde_json::from_str(
            r#"{"historical": [1, 2], "forecast": [3, 4], "upper_ci": [5], "lower_ci": [1, 2]}"#,
        )
        .unwrap();
        let input = ForecastChartInput::from_result(&result, None, 30);

        assert!(input.upper.is_empty());
        assert!(!input.has_band());
    }

    #[test]
    fn test_comparison_widens_axis() {
        let hist = [1.0, 2.0];
        let fore = [3.0];
        let overlay = ComparisonOverlay {
            sku: Sku::new("B"),
            historical: vec![2.0, 4.0, 6.0, 8.0],
            forecast: vec![10.0, 12.0],
        };
        let l = layout(&ForecastChartInput::new(&hist, &fore).with_comparison(Some(&overlay)));

        assert_eq!(l.total_points, 6);
        assert!(close(l.max_value, 12.0));
        assert_eq!(l.comparison_historical.len(), 4);
        assert_eq!(l.comparison_forecast.first(), l.comparison_historical.last());
        assert_eq!(*l.comparison_forecast.last().unwrap(), (l.x(5), l.y(12.0)));
        assert_eq!(l.x(5), l.dims.plot_right());
    }

    #[test]
    fn test_from_result_trims_history() {
        let result: ForecastResult = serde_json::from_str(
            r#"{"historical": [1, 2, 3, 4, 5, 6], "forecast": [7, 8]}"#,
        )
        .unwrap();
        let input = ForecastChartInput::from_result(&result, None, 3);

        assert_eq!(input.historical, &[4.0, 5.0, 6.0]);
        assert_eq!(input.total_points(), 5);
    }
}
