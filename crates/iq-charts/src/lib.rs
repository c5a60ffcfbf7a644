//! # iq-charts
//!
//! D3.js-style SVG charting for the InventoryIQ dashboard, built with Leptos.
//!
//! ## Architecture
//!
//! Layout math lives in plain structs (testable without a DOM); the
//! `#[component]` functions only turn a computed layout into SVG.
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, paths, point lists
//! - `forecast` - Historical/forecast line chart with confidence band
//! - `sparkline` - Mini charts and the stock health bar
//! - `counter` - Count-up animation model

pub mod chartkit;
pub mod counter;
pub mod forecast;
pub mod sparkline;

pub use chartkit::*;
pub use counter::*;
pub use forecast::*;
pub use sparkline::*;

// Re-export colors from iq-core for convenience
pub use iq_core::colors;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Room for gridline labels on the left and the legend underneath
    pub const fn forecast() -> Self {
        Self::new(30.0, 60.0, 50.0, 60.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::forecast()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Left edge of the plot area
    pub fn plot_left(&self) -> f64 {
        self.margin.left
    }

    /// Right edge of the plot area
    pub fn plot_right(&self) -> f64 {
        self.width - self.margin.right
    }

    /// Baseline (value 0) of the plot area
    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(800.0, 350.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let dims = ChartDimensions::default();
        assert_eq!(dims.inner_width(), 680.0);
        assert_eq!(dims.inner_height(), 270.0);
        assert_eq!(dims.plot_bottom(), 300.0);
        assert_eq!(dims.viewbox(), "0 0 800 350");
    }

    #[test]
    fn test_inner_size_never_negative() {
        let dims = ChartDimensions::new(50.0, 40.0).with_margin(ChartMargin::uniform(30.0));
        assert_eq!(dims.inner_width(), 0.0);
        assert_eq!(dims.inner_height(), 0.0);
    }
}
