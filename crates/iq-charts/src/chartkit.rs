//! # chartkit
//!
//! Core chart primitives: scales, path and point-list builders.
//! Implements Strategy pattern for flexible scale and rendering behaviors.

use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (value - d_min) / (d_max - d_min);
        r_min + normalized * (r_max - r_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count <= 1 {
            return vec![min];
        }

        let step = (max - min) / (count - 1) as f64;
        (0..count).map(|i| min + step * i as f64).collect()
    }
}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for turning vertices into an SVG attribute value
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Line path generator (`d` attribute of `<path>`)
#[derive(Debug, Clone, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        if points.is_empty() {
            return String::new();
        }

        let mut path = String::with_capacity(points.len() * 20);
        let (x, y) = points[0];
        let _ = write!(path, "M{:.2},{:.2}", x, y);

        for &(x, y) in &points[1..] {
            let _ = write!(path, "L{:.2},{:.2}", x, y);
        }

        path
    }
}

/// Point list generator (`points` attribute of `<polyline>`/`<polygon>`)
#[derive(Debug, Clone, Default)]
pub struct PolylinePoints;

impl PathGenerator for PolylinePoints {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let mut out = String::with_capacity(points.len() * 14);

        for (i, &(x, y)) in points.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:.2},{:.2}", x, y);
        }

        out
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

/// Generate a closed polygon path through all vertices
pub fn polygon_path(points: &[(f64, f64)]) -> String {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return String::new();
    };

    rest.iter()
        .fold(PathBuilder::new().move_to(x0, y0), |b, &(x, y)| b.line_to(x, y))
        .close()
        .build()
}

/// Generate line path (non-closed)
pub fn line_path(points: &[(f64, f64)]) -> String {
    LinePath.generate(points)
}

/// Generate a `points` attribute value
pub fn polyline_points(points: &[(f64, f64)]) -> String {
    PolylinePoints.generate(points)
}

// ============================================================================
// FORMATTERS
// ============================================================================

/// Gridline label: the value rounded to a whole unit
pub fn format_axis_value(value: f64) -> String {
    format!("{:.0}", value.round())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new()
            .domain(0.0, 100.0)
            .range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new().domain(0.0, 120.0).range(300.0, 30.0);

        assert_eq!(scale.scale(0.0), 300.0);
        assert_eq!(scale.scale(120.0), 30.0);
        assert_eq!(scale.scale(60.0), 165.0);
    }

    #[test]
    fn test_ticks_are_even_fractions() {
        let scale = LinearScale::new().domain(0.0, 100.0);
        assert_eq!(scale.ticks(5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_polygon_path() {
        let path = polygon_path(&[(0.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);

        assert!(path.starts_with("M0.00,0.00"));
        assert!(path.contains("L100.00,100.00"));
        assert!(path.ends_with('Z'));
        assert_eq!(polygon_path(&[]), "");
    }

    #[test]
    fn test_line_path_generator() {
        let path = line_path(&[(0.0, 0.0), (50.0, 50.0), (100.0, 0.0)]);

        assert!(path.starts_with("M0.00,0.00"));
        assert!(path.contains("L50.00,50.00"));
    }

    #[test]
    fn test_polyline_points() {
        assert_eq!(
            polyline_points(&[(0.0, 40.0), (50.0, 5.5)]),
            "0.00,40.00 50.00,5.50"
        );
        assert_eq!(polyline_points(&[]), "");
    }

    #[test]
    fn test_format_axis_value() {
        assert_eq!(format_axis_value(83.33), "83");
        assert_eq!(format_axis_value(0.0), "0");
    }
}
