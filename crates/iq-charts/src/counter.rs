//! Count-up animation model
//!
//! Pure state machine behind the animated KPI tiles. The timer that drives
//! it lives with the component; this type only knows how far one tick moves.

/// Frame interval of the count-up timer
pub const TICK_MS: u32 = 16;

/// Default animation length
pub const DEFAULT_DURATION_MS: u32 = 1000;

/// Count-up timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUpConfig {
    pub duration_ms: u32,
    pub tick_ms: u32,
}

impl Default for CountUpConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            tick_ms: TICK_MS,
        }
    }
}

impl CountUpConfig {
    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn tick(mut self, ms: u32) -> Self {
        self.tick_ms = ms.max(1);
        self
    }

    /// Frames in one full animation (at least one)
    pub fn frames(&self) -> f64 {
        (self.duration_ms as f64 / self.tick_ms.max(1) as f64).max(1.0)
    }
}

/// Count-up from zero to `target` in equal increments
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    target: f64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CountUp {
    pub fn new(target: f64, config: CountUpConfig) -> Self {
        if !target.is_finite() || target == 0.0 {
            return Self::settled(0.0);
        }
        if target < 0.0 {
            return Self::settled(target);
        }

        Self {
            target,
            increment: target / config.frames(),
            current: 0.0,
            finished: false,
        }
    }

    /// Parse a target from text; anything non-numeric counts as zero
    pub fn from_text(target: &str, config: CountUpConfig) -> Self {
        Self::new(target.trim().parse().unwrap_or(0.0), config)
    }

    fn settled(value: f64) -> Self {
        Self {
            target: value,
            increment: 0.0,
            current: value,
            finished: true,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// A timer is only needed while frames remain
    pub fn needs_timer(&self) -> bool {
        !self.finished
    }

    /// Advance one frame; the final frame lands exactly on the target
    pub fn tick(&mut self) -> f64 {
        if self.finished {
            return self.current;
        }

        let next = self.current + self.increment;
        if next >= self.target {
            self.current = self.target;
            self.finished = true;
        } else {
            self.current = next;
        }

        self.current
    }

    /// Value shown to the user
    pub fn displayed(&self) -> i64 {
        self.current.round() as i64
    }
}

impl Iterator for CountUp {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.finished {
            None
        } else {
            Some(self.tick())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_target_exactly() {
        let frames: Vec<f64> = CountUp::new(250.0, CountUpConfig::default()).collect();

        assert_eq!(frames.len(), 63);
        assert_eq!(*frames.last().unwrap(), 250.0);
        assert!(frames.windows(2).all(|w| w[0] < w[1]));
        assert!(frames.iter().all(|&v| v <= 250.0));
    }

    #[test]
    fn test_fixed_increment() {
        let mut counter = CountUp::new(250.0, CountUpConfig::default());
        assert_eq!(counter.tick(), 4.0);
        assert_eq!(counter.tick(), 8.0);
        assert_eq!(counter.displayed(), 8);
    }

    #[test]
    fn test_zero_target_needs_no_timer() {
        let counter = CountUp::new(0.0, CountUpConfig::default());
        assert!(!counter.needs_timer());
        assert_eq!(counter.displayed(), 0);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_non_numeric_target_shows_zero() {
        let counter = CountUp::new(f64::NAN, CountUpConfig::default());
        assert_eq!(counter.displayed(), 0);
        assert!(!counter.needs_timer());

        let parsed = CountUp::from_text("n/a", CountUpConfig::default());
        assert_eq!(parsed.displayed(), 0);
        assert!(!parsed.needs_timer());
    }

    #[test]
    fn test_rounds_to_nearest_integer() {
        let mut counter = CountUp::new(10.0, CountUpConfig::default().duration(64).tick(16));
        assert_eq!(counter.tick(), 2.5);
        assert_eq!(counter.displayed(), 3);
    }

    #[test]
    fn test_negative_target_settles_immediately() {
        let counter = CountUp::new(-12.0, CountUpConfig::default());
        assert!(counter.is_finished());
        assert_eq!(counter.displayed(), -12);
    }

    #[test]
    fn test_short_duration_finishes_in_one_frame() {
        let mut counter = CountUp::new(99.0, CountUpConfig::default().duration(0));
        assert_eq!(counter.tick(), 99.0);
        assert!(counter.is_finished());
    }

    #[test]
    fn test_fractional_target_never_overshoots() {
        let frames: Vec<f64> = CountUp::new(91.37, CountUpConfig::default()).collect();
        assert_eq!(*frames.last().unwrap(), 91.37);
        assert!(frames.iter().all(|&v| v <= 91.37));
    }
}
