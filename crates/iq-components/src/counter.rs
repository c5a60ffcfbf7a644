//! Animated count-up number for KPI tiles

use iq_charts::{CountUp, CountUpConfig};
use iq_client::{TaskSlot, spawn_interval};
use iq_core::format_units;
use leptos::prelude::*;
use std::ops::ControlFlow;

/// Grouped integer with an optional suffix ("1,235%")
pub fn format_count(value: i64, suffix: &str) -> String {
    format!("{}{}", format_units(value as f64), suffix)
}

/// Counts from 0 up to `value`; a new value restarts the animation
#[component]
pub fn AnimatedCounter(
    #[prop(into)] value: Signal<f64>,
    #[prop(optional)] suffix: &'static str,
    #[prop(optional)] config: Option<CountUpConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let displayed = RwSignal::new(0_i64);
    let slot = TaskSlot::new();

    let effect_slot = slot.clone();
    Effect::new(move |_| {
        let mut count = CountUp::new(value.get(), config);
        displayed.set(count.displayed());

        if !count.needs_timer() {
            effect_slot.clear();
            return;
        }

        let handle = spawn_interval(config.tick_ms, move || {
            count.tick();
            displayed.set(count.displayed());
            if count.is_finished() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        effect_slot.replace(handle);
    });

    on_cleanup(move || slot.clear());

    view! {
        <span class="kpi-value">{move || format_count(displayed.get(), suffix)}</span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1235, ""), "1,235");
        assert_eq!(format_count(92, "%"), "92%");
        assert_eq!(format_count(0, "%"), "0%");
        assert_eq!(format_count(-1500, ""), "-1,500");
    }
}
