//! Full-screen overlay shown while a forecast is computed

use iq_client::spawn_interval;
use leptos::prelude::*;
use std::ops::ControlFlow;

/// Rotation period of the status line
pub const MESSAGE_INTERVAL_MS: u32 = 700;

pub const LOADING_MESSAGES: [&str; 4] = [
    "Initializing Intelligence Engine...",
    "Running Holt-Winters Seasonal Model...",
    "Calculating Confidence Intervals...",
    "Synthesizing Restock Recommendations...",
];

/// Index of the message after `step`
pub fn next_step(step: usize) -> usize {
    (step + 1) % LOADING_MESSAGES.len()
}

#[component]
pub fn LoadingScreen() -> impl IntoView {
    let step = RwSignal::new(0_usize);

    let handle = spawn_interval(MESSAGE_INTERVAL_MS, move || {
        step.update(|s| *s = next_step(*s));
        ControlFlow::Continue(())
    });
    on_cleanup(move || handle.stop());

    view! {
        <div class="loading-overlay fade-in">
            <div class="loader-icon">"🧠"</div>
            <div class="loader-text">"Analyzing Inventory Dynamics"</div>
            <div class="loader-subtext">{move || LOADING_MESSAGES[step.get()]}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_wrap_around() {
        let mut step = 0;
        for _ in 0..LOADING_MESSAGES.len() {
            step = next_step(step);
        }
        assert_eq!(step, 0);
        assert_eq!(next_step(2), 3);
    }
}
