//! Alert banner and footer status bar

use chrono::{DateTime, Local, Utc};
use iq_client::use_controller;
use iq_state::use_app_state;
use leptos::prelude::*;

/// Wall-clock time of the last catalog refresh
pub fn refresh_label(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => format!("Synced {}", at.with_timezone(&Local).format("%H:%M:%S")),
        None => "Not synced".to_string(),
    }
}

/// Dismissable message for the last failed action
#[component]
pub fn AlertBanner() -> impl IntoView {
    let state = use_app_state();
    let controller = use_controller();
    let alert = state.alert();

    move || {
        let controller = controller.clone();
        alert.get().map(|message| {
            view! {
                <div class="alert-banner fade-in" role="alert">
                    <span class="alert-icon">"⚠"</span>
                    <span class="alert-msg">{message}</span>
                    <button class="alert-dismiss" title="Dismiss" on:click=move |_| controller.dismiss_alert()>
                        "×"
                    </button>
                </div>
            }
        })
    }
}

#[component]
pub fn StatusBar() -> impl IntoView {
    let state = use_app_state();
    let view_state = state.view;

    let service = Memo::new(move |_| view_state.with(|v| v.service));
    let refreshed_at = Memo::new(move |_| view_state.with(|v| v.catalog_refreshed_at));
    let warning = Memo::new(move |_| view_state.with(|v| v.catalog_warning.clone()));
    let sku_count = Memo::new(move |_| view_state.with(|v| v.catalog.total_skus()));

    view! {
        <footer class="status-bar">
            <div class="sb-service">
                <span class="sb-label">"Service:"</span>
                <span
                    class=move || format!("sb-value {}", service.get().css_class())
                    style=move || format!("color: {}", service.get().color())
                >
                    {move || service.get().label()}
                </span>
            </div>

            <div class="sb-catalog">
                <span class="sb-label">"SKUs:"</span>
                <span class="sb-value">{move || sku_count.get()}</span>
            </div>

            <div class="sb-sync">{move || refresh_label(refreshed_at.get())}</div>

            {move || {
                warning.get().map(|w| {
                    let title = w.clone();
                    view! {
                        <div class="sb-warning" title=title>
                            <span class="warning-icon">"⚠"</span>
                            <span class="warning-msg">{w}</span>
                        </div>
                    }
                })
            }}

            <div class="sb-version">
                <span>{concat!("v", env!("CARGO_PKG_VERSION"))}</span>
            </div>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_label() {
        assert_eq!(refresh_label(None), "Not synced");
        assert!(refresh_label(Some(Utc::now())).starts_with("Synced "));
    }
}
