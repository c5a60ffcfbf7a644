//! Upload page: ingest a sales CSV, then request the first forecast

use crate::LoadingScreen;
use iq_client::use_controller;
use iq_core::{Horizon, REQUIRED_COLUMNS, Sku};
use iq_state::{Action, ViewState, use_app_state};
use leptos::ev::{Event, MouseEvent};
use leptos::html;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

pub const INVALID_HORIZON: &str = "Forecast horizon must be a whole number of days";

/// Text of the upload zone
pub fn file_prompt(file_name: Option<&str>) -> String {
    file_name.map_or_else(|| "Click to Upload CSV".to_string(), str::to_string)
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let state = use_app_state();
    let controller = use_controller();
    let navigate = use_navigate();
    let view_state = state.view;

    let file_input = NodeRef::<html::Input>::new();
    let file_name = RwSignal::new(None::<String>);
    let sku_choice = RwSignal::new(String::new());
    let days = RwSignal::new(Horizon::UPLOAD_DEFAULT.days().to_string());

    let loading = state.loading();
    let uploading = Memo::new(move |_| view_state.with(ViewState::is_uploading));
    let forecasting = Memo::new(move |_| view_state.with(ViewState::is_forecasting));
    let skus = Memo::new(move |_| view_state.with(|v| v.catalog.skus.clone()));

    let forecast_ready = RwSignal::new(false);
    Effect::new(move |_| {
        if forecast_ready.get() {
            navigate("/dashboard", Default::default());
        }
    });

    let upload_controller = controller.clone();
    let on_upload = move |_: MouseEvent| {
        let controller = upload_controller.clone();
        let file = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        spawn_local(async move {
            controller.upload(file).await;
        });
    };

    let on_forecast = move |_: MouseEvent| {
        let controller = controller.clone();
        let sku = Sku::from_selection(&sku_choice.get_untracked());
        let Some(horizon) = Horizon::parse(&days.get_untracked()) else {
            controller
                .state()
                .dispatch(Action::Rejected(INVALID_HORIZON.to_string()));
            return;
        };
        spawn_local(async move {
            if controller.request_forecast(sku, horizon).await {
                forecast_ready.set(true);
            }
        });
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let name = input.files().and_then(|files| files.get(0)).map(|file| file.name());
        file_name.set(name);
    };

    view! {
        <div class="fade-in">
            {move || forecasting.get().then(|| view! { <LoadingScreen /> })}

            <div class="upload-hero">
                <h1 style="font-size: 2.5rem; margin-bottom: 1rem;">"AI-Powered Demand Intelligence"</h1>
                <p style="color: var(--text-secondary); max-width: 600px; margin: 0 auto;">
                    "Transform your messy spreadsheets into precise inventory forecasts with one click."
                </p>
            </div>

            <div class="dashboard-grid">
                <div class="main-card">
                    <div class="summary-label">"Step 1: Ingest Data"</div>
                    <div
                        class="upload-zone"
                        on:click=move |_| {
                            if let Some(input) = file_input.get_untracked() {
                                input.click();
                            }
                        }
                    >
                        <div style="font-size: 3rem;">"📂"</div>
                        <div style="text-align: center;">
                            <p style="font-weight: 700;">{move || file_prompt(file_name.get().as_deref())}</p>
                            <p style="font-size: 0.8rem; color: var(--text-secondary);">
                                {format!("Supports: {}", REQUIRED_COLUMNS.join(", "))}
                            </p>
                        </div>
                        <input
                            node_ref=file_input
                            type="file"
                            accept=".csv"
                            style="display: none;"
                            on:change=on_file_change
                        />
                    </div>
                    <button
                        class="btn-primary"
                        style="width: 100%; margin-top: 1.5rem;"
                        disabled=move || loading.get()
                        on:click=on_upload
                    >
                        {move || if uploading.get() { "Processing..." } else { "Analyze Historical Sales" }}
                    </button>
                </div>

                {move || {
                    let on_forecast = on_forecast.clone();
                    (!skus.with(Vec::is_empty)).then(|| {
                        view! {
                            <div class="main-card fade-in">
                                <div class="summary-label">"Step 2: Generate Intelligence"</div>
                                <div class="sku-selector-card">
                                    <div class="input-group">
                                        <label class="input-label">"Target Inventory Point (SKU)"</label>
                                        <select
                                            style="width: 100%;"
                                            prop:value=move || sku_choice.get()
                                            on:change=move |ev| sku_choice.set(event_target_value(&ev))
                                        >
                                            <option value="">"Select an item..."</option>
                                            {move || {
                                                skus.get()
                                                    .into_iter()
                                                    .map(|s| view! { <option value=s.to_string()>{s.to_string()}</option> })
                                                    .collect_view()
                                            }}
                                        </select>
                                    </div>
                                    <div class="input-group">
                                        <label class="input-label">"Forecast Horizon (Days)"</label>
                                        <input
                                            type="number"
                                            min="1"
                                            style="width: 100%;"
                                            prop:value=move || days.get()
                                            on:input=move |ev| days.set(event_target_value(&ev))
                                        />
                                    </div>
                                    <button
                                        class="btn-primary btn-gradient"
                                        style="width: 100%;"
                                        disabled=move || loading.get()
                                        on:click=on_forecast
                                    >
                                        {move || if forecasting.get() { "Thinking..." } else { "Compute AI Forecast" }}
                                    </button>
                                </div>
                            </div>
                        }
                    })
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_prompt() {
        assert_eq!(file_prompt(None), "Click to Upload CSV");
        assert_eq!(file_prompt(Some("sales_2024.csv")), "sales_2024.csv");
    }
}
