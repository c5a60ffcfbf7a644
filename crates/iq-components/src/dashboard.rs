//! Main dashboard layout component

use crate::AnimatedCounter;
use iq_charts::{ForecastChart, HealthBar, MiniChart, colors};
use iq_client::use_controller;
use iq_core::{ForecastResult, Horizon, Sku, format_units};
use iq_state::{TABLE_ROWS, ViewState, use_app_state};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// One line of the detail table
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub period: String,
    pub units: String,
}

/// Last `n` historical samples, labelled by how many days back they lie
pub fn detail_rows(history: &[f64], n: usize) -> Vec<DetailRow> {
    let recent = &history[history.len().saturating_sub(n)..];
    let len = recent.len();

    recent
        .iter()
        .enumerate()
        .map(|(i, v)| DetailRow {
            period: format!("Day -{}", len - i),
            units: if v.is_finite() { format!("{v}") } else { "-".to_string() },
        })
        .collect()
}

/// Scalar of the active result (0 without one)
fn metric(active: Signal<Option<ForecastResult>>, field: fn(&ForecastResult) -> f64) -> Signal<f64> {
    Signal::derive(move || active.with(|a| a.as_ref().map_or(0.0, field)))
}

/// Series of the active result (empty without one)
fn series(active: Signal<Option<ForecastResult>>, field: fn(&ForecastResult) -> &[f64]) -> Signal<Vec<f64>> {
    Signal::derive(move || active.with(|a| a.as_ref().map(|r| field(r).to_vec()).unwrap_or_default()))
}

fn print_report() {
    if let Err(err) = window().print() {
        tracing::warn!(?err, "print dialog unavailable");
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_app_state();
    let view_state = state.view;
    let has_active = Memo::new(move |_| view_state.with(|v| v.active.is_some()));

    move || {
        if has_active.get() {
            view! { <ForecastDashboard /> }.into_any()
        } else {
            view! { <EmptyDashboard /> }.into_any()
        }
    }
}

// ============================================================================
// EMPTY STATE
// ============================================================================

#[component]
fn EmptyDashboard() -> impl IntoView {
    let state = use_app_state();
    let controller = use_controller();
    let view_state = state.view;

    let catalog = Memo::new(move |_| view_state.with(|v| v.catalog.clone()));
    let service = Memo::new(move |_| view_state.with(|v| v.service));

    view! {
        <div class="fade-in">
            <div class="summary-overview">
                <div class="summary-card">
                    <div class="summary-label">"Total SKUs Tracked"</div>
                    <div class="summary-value">{move || catalog.with(|c| c.total_skus())}</div>
                </div>
                <div class="summary-card">
                    <div class="summary-label">"Total Sales (30D)"</div>
                    <div class="summary-value">{move || catalog.with(|c| format_units(c.total_sales_30d()))}</div>
                </div>
                <div class="summary-card">
                    <div class="summary-label">"System Status"</div>
                    <div class="summary-value" style=move || format!("color: {}", service.get().color())>
                        {move || service.get().label()}
                    </div>
                </div>
            </div>

            <div class="main-card empty-state">
                <div style="font-size: 4rem; margin-bottom: 1.5rem;">"📊"</div>
                <h1 style="margin-bottom: 1rem;">"Intelligence Engine Ready"</h1>
                <p class="empty-hint">
                    "Please select an SKU to begin detailed demand analysis and stock-out prevention."
                </p>

                {move || {
                    let controller = controller.clone();
                    if catalog.with(|c| c.is_empty()) {
                        view! {
                            <a class="btn-primary" href="/" on:click=move |_| controller.reset()>
                                "Go to Data Upload"
                            </a>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div style="max-width: 340px; margin: 0 auto;">
                                <select
                                    class="input-group"
                                    style="width: 100%; margin-bottom: 2rem;"
                                    on:change=move |ev| {
                                        let sku = Sku::from_selection(&event_target_value(&ev));
                                        let controller = controller.clone();
                                        spawn_local(async move {
                                            controller.select_sku(sku).await;
                                        });
                                    }
                                >
                                    <option value="">"Choose an SKU..."</option>
                                    {catalog
                                        .with(|c| c.skus.clone())
                                        .into_iter()
                                        .map(|s| view! { <option value=s.to_string()>{s.to_string()}</option> })
                                        .collect_view()}
                                </select>
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}

// ============================================================================
// ACTIVE FORECAST
// ============================================================================

#[component]
fn ForecastDashboard() -> impl IntoView {
    let state = use_app_state();
    let controller = use_controller();
    let view_state = state.view;
    let ui = state.ui;

    let active = state.active();
    let comparison = state.comparison();
    let forecasting = Memo::new(move |_| view_state.with(ViewState::is_forecasting));
    let horizon = Memo::new(move |_| view_state.with(|v| v.selection.horizon));

    let risk = move || active.with(|a| a.as_ref().map(|r| r.risk).unwrap_or_default());
    let expected_label = move || {
        let days = active.with(|a| a.as_ref().map_or(0, ForecastResult::horizon_days));
        format!("Expected Sales ({days}D)")
    };

    let horizon_buttons = Horizon::presets()
        .iter()
        .copied()
        .map(|h| {
            let controller = controller.clone();
            let class = move || if horizon.get() == h { "toggle-btn active" } else { "toggle-btn" };
            view! {
                <button
                    class=class
                    on:click=move |_| {
                        let controller = controller.clone();
                        spawn_local(async move { controller.set_horizon(h).await });
                    }
                >
                    {h.label()}
                </button>
            }
        })
        .collect_view();

    let table_state = state.clone();
    let reset_controller = controller.clone();

    view! {
        <div class="fade-in">
            <div class="summary-overview">
                <div class="summary-card">
                    <div class="summary-label">"SKU Tracking"</div>
                    <div class="summary-value">
                        {move || active.with(|a| a.as_ref().map_or("N/A", |r| r.sku_label()).to_string())}
                    </div>
                </div>
                <div class="summary-card">
                    <div class="summary-label">"Model Accuracy"</div>
                    <div class="summary-value" style=format!("color: {}", colors::SUCCESS)>
                        <AnimatedCounter value=metric(active, |r| r.accuracy) suffix="%" />
                    </div>
                </div>
                <div class="summary-card">
                    <div class="summary-label">"Risk Exposure"</div>
                    <div
                        class=move || format!("summary-value {}", risk().css_class())
                        style=move || format!("color: {}", risk().color())
                    >
                        {move || risk().label()}
                    </div>
                </div>
            </div>

            <div class="main-card">
                <div class="card-header">
                    <h2 class="gradient-title">"Demand Analysis"</h2>
                    <div class="toggle-group">{horizon_buttons}</div>
                </div>

                <div class="dashboard-grid">
                    <div class="svg-chart-container">
                        {move || {
                            if forecasting.get() {
                                view! { <div class="chart-placeholder">"Thinking..."</div> }.into_any()
                            } else {
                                view! { <ForecastChart result=active comparison=comparison /> }.into_any()
                            }
                        }}

                        <div class="metrics-grid">
                            <div class="metric-card">
                                <div class="summary-label">{expected_label}</div>
                                <div class="summary-value" style=format!("color: {}", colors::PRIMARY)>
                                    <AnimatedCounter value=metric(active, ForecastResult::expected_sales) />
                                </div>
                            </div>
                            <div class="metric-card">
                                <div class="summary-label">"Daily Demand"</div>
                                <div class="summary-value">
                                    <AnimatedCounter value=metric(active, |r| r.avg_demand) />
                                </div>
                            </div>
                            <div class="metric-card">
                                <div class="summary-label">"Reorder Pt"</div>
                                <div class="summary-value">
                                    <AnimatedCounter value=metric(active, |r| r.reorder_point) />
                                </div>
                            </div>
                            <div class="metric-card">
                                <div class="summary-label">"Safety Stock"</div>
                                <div class="summary-value">
                                    <AnimatedCounter value=metric(active, |r| r.safety_stock) />
                                </div>
                            </div>
                        </div>
                    </div>

                    <div class="sidebar-panels">
                        <div class="summary-card">
                            <div class="summary-label">"Stock-out Health"</div>
                            <HealthBar value=metric(active, |r| r.health_pct) />
                            <div class="health-value">
                                <AnimatedCounter value=metric(active, |r| r.health_pct) suffix="%" />
                            </div>
                        </div>

                        <div class="summary-card">
                            <div class="summary-label">"AI Components"</div>
                            <div class="component-charts">
                                <div>
                                    <div class="component-label">"TREND"</div>
                                    <MiniChart data=series(active, |r| r.trend_line.as_slice()) />
                                </div>
                                <div>
                                    <div class="component-label">"SEASONALITY"</div>
                                    <MiniChart data=series(active, |r| r.seasonal_line.as_slice()) color=colors::SECONDARY />
                                </div>
                            </div>
                        </div>

                        <ComparisonPicker />
                    </div>
                </div>

                {move || {
                    active.with(|a| {
                        a.as_ref().map(|r| {
                            let (accent, background) = if r.should_restock {
                                (colors::ACCENT, colors::accent_alpha(0.1))
                            } else {
                                (colors::SUCCESS, colors::success_alpha(0.1))
                            };
                            view! {
                                <div
                                    class="restock-banner"
                                    style=format!("background: {background}; border-left: 6px solid {accent};")
                                >
                                    <h3 style=format!("color: {accent}; margin-bottom: 0.5rem;")>{r.headline()}</h3>
                                    <p style="font-weight: 500; opacity: 0.9;">{r.recommendation.clone()}</p>
                                </div>
                            }
                        })
                    })
                }}

                <div class="dashboard-actions">
                    <button class="btn-secondary" on:click=move |_| table_state.toggle_table()>
                        {move || if ui.with(|u| u.show_table) { "Hide Intelligence Table" } else { "Show Detailed Data" }}
                    </button>
                    <button class="btn-primary" on:click=move |_| print_report()>"Export Executive PDF"</button>
                    <a class="btn-secondary" href="/" on:click=move |_| reset_controller.reset()>"New Analysis"</a>
                </div>

                {move || {
                    ui.with(|u| u.show_table).then(|| {
                        let rows = active.with(|a| {
                            a.as_ref().map(|r| detail_rows(&r.historical, TABLE_ROWS)).unwrap_or_default()
                        });
                        view! { <DetailTable rows=rows /> }
                    })
                }}
            </div>
        </div>
    }
}

#[component]
fn ComparisonPicker() -> impl IntoView {
    let state = use_app_state();
    let controller = use_controller();
    let view_state = state.view;

    let candidates = Memo::new(move |_| {
        view_state.with(|v| {
            v.catalog
                .comparison_candidates(v.active_sku())
                .cloned()
                .collect::<Vec<Sku>>()
        })
    });
    let selected = Memo::new(move |_| {
        view_state.with(|v| v.selection.comparison.as_ref().map(Sku::to_string).unwrap_or_default())
    });

    view! {
        <div class="summary-card">
            <div class="summary-label">"SKU Comparison"</div>
            <select
                class="compare-select"
                prop:value=move || selected.get()
                on:change=move |ev| {
                    let sku = Sku::from_selection(&event_target_value(&ev));
                    let controller = controller.clone();
                    spawn_local(async move {
                        controller.select_comparison(sku).await;
                    });
                }
            >
                <option value="">"Select SKU..."</option>
                {move || {
                    candidates
                        .get()
                        .into_iter()
                        .map(|s| view! { <option value=s.to_string()>{s.to_string()}</option> })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

#[component]
fn DetailTable(rows: Vec<DetailRow>) -> impl IntoView {
    view! {
        <div class="detail-table fade-in">
            <table>
                <thead>
                    <tr>
                        <th>"Period"</th>
                        <th>"Demand Units"</th>
                        <th>"State"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>
                                    <td>{row.period}</td>
                                    <td class="units">{row.units}</td>
                                    <td><span class="badge">"SAMPLED"</span></td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_rows_take_most_recent() {
        let history: Vec<f64> = (1..=20).map(f64::from).collect();
        let rows = detail_rows(&history, TABLE_ROWS);

        assert_eq!(rows.len(), 14);
        assert_eq!(rows[0], DetailRow { period: "Day -14".into(), units: "7".into() });
        assert_eq!(rows[13], DetailRow { period: "Day -1".into(), units: "20".into() });
    }

    #[test]
    fn test_detail_rows_short_history() {
        let rows = detail_rows(&[3.5, f64::NAN], TABLE_ROWS);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, "Day -2");
        assert_eq!(rows[0].units, "3.5");
        assert_eq!(rows[1].units, "-");
    }

    #[test]
    fn test_detail_rows_empty() {
        assert!(detail_rows(&[], TABLE_ROWS).is_empty());
    }
}
