//! InventoryIQ - WASM entry point

use iq_client::{ApiConfig, provide_controller};
use iq_components::{AboutPage, AlertBanner, Dashboard, Navbar, StatusBar, UploadPage};
use iq_core::colors;
use iq_state::provide_app_state;
use leptos::prelude::*;
use leptos_meta::{Meta, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use tracing_subscriber::prelude::*;
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};

fn main() {
    console_error_panic_hook::set_once();
    init_logging();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting InventoryIQ");
    leptos::mount::mount_to_body(App);
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let config = WASMLayerConfigBuilder::new().set_max_level(level).build();
    tracing_subscriber::registry()
        .with(WASMLayer::new(config))
        .init();
}

#[component]
fn App() -> impl IntoView {
    provide_meta_context();

    let state = provide_app_state();
    let controller = provide_controller(state.clone(), ApiConfig::default());
    tracing::info!(api = %controller.config().base_url, "forecasting service");

    let poller = controller.start_catalog_poller();
    on_cleanup(move || poller.stop());

    let ui = state.ui;
    Effect::new(move |_| {
        let theme = ui.with(|u| u.theme);
        let Some(root) = document().document_element() else {
            return;
        };
        if let Err(err) = root.set_attribute("data-theme", theme.attr()) {
            tracing::warn!(?err, "failed to apply theme");
        }
    });

    view! {
        <Title text="InventoryIQ | Demand Intelligence" />
        <Meta name="theme-color" content=colors::PRIMARY />

        <Router>
            <div class="app-root">
                <Navbar />
                <main class="container">
                    <AlertBanner />
                    <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                        <Route path=path!("/") view=UploadPage />
                        <Route path=path!("/dashboard") view=Dashboard />
                        <Route path=path!("/about") view=AboutPage />
                    </Routes>
                </main>
                <StatusBar />
            </div>
        </Router>
    }
}
