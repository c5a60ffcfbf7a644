//! Top navigation bar and the about page

use iq_state::use_app_state;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Upload,
    Dashboard,
    About,
}

impl NavTab {
    pub const ALL: [NavTab; 3] = [Self::Upload, Self::Dashboard, Self::About];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Upload => "/",
            Self::Dashboard => "/dashboard",
            Self::About => "/about",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Upload Data",
            Self::Dashboard => "Dashboard",
            Self::About => "About",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|tab| tab.path() == path)
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let state = use_app_state();
    let ui = state.ui;
    let location = use_location();
    let current = Memo::new(move |_| location.pathname.with(|p| NavTab::from_path(p)));

    view! {
        <nav class="navbar">
            <div class="nav-brand">
                <span style="font-size: 1.5rem;">"📊"</span>
                " InventoryIQ"
            </div>
            <div class="nav-links">
                {NavTab::ALL
                    .into_iter()
                    .map(|tab| {
                        let class = move || {
                            if current.get() == Some(tab) { "nav-link active" } else { "nav-link" }
                        };
                        view! { <a class=class href=tab.path()>{tab.label()}</a> }
                    })
                    .collect_view()}
            </div>
            <button class="theme-toggle" on:click=move |_| state.toggle_theme()>
                {move || ui.with(|u| u.theme.toggle_icon())}
            </button>
        </nav>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="main-card fade-in">
            <h2 style="margin-bottom: 1rem;">"About InventoryIQ"</h2>
            <p style="line-height: 1.6; color: var(--text-muted);">
                "InventoryIQ is a demand forecasting suite for small and mid-sized merchants. "
                "Upload daily unit sales per SKU and it projects demand with Holt-Winters "
                "exponential smoothing, complete with confidence bands, reorder points and "
                "restock recommendations."
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_from_path() {
        assert_eq!(NavTab::from_path("/"), Some(NavTab::Upload));
        assert_eq!(NavTab::from_path(""), Some(NavTab::Upload));
        assert_eq!(NavTab::from_path("/dashboard/"), Some(NavTab::Dashboard));
        assert_eq!(NavTab::from_path("/about"), Some(NavTab::About));
        assert_eq!(NavTab::from_path("/settings"), None);
    }
}
