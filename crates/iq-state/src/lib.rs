//! # iq-state
//!
//! State management for the InventoryIQ dashboard.
//! The view state is an immutable snapshot advanced by a pure reducer;
//! Leptos signals only hold the current snapshot so components re-render
//! when it is replaced.

pub mod view;

pub use view::*;
// `leptos::prelude` exports its own `Action`
pub use view::Action;

use iq_core::{ComparisonOverlay, ForecastResult};
use leptos::prelude::*;

/// Historical samples listed in the detail table
pub const TABLE_ROWS: usize = 14;

// ============================================================================
// UI STATE
// ============================================================================

/// Application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Value for the `data-theme` attribute on the root element
    pub fn attr(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Icon of the toggle button (shows the theme you would switch to)
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Self::Dark => "☀️",
            Self::Light => "🌙",
        }
    }
}

/// Presentation-only state, kept out of the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub theme: Theme,
    pub show_table: bool,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Current view snapshot; replaced wholesale by [`AppState::dispatch`]
    pub view: RwSignal<ViewState>,
    /// UI state (theme, table toggle)
    pub ui: RwSignal<UiState>,
    sequencer: RequestSequencer,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(ViewState::default()),
            ui: RwSignal::new(UiState::default()),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Apply an action through the reducer
    pub fn dispatch(&self, action: Action) {
        tracing::debug!(action = action.name(), "dispatch");
        self.view.update(|state| *state = reduce(state, action));
    }

    /// Token for a request about to be issued
    pub fn issue_token(&self) -> RequestToken {
        self.sequencer.issue()
    }

    /// Read the current snapshot
    pub fn snapshot(&self) -> ViewState {
        self.view.get_untracked()
    }

    // ========================================================================
    // Derived signals
    // ========================================================================

    pub fn active(&self) -> Signal<Option<ForecastResult>> {
        let view = self.view;
        Signal::derive(move || view.with(|v| v.active.clone()))
    }

    pub fn comparison(&self) -> Signal<Option<ComparisonOverlay>> {
        let view = self.view;
        Signal::derive(move || view.with(|v| v.comparison.clone()))
    }

    pub fn loading(&self) -> Memo<bool> {
        let view = self.view;
        Memo::new(move |_| view.with(ViewState::is_loading))
    }

    pub fn alert(&self) -> Memo<Option<String>> {
        let view = self.view;
        Memo::new(move |_| view.with(|v| v.alert.clone()))
    }

    // ========================================================================
    // UI State
    // ========================================================================

    /// Toggle theme
    pub fn toggle_theme(&self) {
        self.ui.update(|ui| {
            ui.theme = ui.theme.toggle();
        });
    }

    /// Show or hide the detail table
    pub fn toggle_table(&self) {
        self.ui.update(|ui| {
            ui.show_table = !ui.show_table;
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide app state context to component tree
pub fn provide_app_state() -> AppState {
    let state = AppState::new();
    provide_context(state.clone());
    state
}

/// Use app state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use iq_core::Horizon;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.attr(), "dark");
        assert_eq!(Theme::Light.toggle_icon(), "🌙");
    }

    #[test]
    fn test_action_resolves_to_reducer_action() {
        let action: Action = Action::SetHorizon(Horizon::Week);
        assert_eq!(action.name(), "set_horizon");

        let next = reduce(&ViewState::default(), action);
        assert_eq!(next.selection.horizon, Horizon::Week);
    }
}
