//! # iq-components
//!
//! Leptos UI components for the InventoryIQ dashboard.
//!
//! Components read state through `use_app_state()` and act through
//! `use_controller()`; neither is passed down as props.

pub mod counter;
pub mod dashboard;
pub mod loading;
pub mod nav;
pub mod status;
pub mod upload;

pub use counter::*;
pub use dashboard::*;
pub use loading::*;
pub use nav::*;
pub use status::*;
pub use upload::*;
