//! paneldock - a terminal workbench hosting pluggable tool panels.
//!
//! The host owns an ordered registry of panels, shows one sidebar icon per
//! panel, and delegates the toolbar and main-content regions to the single
//! active panel each frame. Panels implement the [`Panel`] trait and are
//! registered in the static table in [`panels::builtin_panels`].

pub mod app;
pub mod config_paths;
pub mod logging;
pub mod panel;
pub mod panels;
pub mod prefs;
pub mod registry;
pub mod ui;

// Re-export the types an embedding needs
pub use app::App;
pub use panel::{ContentScroll, Panel, PanelRegistration};
pub use prefs::ViewPrefs;
pub use registry::PanelRegistry;
