// Built-in panel registry.
// - Each panel module owns only its own behavior.
// - The table below is what a registry rebuild scans; add new panels here.
pub mod about;
pub mod files;
pub mod log_view;

use anyhow::Result;

use crate::panel::{Panel, PanelRegistration};

/// Registration table for the panels shipped with the host. A rebuild
/// constructs one instance per entry; entries whose constructor fails are
/// skipped.
pub fn builtin_panels() -> &'static [PanelRegistration] {
    const BUILTIN: &[PanelRegistration] = &[
        PanelRegistration {
            name: "files",
            build: build_files,
        },
        PanelRegistration {
            name: "log",
            build: build_log,
        },
        PanelRegistration {
            name: "about",
            build: build_about,
        },
    ];
    BUILTIN
}

fn build_files() -> Result<Box<dyn Panel>> {
    Ok(Box::new(files::FilesPanel::new()?))
}

fn build_log() -> Result<Box<dyn Panel>> {
    Ok(Box::new(log_view::LogPanel::new()?))
}

fn build_about() -> Result<Box<dyn Panel>> {
    Ok(Box::new(about::AboutPanel::new()))
}
