// Host state shared by input handling and rendering.
// - Owns the panel registry, the single active selection, and view prefs.
// - Runs the deferred registry rebuild one tick after a reload request.
// - Writes preference changes through to disk as they happen.
mod input;

use std::{
    cell::{Cell, RefCell},
    path::PathBuf,
};

use ratatui::layout::Rect;

use crate::{
    panel::{ContentScroll, Panel, PanelRegistration},
    panels,
    prefs::ViewPrefs,
    registry::PanelRegistry,
};

pub struct App {
    registry: PanelRegistry,
    active: Option<usize>,
    prefs: ViewPrefs,
    prefs_path: Option<PathBuf>,
    rebuild_pending: bool,
    content_scroll: ContentScroll,
    show_keybinds: bool,
    keybinds_scroll: Cell<usize>,
    layout: RefCell<LayoutHits>,
}

// Click targets recorded during the last draw, hit-tested on mouse events.
#[derive(Default)]
pub(crate) struct LayoutHits {
    pub(crate) sidebar_rows: Vec<(Rect, usize)>,
    pub(crate) sidebar_toggle: Option<Rect>,
    pub(crate) content: Option<Rect>,
}

impl App {
    /// Host with an empty registry and a rebuild already pending, so the
    /// first tick populates it from the built-in registration table.
    pub fn new(prefs: ViewPrefs, prefs_path: Option<PathBuf>) -> Self {
        Self {
            registry: PanelRegistry::new(),
            active: None,
            prefs,
            prefs_path,
            rebuild_pending: true,
            content_scroll: ContentScroll::new(),
            show_keybinds: false,
            keybinds_scroll: Cell::new(0),
            layout: RefCell::new(LayoutHits::default()),
        }
    }

    /// Host over an explicit registry, for embedding and tests. Nothing is
    /// persisted and no rebuild is pending.
    pub fn with_registry(registry: PanelRegistry, prefs: ViewPrefs) -> Self {
        Self {
            registry,
            active: None,
            prefs,
            prefs_path: None,
            rebuild_pending: false,
            content_scroll: ContentScroll::new(),
            show_keybinds: false,
            keybinds_scroll: Cell::new(0),
            layout: RefCell::new(LayoutHits::default()),
        }
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn prefs(&self) -> &ViewPrefs {
        &self.prefs
    }

    pub fn sidebar_expanded(&self) -> bool {
        self.prefs.sidebar_expanded
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_panel(&self) -> Option<&dyn Panel> {
        self.active.and_then(|index| self.registry.get(index))
    }

    fn active_panel_mut(&mut self) -> Option<&mut (dyn Panel + 'static)> {
        self.active.and_then(|index| self.registry.get_mut(index))
    }

    pub fn content_scroll(&self) -> &ContentScroll {
        &self.content_scroll
    }

    /// Select the panel at `index`, or deselect it if it is already active.
    ///
    /// On a switch the previous panel's focus-lost runs strictly before the
    /// new panel's focus-gained. The panel identity is persisted either way,
    /// and the content scroll starts back at the top.
    pub fn select_panel(&mut self, index: usize) {
        if index >= self.registry.len() {
            return;
        }

        if self.active == Some(index) {
            if let Some(panel) = self.registry.get_mut(index) {
                tracing::debug!(panel = panel.key(), "panel deselected");
                panel.on_focus_lost();
            }
            self.active = None;
            self.prefs.last_panel = None;
        } else {
            if let Some(previous) = self.active_panel_mut() {
                previous.on_focus_lost();
            }
            self.active = Some(index);
            self.prefs.last_panel = self.registry.get(index).map(|panel| panel.key().to_string());
            if let Some(panel) = self.registry.get_mut(index) {
                tracing::debug!(panel = panel.key(), "panel selected");
                panel.on_focus();
            }
            self.content_scroll.reset();
        }

        self.persist_prefs();
    }

    /// Cycle to the next panel in sidebar order; selects the first when
    /// nothing is active.
    pub fn select_next_panel(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let next = match self.active {
            Some(index) => (index + 1) % self.registry.len(),
            None => 0,
        };
        if self.active != Some(next) {
            self.select_panel(next);
        }
    }

    pub fn select_previous_panel(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let previous = match self.active {
            Some(index) => (index + self.registry.len() - 1) % self.registry.len(),
            None => self.registry.len() - 1,
        };
        if self.active != Some(previous) {
            self.select_panel(previous);
        }
    }

    /// The host window itself gained OS focus. Forwarded to the active
    /// panel only; selection never changes.
    pub fn on_host_focus_gained(&mut self) {
        if let Some(panel) = self.active_panel_mut() {
            panel.on_focus();
        }
    }

    pub fn on_host_focus_lost(&mut self) {
        if let Some(panel) = self.active_panel_mut() {
            panel.on_focus_lost();
        }
    }

    /// Synchronously notify and drop the current panels, then rebuild on
    /// the next tick so the registry is never replaced mid-draw.
    pub fn request_rebuild(&mut self) {
        if let Some(panel) = self.active_panel_mut() {
            panel.on_focus_lost();
        }
        self.registry.clear();
        self.active = None;
        self.rebuild_pending = true;
        tracing::info!("panel registry rebuild requested");
    }

    /// Runs once per event-loop pass, before the draw.
    pub fn tick(&mut self) {
        if std::mem::take(&mut self.rebuild_pending) {
            self.rebuild(panels::builtin_panels());
        }
    }

    /// Rebuild the registry from `registrations` and restore the persisted
    /// last-active panel if it is still present.
    pub fn rebuild(&mut self, registrations: &[PanelRegistration]) {
        self.registry.rebuild(registrations);
        self.active = None;
        self.restore_persisted_selection();
        tracing::info!(panels = self.registry.len(), "panel registry rebuilt");
    }

    fn restore_persisted_selection(&mut self) {
        let Some(last) = self.prefs.last_panel.as_deref() else {
            return;
        };
        let Some(index) = self.registry.position_by_key(last) else {
            tracing::debug!(last, "persisted panel not in rebuilt registry");
            return;
        };

        self.active = Some(index);
        if let Some(panel) = self.registry.get_mut(index) {
            panel.on_focus();
        }
        self.content_scroll.reset();
    }

    /// Flip the persisted sidebar-expanded flag. Affects sizing only.
    pub fn toggle_sidebar(&mut self) {
        self.prefs.sidebar_expanded = !self.prefs.sidebar_expanded;
        self.persist_prefs();
    }

    /// Teardown on exit: clear the selection without dispatching focus-lost.
    pub fn dispose(&mut self) {
        self.active = None;
        tracing::debug!("host disposed");
    }

    pub fn show_keybinds(&self) -> bool {
        self.show_keybinds
    }

    pub fn toggle_keybinds(&mut self) {
        self.show_keybinds = !self.show_keybinds;
        self.keybinds_scroll.set(0);
    }

    pub fn hide_keybinds(&mut self) {
        self.show_keybinds = false;
    }

    pub(crate) fn scroll_keybinds_down(&self, step: usize) {
        self.keybinds_scroll
            .set(self.keybinds_scroll.get().saturating_add(step));
    }

    pub(crate) fn scroll_keybinds_up(&self, step: usize) {
        self.keybinds_scroll
            .set(self.keybinds_scroll.get().saturating_sub(step));
    }

    pub(crate) fn clamp_keybinds_scroll(&self, max_scroll_top: usize) -> usize {
        let clamped = self.keybinds_scroll.get().min(max_scroll_top);
        self.keybinds_scroll.set(clamped);
        clamped
    }

    pub(crate) fn record_layout(&self, hits: LayoutHits) {
        *self.layout.borrow_mut() = hits;
    }

    fn persist_prefs(&self) {
        let Some(path) = &self.prefs_path else {
            return;
        };
        if let Err(err) = self.prefs.save(path) {
            tracing::warn!("failed to save preferences: {err:#}");
        }
    }
}
