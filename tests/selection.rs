//! Panel host behavior driven through the public API.
//!
//! Covers registry ordering, fail-soft rebuilds, and the selection state
//! machine with event-recording panels.

use std::{cell::RefCell, rc::Rc};

use anyhow::{Result, anyhow};
use paneldock::{App, ContentScroll, Panel, PanelRegistration, PanelRegistry, ViewPrefs};
use ratatui::{Frame, layout::Rect};

#[derive(Clone, Default)]
struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    fn push(&self, event: String) {
        self.0.borrow_mut().push(event);
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut self.0.borrow_mut())
    }
}

struct TestPanel {
    key: &'static str,
    order: Option<i32>,
    log: EventLog,
}

impl Panel for TestPanel {
    fn key(&self) -> &'static str {
        self.key
    }

    fn title(&self) -> &'static str {
        self.key
    }

    fn icon(&self) -> &'static str {
        "#"
    }

    fn sort_order(&self) -> Option<i32> {
        self.order
    }

    fn on_focus(&mut self) {
        self.log.push(format!("focus:{}", self.key));
    }

    fn on_focus_lost(&mut self) {
        self.log.push(format!("blur:{}", self.key));
    }

    fn render_toolbar_left(&self, _frame: &mut Frame, _area: Rect) {}

    fn render_toolbar_right(&self, _frame: &mut Frame, _area: Rect) {}

    fn render_content(&self, _frame: &mut Frame, _area: Rect, _scroll: &ContentScroll) {}
}

fn panel(key: &'static str, order: Option<i32>, log: &EventLog) -> Box<dyn Panel> {
    Box::new(TestPanel {
        key,
        order,
        log: log.clone(),
    })
}

fn registry_keys(app: &App) -> Vec<&'static str> {
    app.registry().iter().map(Panel::key).collect()
}

// ========================================================================
// Registry ordering
// ========================================================================

#[test]
fn registry_sorts_by_order_with_absent_orders_first() {
    let log = EventLog::default();
    let registry = PanelRegistry::from_panels(vec![
        panel("a", Some(1), &log),
        panel("unordered", None, &log),
        panel("b", Some(0), &log),
    ]);
    let app = App::with_registry(registry, ViewPrefs::default());

    assert_eq!(registry_keys(&app), ["unordered", "b", "a"]);
}

fn build_alpha() -> Result<Box<dyn Panel>> {
    Ok(Box::new(TestPanel {
        key: "alpha",
        order: Some(0),
        log: EventLog::default(),
    }))
}

fn build_beta() -> Result<Box<dyn Panel>> {
    Ok(Box::new(TestPanel {
        key: "beta",
        order: Some(1),
        log: EventLog::default(),
    }))
}

fn build_failing() -> Result<Box<dyn Panel>> {
    Err(anyhow!("constructor exploded"))
}

#[test]
fn rebuild_skips_failing_constructors_and_keeps_the_rest() {
    let mut registry = PanelRegistry::new();
    registry.rebuild(&[
        PanelRegistration {
            name: "beta",
            build: build_beta,
        },
        PanelRegistration {
            name: "failing",
            build: build_failing,
        },
        PanelRegistration {
            name: "alpha",
            build: build_alpha,
        },
    ]);

    let app = App::with_registry(registry, ViewPrefs::default());
    assert_eq!(registry_keys(&app), ["alpha", "beta"]);
}

#[test]
fn rebuild_restores_a_persisted_selection() {
    let mut app = App::with_registry(
        PanelRegistry::new(),
        ViewPrefs {
            sidebar_expanded: false,
            last_panel: Some("beta".to_string()),
        },
    );

    app.rebuild(&[
        PanelRegistration {
            name: "alpha",
            build: build_alpha,
        },
        PanelRegistration {
            name: "beta",
            build: build_beta,
        },
    ]);

    assert_eq!(app.active_index(), Some(1));
    assert_eq!(app.active_panel().map(Panel::key), Some("beta"));
}

#[test]
fn rebuild_with_a_stale_persisted_key_selects_nothing() {
    let mut app = App::with_registry(
        PanelRegistry::new(),
        ViewPrefs {
            sidebar_expanded: false,
            last_panel: Some("gone".to_string()),
        },
    );

    app.rebuild(&[PanelRegistration {
        name: "alpha",
        build: build_alpha,
    }]);

    assert_eq!(app.active_index(), None);
}

// ========================================================================
// Selection state machine - the sidebar click scenario
// ========================================================================

#[test]
fn click_sequence_toggles_and_switches_selection() {
    // Two panels registered as [a(order=1), b(order=0)]; the rebuilt
    // sidebar order is [b, a].
    let log = EventLog::default();
    let registry =
        PanelRegistry::from_panels(vec![panel("a", Some(1), &log), panel("b", Some(0), &log)]);
    let mut app = App::with_registry(registry, ViewPrefs::default());
    assert_eq!(registry_keys(&app), ["b", "a"]);

    // Select b.
    app.select_panel(0);
    assert_eq!(app.active_panel().map(Panel::key), Some("b"));
    assert_eq!(app.prefs().last_panel.as_deref(), Some("b"));
    assert_eq!(log.take(), ["focus:b"]);

    // Select b again: deselects.
    app.select_panel(0);
    assert_eq!(app.active_index(), None);
    assert_eq!(app.prefs().last_panel, None);
    assert_eq!(log.take(), ["blur:b"]);

    // Select a.
    app.select_panel(1);
    assert_eq!(app.active_panel().map(Panel::key), Some("a"));
    assert_eq!(log.take(), ["focus:a"]);

    // Select b: a blurs strictly before b focuses.
    app.select_panel(0);
    assert_eq!(app.active_panel().map(Panel::key), Some("b"));
    assert_eq!(log.take(), ["blur:a", "focus:b"]);
}

#[test]
fn host_focus_events_only_forward_to_the_active_panel() {
    let log = EventLog::default();
    let registry =
        PanelRegistry::from_panels(vec![panel("a", Some(0), &log), panel("b", Some(1), &log)]);
    let mut app = App::with_registry(registry, ViewPrefs::default());

    // Nothing active: host focus changes are no-ops.
    app.on_host_focus_lost();
    app.on_host_focus_gained();
    assert!(log.take().is_empty());

    app.select_panel(0);
    log.take();

    app.on_host_focus_lost();
    app.on_host_focus_gained();
    assert_eq!(app.active_panel().map(Panel::key), Some("a"));
    assert_eq!(log.take(), ["blur:a", "focus:a"]);
}

#[test]
fn request_rebuild_clears_panels_after_notifying_the_active_one() {
    let log = EventLog::default();
    let registry = PanelRegistry::from_panels(vec![panel("a", Some(0), &log)]);
    let mut app = App::with_registry(registry, ViewPrefs::default());

    app.select_panel(0);
    log.take();

    app.request_rebuild();
    assert_eq!(log.take(), ["blur:a"]);
    assert!(app.registry().is_empty());
    assert_eq!(app.active_index(), None);
}

#[test]
fn dispose_does_not_dispatch_focus_lost() {
    let log = EventLog::default();
    let registry = PanelRegistry::from_panels(vec![panel("a", Some(0), &log)]);
    let mut app = App::with_registry(registry, ViewPrefs::default());

    app.select_panel(0);
    log.take();

    app.dispose();
    assert_eq!(app.active_index(), None);
    assert!(log.take().is_empty());
}
