//! The panel capability contract.
//!
//! A panel is a self-contained tool pane pluggable into the host window. The
//! host owns every panel instance through the registry, shows one sidebar
//! icon per panel, and delegates the toolbar and main-content regions to the
//! single active panel each frame.

use std::cell::Cell;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

/// Capability implemented by every pluggable panel.
///
/// Lifecycle: instances are built by their [`PanelRegistration`] during a
/// registry rebuild and live until the next rebuild replaces the whole set.
/// The host never drops a single panel on its own.
pub trait Panel {
    /// Stable identifier, persisted as the last-active panel across runs.
    fn key(&self) -> &'static str;

    /// Label shown next to the icon when the sidebar is expanded.
    fn title(&self) -> &'static str;

    /// Glyph shown in the sidebar. The expanded sidebar shows icon + title.
    fn icon(&self) -> &'static str;

    /// Ascending sidebar position. Panels without one sort first; ties keep
    /// registration order.
    fn sort_order(&self) -> Option<i32> {
        None
    }

    /// The panel became the active selection, or the host window regained
    /// OS focus while this panel was active.
    fn on_focus(&mut self) {}

    /// The panel was deselected, or the host window lost OS focus while
    /// this panel was active.
    fn on_focus_lost(&mut self) {}

    /// Key press forwarded by the host. Only the active panel receives keys
    /// the host itself does not claim.
    fn on_key(&mut self, _key: KeyEvent) {}

    /// Left-aligned half of the toolbar row above the content region.
    fn render_toolbar_left(&self, frame: &mut Frame, area: Rect);

    /// Right-aligned half of the toolbar row.
    fn render_toolbar_right(&self, frame: &mut Frame, area: Rect);

    /// Main content region. `scroll` is the host-owned offset; panels with
    /// line-oriented content clamp it to their height each frame.
    fn render_content(&self, frame: &mut Frame, area: Rect, scroll: &ContentScroll);
}

/// One entry of the static registration table the registry rebuilds from.
pub struct PanelRegistration {
    /// Name used in diagnostics when construction fails.
    pub name: &'static str,
    /// Constructor. A failure skips this entry, never the whole rebuild.
    pub build: fn() -> Result<Box<dyn Panel>>,
}

/// Scroll state for the main content region, owned by the host and reset on
/// every selection change. Panels clamp it against their content height
/// during rendering, so the offset never runs past the end.
#[derive(Debug, Default)]
pub struct ContentScroll {
    offset: Cell<usize>,
    last_max: Cell<usize>,
}

impl ContentScroll {
    const PAGE_STEP: usize = 12;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&self) {
        self.offset.set(0);
        self.last_max.set(0);
    }

    pub fn scroll_down(&self) {
        self.offset
            .set((self.offset.get() + 1).min(self.last_max.get()));
    }

    pub fn scroll_up(&self) {
        self.offset.set(self.offset.get().saturating_sub(1));
    }

    pub fn page_down(&self) {
        self.offset
            .set((self.offset.get() + Self::PAGE_STEP).min(self.last_max.get()));
    }

    pub fn page_up(&self) {
        self.offset
            .set(self.offset.get().saturating_sub(Self::PAGE_STEP));
    }

    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    /// Clamp the offset to `total_lines` shown through `visible_rows` and
    /// remember the maximum so later scrolls stop at the end.
    pub fn clamp_for_viewport(&self, visible_rows: usize, total_lines: usize) -> usize {
        let visible_rows = visible_rows.max(1);
        let max_offset = total_lines.saturating_sub(visible_rows);
        self.last_max.set(max_offset);
        let clamped = self.offset.get().min(max_offset);
        self.offset.set(clamped);
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::ContentScroll;

    #[test]
    fn scroll_stops_at_clamped_end() {
        let scroll = ContentScroll::new();
        scroll.clamp_for_viewport(10, 15);

        for _ in 0..20 {
            scroll.scroll_down();
        }
        assert_eq!(scroll.offset(), 5);

        scroll.scroll_up();
        assert_eq!(scroll.offset(), 4);
    }

    #[test]
    fn clamp_pulls_offset_back_after_content_shrinks() {
        let scroll = ContentScroll::new();
        scroll.clamp_for_viewport(5, 100);
        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 24);

        assert_eq!(scroll.clamp_for_viewport(5, 8), 3);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn reset_returns_to_top() {
        let scroll = ContentScroll::new();
        scroll.clamp_for_viewport(5, 50);
        scroll.page_down();
        scroll.reset();
        assert_eq!(scroll.offset(), 0);
    }
}
