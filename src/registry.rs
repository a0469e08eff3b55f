// Ordered collection of all registered panel instances.
// - Rebuilt wholesale from the registration table, never incrementally.
// - Construction failures skip the one entry and keep the rest.
// - Sorted ascending by sort order; absent orders first, ties stay stable.
use crate::panel::{Panel, PanelRegistration};

#[derive(Default)]
pub struct PanelRegistry {
    panels: Vec<Box<dyn Panel>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-constructed panels, applying the same
    /// ordering a rebuild would.
    pub fn from_panels(mut panels: Vec<Box<dyn Panel>>) -> Self {
        panels.sort_by_key(|panel| panel.sort_order());
        Self { panels }
    }

    /// Replace the whole sequence with one instance per table entry.
    ///
    /// An entry whose constructor fails is skipped with a warning; the
    /// rebuild itself never aborts. An empty or all-failing table leaves an
    /// empty registry.
    pub fn rebuild(&mut self, registrations: &[PanelRegistration]) {
        let mut panels = Vec::with_capacity(registrations.len());
        for registration in registrations {
            match (registration.build)() {
                Ok(panel) => panels.push(panel),
                Err(err) => {
                    tracing::warn!(
                        panel = registration.name,
                        "skipping panel that failed to construct: {err:#}"
                    );
                }
            }
        }

        *self = Self::from_panels(panels);
    }

    pub fn clear(&mut self) {
        self.panels.clear();
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Panel> {
        self.panels.get(index).map(|panel| panel.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Panel + 'static)> {
        self.panels.get_mut(index).map(|panel| panel.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Panel> {
        self.panels.iter().map(|panel| panel.as_ref())
    }

    /// Position of the panel whose key matches, ignoring ASCII case. The
    /// persisted last-active key is matched this way after a rebuild.
    pub fn position_by_key(&self, key: &str) -> Option<usize> {
        self.panels
            .iter()
            .position(|panel| panel.key().eq_ignore_ascii_case(key))
    }
}
