// Input routing for the host window.
// - Global chords are handled first; everything else goes to the active panel.
// - Mouse hits resolve against the click targets recorded during the last draw.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::App;

const KEYBINDS_PAGE_STEP: usize = 8;

enum ClickTarget {
    Panel(usize),
    SidebarToggle,
}

impl App {
    /// Handle one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => return true,
                KeyCode::Char('r') => {
                    self.request_rebuild();
                    return false;
                }
                KeyCode::Char('b') => {
                    self.toggle_sidebar();
                    return false;
                }
                KeyCode::Char('n') => {
                    self.select_next_panel();
                    return false;
                }
                KeyCode::Char('p') => {
                    self.select_previous_panel();
                    return false;
                }
                // Remaining control chords belong to the active panel.
                _ => {}
            }
        }

        if self.show_keybinds() {
            self.handle_keybinds_popup_key(key);
            return false;
        }

        match key.code {
            KeyCode::Char('q') if !key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('?') => self.toggle_keybinds(),
            KeyCode::Esc => {
                if let Some(active) = self.active_index() {
                    self.select_panel(active);
                }
            }
            KeyCode::PageDown => self.content_scroll().page_down(),
            KeyCode::PageUp => self.content_scroll().page_up(),
            KeyCode::Char(digit @ '1'..='9') if key.modifiers.is_empty() => {
                self.select_panel(digit as usize - '1' as usize);
            }
            _ => {
                if let Some(panel) = self.active_panel_mut() {
                    panel.on_key(key);
                }
            }
        }

        false
    }

    fn handle_keybinds_popup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => self.hide_keybinds(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_keybinds_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_keybinds_up(1),
            KeyCode::PageDown => self.scroll_keybinds_down(KEYBINDS_PAGE_STEP),
            KeyCode::PageUp => self.scroll_keybinds_up(KEYBINDS_PAGE_STEP),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.show_keybinds() {
                    self.hide_keybinds();
                    return;
                }
                match self.click_target_at(position) {
                    Some(ClickTarget::Panel(index)) => self.select_panel(index),
                    Some(ClickTarget::SidebarToggle) => self.toggle_sidebar(),
                    None => {}
                }
            }
            MouseEventKind::ScrollDown if self.position_in_content(position) => {
                self.content_scroll().scroll_down();
            }
            MouseEventKind::ScrollUp if self.position_in_content(position) => {
                self.content_scroll().scroll_up();
            }
            _ => {}
        }
    }

    fn click_target_at(&self, position: Position) -> Option<ClickTarget> {
        let layout = self.layout.borrow();

        if layout
            .sidebar_toggle
            .is_some_and(|rect| rect.contains(position))
        {
            return Some(ClickTarget::SidebarToggle);
        }

        layout
            .sidebar_rows
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|&(_, index)| ClickTarget::Panel(index))
    }

    fn position_in_content(&self, position: Position) -> bool {
        self.layout
            .borrow()
            .content
            .is_some_and(|rect| rect.contains(position))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::super::App;
    use crate::{prefs::ViewPrefs, registry::PanelRegistry};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn quit_keys_end_the_session() {
        let mut app = App::with_registry(PanelRegistry::new(), ViewPrefs::default());
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.handle_key(ctrl('c')));
    }

    #[test]
    fn sidebar_toggle_chord_flips_the_preference() {
        let mut app = App::with_registry(PanelRegistry::new(), ViewPrefs::default());
        assert!(!app.sidebar_expanded());
        assert!(!app.handle_key(ctrl('b')));
        assert!(app.sidebar_expanded());
    }

    #[test]
    fn digit_for_missing_panel_does_nothing() {
        let mut app = App::with_registry(PanelRegistry::new(), ViewPrefs::default());
        assert!(!app.handle_key(key(KeyCode::Char('3'))));
        assert_eq!(app.active_index(), None);
    }

    #[test]
    fn keybinds_popup_captures_keys_until_closed() {
        let mut app = App::with_registry(PanelRegistry::new(), ViewPrefs::default());
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_keybinds());

        // 'q' closes the popup instead of quitting.
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert!(!app.show_keybinds());
    }
}
