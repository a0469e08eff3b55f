// About panel. Declares no sort order, so it lands first in the sidebar.
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    panel::{ContentScroll, Panel},
    ui::pane_border_style,
};

pub struct AboutPanel {
    focused: bool,
}

impl AboutPanel {
    pub fn new() -> Self {
        Self { focused: false }
    }
}

impl Default for AboutPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for AboutPanel {
    fn key(&self) -> &'static str {
        "about"
    }

    fn title(&self) -> &'static str {
        "About"
    }

    fn icon(&self) -> &'static str {
        ""
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_focus_lost(&mut self) {
        self.focused = false;
    }

    fn render_toolbar_left(&self, frame: &mut Frame, area: Rect) {
        let label = Paragraph::new(Line::styled(
            concat!("paneldock v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(label, area);
    }

    fn render_toolbar_right(&self, _frame: &mut Frame, _area: Rect) {}

    fn render_content(&self, frame: &mut Frame, area: Rect, scroll: &ContentScroll) {
        let lines = vec![
            Line::from(""),
            Line::from("PANELDOCK"),
            Line::from(""),
            Line::from("A terminal workbench hosting pluggable tool panels."),
            Line::from("Each sidebar icon is one registered panel; at most one"),
            Line::from("panel is active at a time."),
            Line::from(""),
            Line::from("Select a panel with its number key or by clicking its"),
            Line::from("icon. Selecting the active panel again deselects it."),
            Line::from("Ctrl+b widens the sidebar to show panel names."),
            Line::from(""),
            Line::from("Press ? for the full list of keybinds."),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border_style(self.focused, Color::LightGreen))
            .title("About");
        let inner = block.inner(area);
        let top = scroll.clamp_for_viewport(inner.height as usize, lines.len());

        let about = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .scroll((top.min(u16::MAX as usize) as u16, 0));

        frame.render_widget(about, area);
    }
}
