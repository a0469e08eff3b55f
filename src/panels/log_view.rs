// Log-viewer panel.
// - Tails the newest file in the host's rolling log directory.
// - Reloads on focus-gained, so opening the panel shows current output.
// - Scrolls through the shared content offset; keeps a bounded line buffer.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    config_paths,
    panel::{ContentScroll, Panel},
    ui::pane_border_style,
};

const LOG_FILE_PREFIX: &str = "paneldock.log";
const MAX_LINES: usize = 2_000;

pub struct LogPanel {
    logs_dir: PathBuf,
    source: Option<PathBuf>,
    lines: Vec<String>,
    focused: bool,
}

impl LogPanel {
    pub fn new() -> Result<Self> {
        let logs_dir =
            config_paths::logs_dir().ok_or_else(|| anyhow!("no config directory available"))?;

        let mut panel = Self {
            logs_dir,
            source: None,
            lines: Vec::new(),
            focused: false,
        };
        panel.reload();
        Ok(panel)
    }

    fn reload(&mut self) {
        self.source = newest_log_file(&self.logs_dir);
        self.lines = match &self.source {
            Some(path) => match fs::read_to_string(path) {
                Ok(text) => {
                    let mut lines = text.lines().map(str::to_string).collect::<Vec<_>>();
                    if lines.len() > MAX_LINES {
                        let overflow = lines.len() - MAX_LINES;
                        lines.drain(0..overflow);
                    }
                    lines
                }
                Err(err) => {
                    tracing::warn!("failed to read {}: {err}", path.display());
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
    }

    fn source_label(&self) -> String {
        self.source
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "no log file yet".to_string())
    }
}

impl Panel for LogPanel {
    fn key(&self) -> &'static str {
        "log"
    }

    fn title(&self) -> &'static str {
        "Log"
    }

    fn icon(&self) -> &'static str {
        ""
    }

    fn sort_order(&self) -> Option<i32> {
        Some(10)
    }

    fn on_focus(&mut self) {
        self.focused = true;
        self.reload();
    }

    fn on_focus_lost(&mut self) {
        self.focused = false;
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('r') {
            self.reload();
        }
    }

    fn render_toolbar_left(&self, frame: &mut Frame, area: Rect) {
        let label = Paragraph::new(Line::styled(
            self.source_label(),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(label, area);
    }

    fn render_toolbar_right(&self, frame: &mut Frame, area: Rect) {
        let count = Paragraph::new(Line::styled(
            format!("{} lines ", self.lines.len()),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right);
        frame.render_widget(count, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect, scroll: &ContentScroll) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border_style(self.focused, Color::LightYellow))
            .title("Log");
        let inner = block.inner(area);

        if self.lines.is_empty() {
            let empty = Paragraph::new(Line::styled(
                "No log output yet. Press r to reload.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let top = scroll.clamp_for_viewport(inner.height as usize, self.lines.len());
        let body = self
            .lines
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect::<Vec<_>>();
        let paragraph = Paragraph::new(body)
            .block(block)
            .scroll((top.min(u16::MAX as usize) as u16, 0));

        frame.render_widget(paragraph, area);
    }
}

// Daily rotation suffixes the file name with the date, so the
// lexicographically greatest name is the current file.
fn newest_log_file(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with(LOG_FILE_PREFIX)
        })
        .max_by_key(|entry| entry.file_name())
        .map(|entry| entry.path())
}

#[cfg(test)]
mod tests {
    use super::newest_log_file;

    #[test]
    fn picks_the_latest_rotation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("paneldock.log.2026-08-04"), "old").unwrap();
        std::fs::write(dir.path().join("paneldock.log.2026-08-05"), "new").unwrap();
        std::fs::write(dir.path().join("unrelated.txt"), "x").unwrap();

        let newest = newest_log_file(dir.path()).unwrap();
        assert!(newest.to_string_lossy().ends_with("2026-08-05"));
    }

    #[test]
    fn empty_directory_has_no_log_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(newest_log_file(dir.path()), None);
    }
}
