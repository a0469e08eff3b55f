// File-browser panel.
// - Reads and sorts directory entries, directories first.
// - Handles selection movement and directory navigation while active.
// - Keeps the selected row centered in the visible window.
use std::{
    cell::Cell,
    env, fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    panel::{ContentScroll, Panel},
    ui::pane_border_style,
};

const PAGE_STEP: usize = 8;

#[derive(Debug, Clone)]
struct FileEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
    size_bytes: Option<u64>,
}

pub struct FilesPanel {
    cwd: PathBuf,
    initial_dir: PathBuf,
    entries: Vec<FileEntry>,
    selected: usize,
    focused: bool,
    visible_rows: Cell<usize>,
}

impl FilesPanel {
    pub fn new() -> Result<Self> {
        let cwd = env::current_dir().context("resolving the working directory")?;
        let entries = read_entries(&cwd)
            .with_context(|| format!("listing start directory {}", cwd.display()))?;

        Ok(Self {
            cwd: cwd.clone(),
            initial_dir: cwd,
            entries,
            selected: 0,
            focused: false,
            visible_rows: Cell::new(0),
        })
    }

    fn next(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn page_down(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else {
            self.selected = (self.selected + self.page_step()).min(self.entries.len() - 1);
        }
    }

    fn page_up(&mut self) {
        let step = self.page_step();
        self.selected = self.selected.saturating_sub(step);
    }

    // Page by the row count measured during the last draw.
    fn page_step(&self) -> usize {
        let rows = self.visible_rows.get();
        if rows > 1 { rows - 1 } else { PAGE_STEP }
    }

    fn reload(&mut self) {
        match read_entries(&self.cwd) {
            Ok(entries) => {
                self.entries = entries;
                if !self.entries.is_empty() && self.selected >= self.entries.len() {
                    self.selected = self.entries.len() - 1;
                }
            }
            Err(err) => {
                tracing::warn!("failed to refresh {}: {err}", self.cwd.display());
            }
        }
    }

    fn change_dir(&mut self, new_cwd: PathBuf) {
        match read_entries(&new_cwd) {
            Ok(entries) => {
                self.cwd = new_cwd;
                self.entries = entries;
                self.selected = 0;
            }
            Err(err) => {
                tracing::warn!("failed to open {}: {err}", new_cwd.display());
            }
        }
    }

    fn enter_selected(&mut self) {
        let Some(path) = self
            .selected_entry()
            .and_then(|entry| entry.is_dir.then(|| entry.path.clone()))
        else {
            return;
        };
        self.change_dir(path);
    }

    fn go_parent(&mut self) {
        let Some(parent) = self.cwd.parent() else {
            return;
        };
        self.change_dir(parent.to_path_buf());
    }

    fn go_initial(&mut self) {
        self.change_dir(self.initial_dir.clone());
    }

    fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }
}

impl Panel for FilesPanel {
    fn key(&self) -> &'static str {
        "files"
    }

    fn title(&self) -> &'static str {
        "Files"
    }

    fn icon(&self) -> &'static str {
        ""
    }

    fn sort_order(&self) -> Option<i32> {
        Some(0)
    }

    fn on_focus(&mut self) {
        self.focused = true;
        // Pick up filesystem changes made while the panel was inactive.
        self.reload();
    }

    fn on_focus_lost(&mut self) {
        self.focused = false;
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('d') => self.page_down(),
                KeyCode::Char('u') => self.page_up(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.enter_selected(),
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Char('-') => {
                self.go_parent()
            }
            KeyCode::Char('_') => self.go_initial(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    fn render_toolbar_left(&self, frame: &mut Frame, area: Rect) {
        let path = truncate_to_width(&self.cwd.display().to_string(), area.width as usize);
        let crumb = Paragraph::new(Line::styled(path, Style::default().fg(Color::Gray)));
        frame.render_widget(crumb, area);
    }

    fn render_toolbar_right(&self, frame: &mut Frame, area: Rect) {
        let count = Paragraph::new(Line::styled(
            format!("{} entries ", self.entries.len()),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right);
        frame.render_widget(count, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect, _scroll: &ContentScroll) {
        // The list keeps its own selection-centered viewport; the shared
        // scroll offset is for line-oriented panes.
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border_style(self.focused, Color::LightBlue))
            .title("Files");
        let inner = block.inner(area);
        self.visible_rows.set(inner.height as usize);

        // Account for the highlight symbol so rows stay aligned.
        let content_width = inner.width.saturating_sub(2) as usize;
        let items = self
            .entries
            .iter()
            .map(|entry| ListItem::new(format_row(entry, content_width)))
            .collect::<Vec<_>>();

        let mut list_state = ListState::default();
        if !self.entries.is_empty() {
            let visible = inner.height as usize;
            let selected = self.selected.min(self.entries.len() - 1);
            let centered_offset = if visible == 0 {
                0
            } else {
                let max_offset = self.entries.len().saturating_sub(visible);
                selected.saturating_sub(visible / 2).min(max_offset)
            };
            list_state = list_state
                .with_offset(centered_offset)
                .with_selected(Some(selected));
        }

        let list = List::new(items)
            .block(block)
            .highlight_symbol("> ")
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

fn read_entries(dir: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            let size_bytes = if is_dir {
                None
            } else {
                entry.metadata().ok().map(|meta| meta.len())
            };

            FileEntry {
                name,
                path,
                is_dir,
                size_bytes,
            }
        })
        .collect::<Vec<_>>();

    entries.sort_by_key(|entry| (!entry.is_dir, entry.name.to_ascii_lowercase()));
    Ok(entries)
}

fn format_row(entry: &FileEntry, content_width: usize) -> String {
    let name = if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };
    let size = size_label(entry);

    let name_width = content_width.saturating_sub(size.width() + 1);
    let name = truncate_to_width(&name, name_width);
    let padding = content_width
        .saturating_sub(name.width() + size.width())
        .max(1);

    format!("{name}{}{size}", " ".repeat(padding))
}

fn size_label(entry: &FileEntry) -> String {
    if entry.is_dir {
        "<DIR>".to_string()
    } else if let Some(bytes) = entry.size_bytes {
        format_size(bytes)
    } else {
        "?".to_string()
    }
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let bytes_f = bytes as f64;

    if bytes_f >= GB {
        format!("{:.1}G", bytes_f / GB)
    } else if bytes_f >= MB {
        format!("{:.1}M", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1}K", bytes_f / KB)
    } else {
        format!("{bytes}B")
    }
}

fn truncate_to_width(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in value.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if ch_width > 0 && width + ch_width + 1 > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::{format_size, read_entries, truncate_to_width};

    #[test]
    fn entries_sort_directories_first_then_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("beta.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("zeta")).unwrap();
        std::fs::write(dir.path().join("Alpha.txt"), "x").unwrap();

        let names = read_entries(dir.path())
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect::<Vec<_>>();

        assert_eq!(names, ["zeta", "Alpha.txt", "beta.txt"]);
    }

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2048), "2.0K");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0M");
    }

    #[test]
    fn truncation_marks_cut_names() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a-very-long-file-name.txt", 10);
        assert!(cut.ends_with('…'));
        assert!(unicode_width::UnicodeWidthStr::width(cut.as_str()) <= 10);
    }
}
