// Root UI composition for the host window.
// - Builds the global layout: sidebar, toolbar row, content area, footer.
// - Records sidebar icons and the expand toggle as click targets.
// - Delegates toolbar and content rendering to the active panel.
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, LayoutHits};

const SIDEBAR_WIDTH_COLLAPSED: u16 = 6;
const SIDEBAR_WIDTH_EXPANDED: u16 = 22;

pub fn render(frame: &mut Frame, app: &App) {
    let [content_area, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let sidebar_width = if app.sidebar_expanded() {
        SIDEBAR_WIDTH_EXPANDED
    } else {
        SIDEBAR_WIDTH_COLLAPSED
    };
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .areas(content_area);
    let [toolbar, panel_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(main);

    let mut hits = LayoutHits::default();
    render_sidebar(frame, app, sidebar, &mut hits);
    render_toolbar(frame, app, toolbar);
    render_content(frame, app, panel_area, &mut hits);
    render_footer_hint(frame, footer);

    if app.show_keybinds() {
        render_keybinds_popup(frame, app);
    }

    app.record_layout(hits);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect, hits: &mut LayoutHits) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let expanded = app.sidebar_expanded();
    // Bottom row is reserved for the expand toggle.
    let icon_rows = inner.height.saturating_sub(1);

    for (index, panel) in app.registry().iter().enumerate() {
        if index as u16 >= icon_rows {
            break;
        }

        let row = Rect {
            x: inner.x,
            y: inner.y + index as u16,
            width: inner.width,
            height: 1,
        };
        let label = if expanded {
            format!(" {} {}", panel.icon(), panel.title())
        } else {
            format!(" {}", panel.icon())
        };
        let style = if app.active_index() == Some(index) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        frame.render_widget(Paragraph::new(label).style(style), row);
        hits.sidebar_rows.push((row, index));
    }

    let toggle_row = Rect {
        x: inner.x,
        y: inner.y + inner.height - 1,
        width: inner.width,
        height: 1,
    };
    let (symbol, alignment) = if expanded {
        ("< ", Alignment::Right)
    } else {
        (">", Alignment::Center)
    };
    frame.render_widget(
        Paragraph::new(symbol)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(alignment),
        toggle_row,
    );
    hits.sidebar_toggle = Some(toggle_row);
}

fn render_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    if let Some(panel) = app.active_panel() {
        panel.render_toolbar_left(frame, left);
        panel.render_toolbar_right(frame, right);
    }
}

fn render_content(frame: &mut Frame, app: &App, area: Rect, hits: &mut LayoutHits) {
    hits.content = Some(area);

    match app.active_panel() {
        Some(panel) => panel.render_content(frame, area, app.content_scroll()),
        None => {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from("No panel selected"),
                Line::from("Pick one from the sidebar, or press 1-9."),
            ])
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(placeholder, area);
        }
    }
}

fn render_footer_hint(frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new(Line::styled(
        "Press ? to see keyboard shortcuts",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Left);
    frame.render_widget(hint, area);
}

fn render_keybinds_popup(frame: &mut Frame, app: &App) {
    let outer = frame.area();
    let [vertical] = Layout::vertical([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(outer);
    let [popup] = Layout::horizontal([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(vertical);

    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Press ? or Esc to close this window."),
        Line::from(""),
        keybind_section("GLOBAL"),
        keybind_row("?", "toggle this popup"),
        keybind_row("q / Ctrl+c", "quit"),
        keybind_row("1-9", "select panel (again to deselect)"),
        keybind_row("Esc", "deselect active panel"),
        keybind_row("Ctrl+n / Ctrl+p", "next / previous panel"),
        keybind_row("Ctrl+b", "expand or collapse the sidebar"),
        keybind_row("Ctrl+r", "rescan registered panels"),
        keybind_row("PgUp/PgDn or wheel", "scroll panel content"),
        Line::from(""),
        keybind_section("FILES PANEL"),
        keybind_row("j/k or Up/Down", "move selection"),
        keybind_row("Enter / l", "open directory"),
        keybind_row("h / - / Backspace", "parent directory"),
        keybind_row("_", "back to the start directory"),
        keybind_row("Ctrl+u / Ctrl+d", "page selection"),
        keybind_row("r", "refresh listing"),
        Line::from(""),
        keybind_section("LOG PANEL"),
        keybind_row("r", "reload the log file"),
    ];

    let block = Block::default().borders(Borders::ALL).title("Keybinds");
    let inner = block.inner(popup);
    let visible_line_count = inner.height.max(1) as usize;
    let max_scroll_top = lines.len().saturating_sub(visible_line_count);
    let scroll_top = app.clamp_keybinds_scroll(max_scroll_top);
    let popup_widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .scroll((scroll_top.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(popup_widget, popup);
}

fn keybind_section(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn keybind_row(keys: &str, action: &str) -> Line<'static> {
    const KEY_COL_WIDTH: usize = 22;
    let keys_padded = format!("{keys:<KEY_COL_WIDTH$}");
    Line::from(vec![
        Span::styled(
            keys_padded,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(action.to_string()),
    ])
}

pub(crate) fn pane_border_style(is_focused: bool, focused_color: Color) -> Style {
    if is_focused {
        Style::default()
            .fg(focused_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
