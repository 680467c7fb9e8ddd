//! ratatui rendering for the patchbay
//!
//! Classic patchbay geometry: output ports and input ports side by side
//! on the top half, connections across the bottom half, one status line.
//! All list content arrives from the app pre-truncated; this module only
//! places and colors it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, StatusLevel};
use crate::panes::PaneId;
use crate::server::GraphServer;

/// Key bindings shown by the help overlay.
const HELP_KEYS: &[(&str, &str)] = &[
    ("a", "manage audio"),
    ("m", "manage MIDI"),
    ("TAB / SHIFT+j", "select next window"),
    ("SHIFT+TAB / K", "select previous window"),
    ("SPACE", "select connections window"),
    ("LEFT / h", "select output ports window"),
    ("RIGHT / l", "select input ports window"),
    ("UP / k", "select previous item on list"),
    ("DOWN / j", "select next item on list"),
    ("HOME", "select first item on list"),
    ("END", "select last item on list"),
    ("c / ENTER", "connect"),
    ("d / BACKSPACE", "disconnect"),
    ("SHIFT+d", "disconnect all"),
    ("r", "refresh"),
    ("q", "quit"),
    ("SHIFT+h / ?", "this help screen"),
];

/// Draw one full frame.
pub fn draw<S: GraphServer>(f: &mut Frame, app: &App<S>) {
    let regions = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // port panes
            Constraint::Min(3),         // connections pane
            Constraint::Length(1),      // status line
        ])
        .split(f.size());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(regions[0]);

    draw_pane(f, app, PaneId::OutputPorts, top[0]);
    draw_pane(f, app, PaneId::InputPorts, top[1]);
    draw_pane(f, app, PaneId::Connections, regions[1]);
    draw_status(f, app, regions[2]);

    if app.help_visible() {
        draw_help(f);
    }
}

fn draw_pane<S: GraphServer>(f: &mut Frame, app: &App<S>, pane: PaneId, area: Rect) {
    let focused = app.focus() == pane;

    let title = if focused {
        format!("=[{}]=", app.pane_title(pane))
    } else {
        format!(" [{}] ", app.pane_title(pane))
    };
    let title_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::styled(title, title_style));

    let inner_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .pane_lines(pane, inner_width)
        .into_iter()
        .map(ListItem::new)
        .collect();

    let highlight = if focused {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::Black).bg(Color::White)
    };

    let list = List::new(items).block(block).highlight_style(highlight);

    let mut state = ListState::default();
    state.select(app.pane_cursor(pane));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status<S: GraphServer>(f: &mut Frame, app: &App<S>, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(area);

    let status = app.status();
    let style = match status.level {
        StatusLevel::Info => Style::default().fg(Color::Yellow),
        StatusLevel::Error => Style::default().fg(Color::Black).bg(Color::Red),
    };
    f.render_widget(
        Paragraph::new(format!(" {}", status.text)).style(style),
        parts[0],
    );

    let tail = format!(
        "DSP:{:5.2}{}",
        app.dsp_load(),
        if app.is_realtime() { "@RT" } else { "!RT" }
    );
    f.render_widget(
        Paragraph::new(tail).style(Style::default().fg(Color::Blue)),
        parts[1],
    );
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(f.size(), 52, HELP_KEYS.len() as u16 + 4);

    let mut lines = vec![Line::styled(
        "portwire - JACK patchbay",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    lines.push(Line::raw(""));
    for (keys, action) in HELP_KEYS {
        lines.push(Line::raw(format!("  {keys:>15} - {action}")));
    }

    let help = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered_rect(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}
