//! TUI rendering for Taskdeck using ratatui.
//!
//! One screen: a form field on top, the task list below, a status bar at
//! the bottom. The form's block title doubles as the submit label, so it
//! reads "Add" until an edit is armed and "Update" after.

mod input;

pub use input::handle_events;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use taskdeck_core::{App, StatusKind, TaskStore};

const ACCENT_ADD: Color = Color::Green;
const ACCENT_EDIT: Color = Color::Yellow;

/// Main draw function.
pub fn draw<S: TaskStore>(frame: &mut Frame, app: &App<S>) {
    let [title_area, form_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_title(frame, title_area);
    draw_form(frame, app, form_area);
    draw_tasks(frame, app, list_area);
    draw_status_bar(frame, app, status_area);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(" Taskdeck ".bold()).centered();
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_form<S: TaskStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (label, accent) = if app.is_editing() {
        (" Update ", ACCENT_EDIT)
    } else {
        (" Add ", ACCENT_ADD)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            label,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(app.draft().text()).block(block), area);

    // Cursor position: width of the draft up to the char cursor, clamped
    // to the visible field.
    let prefix: String = app.draft().text().chars().take(app.draft().cursor()).collect();
    let x = inner.x + (prefix.width() as u16).min(inner.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(x, inner.y));
}

fn draw_tasks<S: TaskStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .tasks()
        .iter()
        .map(|task| {
            let mut spans = vec![Span::raw(task.name.as_str())];
            if app.editing() == Some(&task.id) {
                spans.push(Span::styled(
                    " (editing)",
                    Style::default().fg(ACCENT_EDIT).add_modifier(Modifier::DIM),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Tasks "),
        )
        .highlight_symbol("› ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(app.selected());
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar<S: TaskStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let line = match app.status() {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Error => Style::default().fg(Color::Red),
                StatusKind::Info => Style::default().fg(Color::Gray),
            };
            Line::from(Span::styled(status.text.as_str(), style))
        }
        None => Line::from(Span::styled(
            " Enter submit · ↑/↓ select · ^E edit · ^D delete · Esc cancel · ^C quit",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
