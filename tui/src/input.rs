//! Input handling for the Taskdeck TUI.
//!
//! Events are drained non-blocking each frame, with a cap so a burst can
//! never starve rendering. The form field is always focused: printable
//! characters go to the draft, everything else maps to a screen action.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use taskdeck_core::{App, TaskStore};

const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

/// Drain pending terminal events into the app. Returns `true` when the
/// user asked to quit.
pub fn handle_events<S: TaskStore>(app: &mut App<S>) -> Result<bool> {
    for _ in 0..MAX_EVENTS_PER_FRAME {
        if !event::poll(Duration::ZERO)? {
            break;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(app, &key) {
                    return Ok(true);
                }
            }
            Event::Paste(text) => app.insert_str(&text),
            _ => {}
        }
    }
    Ok(false)
}

fn handle_key<S: TaskStore>(app: &mut App<S>, key: &KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Char('e') if ctrl => app.begin_edit_selected(),
        KeyCode::Char('d') if ctrl => app.delete_selected(),
        KeyCode::Char('w') if ctrl => app.delete_word_backwards(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.submit(),
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Delete => app.delete_char_forward(),
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            app.enter_char(ch);
        }
        _ => {}
    }

    false
}
