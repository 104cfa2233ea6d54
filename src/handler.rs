use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, FocusPane};
use crate::contact::{self, ContactField};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Overlays capture the keyboard while open.
    if app.contact.open {
        handle_contact_key(app, key);
    } else if app.chat.open {
        handle_chat_key(app, key);
    } else {
        handle_browse_key(app, key);
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Overlay toggles
        KeyCode::Char('a') => app.chat.toggle(),
        KeyCode::Char('m') => app.contact.open(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focus == FocusPane::Navigation {
                app.nav_down();
            } else {
                app.scroll_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focus == FocusPane::Navigation {
                app.nav_up();
            } else {
                app.scroll_up();
            }
        }
        KeyCode::Char('g') => {
            if app.focus == FocusPane::Navigation {
                app.nav_first();
            } else {
                app.content_scroll = 0;
            }
        }
        KeyCode::Char('G') => {
            if app.focus == FocusPane::Navigation {
                app.nav_last();
            } else {
                app.content_scroll =
                    app.total_content_lines.saturating_sub(app.content_height);
            }
        }

        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            app.focus = FocusPane::Content;
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => {
            app.focus = FocusPane::Navigation;
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                FocusPane::Navigation => FocusPane::Content,
                FocusPane::Content => FocusPane::Navigation,
            };
        }

        // Half-page scroll
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }

        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Closing the widget never cancels an in-flight dispatch; the
        // reply lands in the conversation whenever it resolves.
        KeyCode::Esc => app.chat.close(),

        KeyCode::Enter => app.submit_chat(),

        // Transcript scrolling
        KeyCode::Up => app.chat_scroll = app.chat_scroll.saturating_sub(1),
        KeyCode::Down => app.chat_scroll = app.chat_scroll.saturating_add(1),

        // Input editing
        KeyCode::Backspace => {
            if app.chat.cursor > 0 {
                app.chat.cursor -= 1;
                let byte_pos = char_to_byte_index(&app.chat.input, app.chat.cursor);
                app.chat.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.chat.input.chars().count();
            if app.chat.cursor < char_count {
                let byte_pos = char_to_byte_index(&app.chat.input, app.chat.cursor);
                app.chat.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.chat.cursor = app.chat.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.chat.input.chars().count();
            app.chat.cursor = (app.chat.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.chat.cursor = 0;
        }
        KeyCode::End => {
            app.chat.cursor = app.chat.input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.chat.input, app.chat.cursor);
            app.chat.input.insert(byte_pos, c);
            app.chat.cursor += 1;
        }
        _ => {}
    }
}

fn handle_contact_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.contact.close(),

        KeyCode::Tab | KeyCode::Down => app.contact.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.contact.prev_field(),

        // Enter advances through name/subject; in the message body it
        // starts a new line. Ctrl-S sends.
        KeyCode::Enter => {
            if app.contact.field == ContactField::Message {
                app.contact.message.push('\n');
            } else {
                app.contact.next_field();
            }
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let email = app.profile.email.clone();
            let first_name = app.profile.first_name().to_string();
            if let Some(uri) = app.contact.submit(&email, &first_name) {
                contact::open_mail_client(&uri);
                app.contact.close();
            }
        }

        KeyCode::Backspace => {
            app.contact.active_text_mut().pop();
        }
        KeyCode::Char(c) => {
            app.contact.active_text_mut().push(c);
        }
        _ => {}
    }
}
