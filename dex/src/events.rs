//! Event handling for the widget TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, View};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// The user asked for an encounter right now.
    RequestEncounter,
}

/// Handle a terminal event.
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    if key.kind != KeyEventKind::Press {
        return EventResult::Continue;
    }

    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // Any key closes the help overlay
    if app.show_help {
        app.show_help = false;
        return EventResult::NeedsRedraw;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        KeyCode::Char('d') | KeyCode::Tab => {
            app.toggle_view();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('e') | KeyCode::Char(' ') => EventResult::RequestEncounter,
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.show_help = true;
            EventResult::NeedsRedraw
        }
        _ => match app.view {
            View::Dex => handle_dex_keys(app, key),
            View::Card => EventResult::Continue,
        },
    }
}

/// Grid navigation (vim keys and arrows).
fn handle_dex_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            app.move_selection(-1, 0);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.move_selection(1, 0);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(0, 1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(0, -1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.select(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select(u32::MAX);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_core::{DexConfig, DexSession, ObjectCache};
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let config = DexConfig::new().with_cache_root(dir.path()).with_max_id(25);
        let cache = Arc::new(ObjectCache::new(&config.cache_root));
        let session = DexSession::open(config, cache).await.unwrap();
        (dir, App::new(session))
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn q_quits_and_e_requests_an_encounter() {
        let (_dir, mut app) = app().await;
        assert_eq!(handle_event(&mut app, press(KeyCode::Char('q'))), EventResult::Quit);
        assert_eq!(
            handle_event(&mut app, press(KeyCode::Char('e'))),
            EventResult::RequestEncounter
        );
    }

    #[tokio::test]
    async fn d_toggles_and_navigation_only_works_in_dex_view() {
        let (_dir, mut app) = app().await;

        // Card view ignores navigation
        assert_eq!(
            handle_event(&mut app, press(KeyCode::Char('j'))),
            EventResult::Continue
        );

        handle_event(&mut app, press(KeyCode::Char('d')));
        assert_eq!(app.view, View::Dex);

        handle_event(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.selected_id, 6);
    }

    #[tokio::test]
    async fn any_key_dismisses_help() {
        let (_dir, mut app) = app().await;
        handle_event(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_event(&mut app, press(KeyCode::Char('j')));
        assert!(!app.show_help);
    }
}
