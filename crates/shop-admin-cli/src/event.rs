use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shop_admin_client::AdminApi;
use shop_admin_core::SessionStore;
use std::time::Duration;

use crate::app::{App, Screen, Tab};

/// Poll for terminal events with timeout
pub fn poll_event(timeout_ms: u64) -> anyhow::Result<Option<Event>> {
    if event::poll(Duration::from_millis(timeout_ms))? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub async fn handle_event<A: AdminApi, S: SessionStore>(app: &mut App<A, S>, event: Event) {
    match event {
        Event::Key(key) => {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                return;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.should_quit = true;
                return;
            }
            handle_key(app, key).await;
        }
        Event::Paste(text) => handle_paste(app, &text),
        _ => {}
    }
}

async fn handle_key<A: AdminApi, S: SessionStore>(app: &mut App<A, S>, key: KeyEvent) {
    match &app.screen {
        Screen::SignIn => handle_sign_in(app, key.code),
        Screen::Dashboard => match app.tab {
            Tab::Users | Tab::Products => handle_table(app, key.code).await,
            Tab::NewProduct => handle_form(app, key.code).await,
        },
        Screen::ConfirmLogout => handle_confirm_logout(app, key.code),
        Screen::Message(_, _) => {
            // Any key dismisses the message
            app.dismiss_message();
        }
    }
}

fn handle_paste<A: AdminApi, S: SessionStore>(app: &mut App<A, S>, text: &str) {
    let text = text.trim_end_matches(['\r', '\n']);
    match app.screen {
        Screen::SignIn => app.token_input.push_str(text),
        Screen::Dashboard if app.tab == Tab::NewProduct => app.push_str(text),
        _ => {}
    }
}

fn handle_sign_in<A: AdminApi, S: SessionStore>(app: &mut App<A, S>, code: KeyCode) {
    match code {
        KeyCode::Char(c) => app.token_input.push(c),
        KeyCode::Backspace => {
            app.token_input.pop();
        }
        KeyCode::Enter => app.sign_in(),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

async fn handle_table<A: AdminApi, S: SessionStore>(app: &mut App<A, S>, code: KeyCode) {
    match code {
        KeyCode::Tab => app.select_tab(app.tab.next()),
        KeyCode::BackTab => app.select_tab(app.tab.previous()),
        KeyCode::Char('1') => app.select_tab(Tab::Users),
        KeyCode::Char('2') => app.select_tab(Tab::Products),
        KeyCode::Char('3') => app.select_tab(Tab::NewProduct),
        KeyCode::Up | KeyCode::Char('k') => app.up(),
        KeyCode::Down | KeyCode::Char('j') => app.down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected().await,
        KeyCode::Char('r') => app.refresh().await,
        KeyCode::Char('L') => app.screen = Screen::ConfirmLogout,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

// Printable keys are text here, so only non-character keys navigate.
async fn handle_form<A: AdminApi, S: SessionStore>(app: &mut App<A, S>, code: KeyCode) {
    match code {
        KeyCode::Tab => app.select_tab(app.tab.next()),
        KeyCode::BackTab => app.select_tab(app.tab.previous()),
        KeyCode::Up => app.up(),
        KeyCode::Down => app.down(),
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Enter => app.submit().await,
        KeyCode::Esc => app.select_tab(Tab::Users),
        _ => {}
    }
}

fn handle_confirm_logout<A: AdminApi, S: SessionStore>(app: &mut App<A, S>, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.logout(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.screen = Screen::Dashboard,
        _ => {}
    }
}
