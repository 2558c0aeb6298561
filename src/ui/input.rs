//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on current view and overlay.

use crate::app::{App, AppEvent, View};
use crate::command::{Command, Notification};
use crate::forms::FormInput;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{activate_view, spawn_command, validate_url_for_open};
use super::Action;

/// Main input dispatch function.
///
/// Routes input to the help overlay first, then to the browse or form handler.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // Help overlay captures all keys when visible
    if app.show_help {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return Action::Continue;
    }

    match app.view {
        View::Home | View::Favourites => handle_browse_input(app, code, event_tx),
        View::Login | View::Signup => handle_form_input(app, code, modifiers, event_tx),
    }
}

/// Handle input in the Home and Favourites views.
fn handle_browse_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => {
            // Detail overlay first, then the notification
            if app.show_detail {
                app.show_detail = false;
            } else {
                app.notification = None;
            }
        }
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => app.next_tab(),
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => app.prev_tab(),
        KeyCode::Enter => {
            app.show_detail = !app.show_detail && app.selected_category().is_some();
        }
        KeyCode::Char('f') => match app.favourite_selected() {
            Some(command) => spawn_command(app, command, event_tx),
            None => {
                app.notification =
                    Some(Notification::info("Nothing selected", "Pick a category first"));
            }
        },
        KeyCode::Char('1') => activate_view(app, View::Home, event_tx),
        KeyCode::Char('2') => activate_view(app, View::Favourites, event_tx),
        KeyCode::Char('3') => activate_view(app, View::Login, event_tx),
        KeyCode::Char('u') => {
            let view = app.view;
            activate_view(app, view, event_tx);
        }
        KeyCode::Char('r') => retry(app, event_tx),
        KeyCode::Char('L') => spawn_command(app, Command::Logout, event_tx),
        KeyCode::Char('o') => open_selected_thumbnail(app),
        _ => {}
    }
    Action::Continue
}

/// Handle input in the Login and Signup forms.
///
/// Printable keys are typed into the focused field, so commands use
/// function keys and Ctrl chords here.
fn handle_form_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) {
        if code == KeyCode::Char('r') {
            retry(app, event_tx);
        }
        return Action::Continue;
    }

    match code {
        KeyCode::Esc => {
            if app.notification.is_some() {
                app.notification = None;
            } else {
                activate_view(app, View::Home, event_tx);
            }
        }
        KeyCode::F(1) => app.show_help = true,
        KeyCode::F(2) => {
            let other = if app.view == View::Login {
                View::Signup
            } else {
                View::Login
            };
            activate_view(app, other, event_tx);
        }
        KeyCode::Tab | KeyCode::Down => focused_form(app).focus_next(),
        KeyCode::BackTab | KeyCode::Up => focused_form(app).focus_prev(),
        KeyCode::Backspace => focused_form(app).backspace(),
        KeyCode::Char(c) => focused_form(app).push_char(c),
        KeyCode::Enter => {
            let command = if app.view == View::Login {
                app.submit_login()
            } else {
                app.submit_signup()
            };
            match command {
                Some(command) => spawn_command(app, command, event_tx),
                None => tracing::debug!(view = ?app.view, "Form has validation errors"),
            }
        }
        _ => {}
    }
    Action::Continue
}

fn focused_form(app: &mut App) -> &mut FormInput {
    if app.view == View::Signup {
        &mut app.signup_input
    } else {
        &mut app.login_input
    }
}

/// Re-run the command behind a failure notification.
fn retry(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    match app.take_retry() {
        Some(command) => {
            tracing::info!(command = command.name(), "Retrying command");
            spawn_command(app, command, event_tx);
        }
        None => tracing::debug!("Nothing to retry"),
    }
}

fn open_selected_thumbnail(app: &mut App) {
    let Some(category) = app.selected_category() else {
        return;
    };
    if category.thumbnail_url.is_empty() {
        app.notification = Some(Notification::info("No image", "This category has no thumbnail"));
        return;
    }
    // Validate before open::that() so only web URLs reach the system opener
    match validate_url_for_open(&category.thumbnail_url) {
        Err(e) => app.notification = Some(Notification::info("Cannot open image", e)),
        Ok(url) => {
            if let Err(e) = open::that(url.as_str()) {
                tracing::warn!(error = %e, "Failed to open browser");
                app.notification = Some(Notification::info(
                    "Failed to open browser",
                    e.to_string(),
                ));
            }
        }
    }
}
