//! Application event handling.
//!
//! This module processes background task completion events: catalog and
//! favourites fetches, and finished commands.

use crate::app::{App, AppEvent};
use crate::command::Notification;
use tokio::sync::mpsc;

use super::helpers::activate_view;

/// Handle application events from background tasks.
///
/// Results are folded into `App`; a result that asks for another view
/// (expired session, login, logout) activates it here.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    let redirect = match event {
        AppEvent::CatalogLoaded { generation, result } => {
            app.apply_catalog(generation, result);
            None
        }
        AppEvent::FavouritesLoaded { generation, result } => {
            app.apply_favourites(generation, result)
        }
        AppEvent::CommandFinished { command, result } => app.apply_command(command, result),
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            app.notification = Some(Notification::info(
                "Internal error",
                format!("The {} task stopped unexpectedly", task),
            ));
            None
        }
    };

    if let Some(view) = redirect {
        activate_view(app, view, event_tx);
    }
    app.needs_redraw = true;
}
