//! Helper functions for UI operations.
//!
//! Spawns the background fetches and commands, and hosts small text utilities
//! shared by the widgets.

use crate::app::{App, AppEvent, View};
use crate::command::Command;
use futures::FutureExt;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use url::Url;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panic inside a spawned task would otherwise vanish with the task; here it
/// becomes `Err(message)` that the caller reports as `AppEvent::TaskPanicked`.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

/// Switch views and start whatever fetches the new view needs.
///
/// Catalog and favourites are fetched concurrently; neither waits for the other.
pub(super) fn activate_view(app: &mut App, view: View, event_tx: &mpsc::Sender<AppEvent>) {
    let plan = app.activate(view);

    if plan.catalog {
        let client = app.api.catalog.clone();
        let tx = event_tx.clone();
        let generation = plan.generation;
        tokio::spawn(async move {
            let event = match catch_task_panic(client.fetch_categories()).await {
                Ok(result) => AppEvent::CatalogLoaded { generation, result },
                Err(error) => AppEvent::TaskPanicked {
                    task: "catalog",
                    error,
                },
            };
            if tx.send(event).await.is_err() {
                tracing::debug!("Catalog result dropped (receiver closed)");
            }
        });
    }

    if plan.favourites {
        let client = app.api.favourites.clone();
        let tx = event_tx.clone();
        let generation = plan.generation;
        tokio::spawn(async move {
            let event = match catch_task_panic(client.list()).await {
                Ok(result) => AppEvent::FavouritesLoaded { generation, result },
                Err(error) => AppEvent::TaskPanicked {
                    task: "favourites",
                    error,
                },
            };
            if tx.send(event).await.is_err() {
                tracing::debug!("Favourites result dropped (receiver closed)");
            }
        });
    }
}

/// Run a command in the background and report back with `CommandFinished`.
pub(super) fn spawn_command(app: &App, command: Command, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let tx = event_tx.clone();
    let task = command.name();
    tracing::debug!(command = task, "Spawning command");

    tokio::spawn(async move {
        let outcome = catch_task_panic(command.execute(&api)).await;
        let event = match outcome {
            Ok(result) => AppEvent::CommandFinished { command, result },
            Err(error) => AppEvent::TaskPanicked { task, error },
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send command result (receiver dropped)");
        }
    });
}

/// Check a URL before handing it to the system opener.
///
/// Only absolute `http`/`https` URLs pass, so nothing else reaches a shell handler.
pub(super) fn validate_url_for_open(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("Invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err("URL has no host".to_string()),
        other => Err(format!("Refusing to open '{}' URL", other)),
    }
}

/// Truncate `s` to at most `max_width` terminal columns, ending in "..." when cut.
pub(super) fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if UnicodeWidthStr::width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    const ELLIPSIS: &str = "...";
    let budget = max_width.saturating_sub(ELLIPSIS.len());

    let mut out = String::with_capacity(max_width);
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width >= ELLIPSIS.len() {
        out.push_str(ELLIPSIS);
    }
    Cow::Owned(out)
}
