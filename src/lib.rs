//! Terminal browser for recipe categories with per-account favourites.
//!
//! - `api` - HTTP clients for the catalog, favourites and auth endpoints
//! - `favourites` - Reconciliation of favourite records against the catalog, tab filtering
//! - `command` - Re-runnable user commands and notifications
//! - `forms` - Login and signup input and validation
//! - `app` - View state machine
//! - `ui` - Terminal front end
//! - `config` - Config file and environment overrides

pub mod api;
pub mod app;
pub mod command;
pub mod config;
pub mod favourites;
pub mod forms;
pub mod model;
pub mod ui;
