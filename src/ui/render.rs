//! Render functions for the TUI.
//!
//! This module handles all rendering logic, dispatching to the appropriate
//! view based on application state.

use crate::app::{App, View};
use crate::favourites::TABS;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::{categories, detail, help, login, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Main render dispatch function.
///
/// Routes to the appropriate view renderer based on current application state.
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    match app.view {
        View::Home | View::Favourites => render_browse(f, app, chunks[1]),
        View::Login | View::Signup => login::render(f, app, chunks[1]),
    }
    status::render(f, app, chunks[2]);

    if app.show_detail {
        if let Some(category) = app.selected_category() {
            detail::render(f, app, &category);
        }
    }

    if app.show_help {
        help::render(f, app);
    }

    if app.notification.is_some() {
        status::render_notification(f, app);
    }
}

/// Navigation line: one entry per view, the active one highlighted.
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let entries = [
        ("1", "Home", View::Home),
        ("2", "Favourites", View::Favourites),
        ("3", "Account", View::Login),
    ];

    let mut spans = vec![Span::styled(
        " cook ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    for (key, label, view) in entries {
        let active = app.view == view || (view == View::Login && app.view == View::Signup);
        let style = if active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("[{}] {}", key, label), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Tab bar over the category list.
fn render_browse(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selected = TABS.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(TABS.iter().map(|t| Line::from(*t)))
        .block(Block::default().borders(Borders::ALL).title(match app.view {
            View::Favourites => " My Favourites ",
            _ => " Categories ",
        }))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    f.render_widget(tabs, chunks[0]);

    categories::render(f, app, chunks[1]);
}
