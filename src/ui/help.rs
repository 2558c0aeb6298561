//! Help overlay: keybinding table.
//!
//! Renders a centered overlay listing the keys of each screen.

use crate::app::App;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Row, Table},
    Frame,
};

/// Keys grouped by where they apply.
const BINDINGS: [(&str, &[(&str, &str)]); 3] = [
    (
        "General",
        &[
            ("1 / 2 / 3", "Home / Favourites / Account"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
            ("Ctrl+c", "Quit from anywhere"),
        ],
    ),
    (
        "Categories",
        &[
            ("j/k", "Move selection"),
            ("Tab/l", "Next tab"),
            ("S-Tab/h", "Previous tab"),
            ("Enter", "Show details"),
            ("f", "Add to favourites"),
            ("o", "Open image in browser"),
            ("u", "Reload"),
            ("r", "Retry failed action"),
            ("L", "Log out"),
            ("Esc", "Close details / notification"),
        ],
    ),
    (
        "Forms",
        &[
            ("Tab/S-Tab", "Next / previous field"),
            ("Enter", "Submit"),
            ("F2", "Switch log in / sign up"),
            ("Ctrl+r", "Retry failed action"),
            ("F1", "Help"),
            ("Esc", "Back to Home"),
        ],
    ),
];

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, _app: &App) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let mut rows: Vec<Row> = Vec::new();
    for (label, bindings) in BINDINGS {
        rows.push(Row::new(vec![
            Line::from(Span::styled(
                format!("-- {} --", label),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ]));
        for (key, description) in bindings {
            rows.push(Row::new(vec![format!("  {}", key), description.to_string()]));
        }
        rows.push(Row::new(vec![String::new(), String::new()]));
    }
    rows.pop();

    let widths = [Constraint::Length(14), Constraint::Min(20)];
    let table = Table::new(rows, widths).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help (? to close) "),
    );
    f.render_widget(table, overlay);
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    // Widen before multiplying; u16 overflows past ~900 columns
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
