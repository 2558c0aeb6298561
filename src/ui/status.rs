use crate::app::{App, View};
use crate::command::NotificationKind;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::borrow::Cow;

use super::login::error_count;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = match app.view {
        View::Home | View::Favourites => Cow::Borrowed(
            "[j/k]move [Tab]tab [Enter]details [f]avourite [u]reload [L]ogout [?]help [q]uit",
        ),
        View::Login | View::Signup => {
            let form = if app.view == View::Login {
                &app.login_input
            } else {
                &app.signup_input
            };
            match error_count(form) {
                0 => Cow::Borrowed("[Tab]next field [Enter]submit [F2]switch form [Esc]back"),
                n => Cow::Owned(format!("{} field(s) need attention | [Enter]submit [Esc]back", n)),
            }
        }
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}

/// Render the current notification as a box in the top-right corner.
pub fn render_notification(f: &mut Frame, app: &App) {
    let Some(notification) = &app.notification else {
        return;
    };

    let area = f.area();
    let width = 44u16.min(area.width.saturating_sub(2));
    let height = 5u16.min(area.height.saturating_sub(2));
    let overlay = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1,
        width,
        height,
    );
    if overlay.width < 12 || overlay.height < 3 {
        return;
    }

    let color = match notification.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Failure => Color::Red,
        NotificationKind::Info => Color::Cyan,
    };

    let mut lines = vec![Line::from(notification.description.as_str())];
    if notification.can_retry() {
        let key = match app.view {
            View::Login | View::Signup => "Ctrl+r",
            _ => "r",
        };
        lines.push(Line::from(format!("{}: retry   Esc: dismiss", key)));
    }

    f.render_widget(Clear, overlay);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", notification.title)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, overlay);
}
