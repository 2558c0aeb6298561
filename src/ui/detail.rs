//! Category detail overlay.

use crate::app::App;
use crate::model::Category;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render name, description and image link of `category` over the list.
pub fn render(f: &mut Frame, app: &App, category: &Category) {
    let area = f.area();
    let width = 70u16.min(area.width.saturating_sub(4));
    let height = 18u16.min(area.height.saturating_sub(4));
    let overlay = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    let favourite = if app.is_favourited(category.id) {
        Span::styled("♥ in your favourites", Style::default().fg(Color::Red))
    } else {
        Span::styled("f: add to favourites", Style::default().fg(Color::DarkGray))
    };

    let description = if category.description.trim().is_empty() {
        "No description."
    } else {
        category.description.trim()
    };

    let mut lines = vec![
        Line::from(Span::styled(
            category.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(favourite),
        Line::from(""),
    ];
    lines.extend(description.lines().map(Line::from));
    if !category.thumbnail_url.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("o: open image {}", category.thumbnail_url),
            Style::default().fg(Color::Cyan),
        )));
    }

    f.render_widget(Clear, overlay);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" #{} ", category.id)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, overlay);
}
