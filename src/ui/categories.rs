use crate::app::{App, Slot, View};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::helpers::truncate_to_width;

const SPINNER: [&str; super::loop_runner::SPINNER_FRAMES] =
    ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the category list for the current view and tab.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", app.tab));
    let categories = app.visible_categories();

    if categories.is_empty() {
        let message = empty_message(app);
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    // Room for borders, the marker column and a little padding
    let name_width = (area.width as usize).saturating_sub(8);

    let items: Vec<ListItem> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let style = if i == app.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if app.view == View::Home && app.is_favourited(category.id) {
                Span::styled("♥ ", style.fg(Color::Red))
            } else {
                Span::styled("  ", style)
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::styled(truncate_to_width(&category.name, name_width), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(Style::default());
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

/// Text shown when the list has nothing to display.
fn empty_message(app: &App) -> String {
    if app.is_loading() {
        let frame = SPINNER[app.spinner_frame % SPINNER.len()];
        return format!("{} Loading categories...", frame);
    }
    match &app.catalog {
        Slot::Failed(error) => format!("Could not load categories: {}\n\nPress u to reload", error),
        _ => "No categories available.".to_string(),
    }
}
