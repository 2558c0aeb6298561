//! Login and signup forms.

use crate::app::{App, View};
use crate::forms::{FieldInput, FormInput};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the label column.
const LABEL_WIDTH: usize = 18;

/// Render the login or signup form, centered in `area`.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let (title, form, switch_hint) = match app.view {
        View::Signup => (" Sign Up ", &app.signup_input, "F2: have an account? Log in"),
        _ => (" Log In ", &app.login_input, "F2: new here? Sign up"),
    };

    let mut lines = Vec::with_capacity(form.fields.len() * 2 + 2);
    for (i, field) in form.fields.iter().enumerate() {
        lines.push(field_line(field, i == form.focused));
        if let Some(message) = form.error_for(field.name) {
            lines.push(Line::from(Span::styled(
                format!("{:width$}{}", "", message, width = LABEL_WIDTH + 2),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Enter: submit   {}", switch_hint),
        Style::default().fg(Color::DarkGray),
    )));

    // lines + borders, capped to the available area
    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 64u16.min(area.width);
    let overlay = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    if overlay.width < 10 || overlay.height < 3 {
        return;
    }

    f.render_widget(Clear, overlay);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );
    f.render_widget(paragraph, overlay);
}

fn field_line(field: &FieldInput, focused: bool) -> Line<'_> {
    let value = if field.masked {
        "*".repeat(field.value.chars().count())
    } else {
        field.value.clone()
    };
    let cursor = if focused { "_" } else { "" };

    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(format!("{:<width$}: ", field.label, width = LABEL_WIDTH), label_style),
        Span::raw(format!("{}{}", value, cursor)),
    ])
}

/// Number of form errors, for the status line.
pub(super) fn error_count(form: &FormInput) -> usize {
    form.errors.len()
}
