use chrono::{Local, NaiveDate};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use renovasjon_core::service::ServiceState;

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new("renovasjon – upcoming waste collections")
        .block(Block::default().borders(Borders::ALL).title("Min Renovasjon"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::AddressInput => draw_address_input(frame, app, *content_area),
        Screen::Collections => draw_collections(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::AddressInput => "Type address · Enter look up · Esc/Ctrl-C quit",
        Screen::Collections => "r refresh · Esc/←/b new address · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_address_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(0),    // help
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, help_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.address_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Address (street, number, postal code or place; Enter)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let help = Paragraph::new(
        "Example: Jonas Lies gate 20, 2000 Lillestrøm\n\
         The search must match exactly one address. Add postal code or place to narrow it down.",
    )
    .block(Block::default().borders(Borders::ALL).title("Help"))
    .wrap(Wrap { trim: true });
    frame.render_widget(help, *help_area);
}

fn draw_collections(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(service) = app.service.as_ref() else {
        let paragraph = Paragraph::new("No address looked up yet.")
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let address = service.address();
    let title = format!(
        "{} – {} ({})",
        address.label(),
        address.municipality,
        address.municipality_code
    );

    if service.state() == ServiceState::NotEnrolled {
        let paragraph = Paragraph::new(format!(
            "{} does not use Min Renovasjon, no collection calendar is available.",
            address.municipality
        ))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    if app.collections.is_empty() {
        let paragraph = Paragraph::new("No upcoming collections.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let today = Local::now().date_naive();

    // Calendar order is kept as delivered.
    let rows = app.collections.iter().map(|collection| {
        let first = collection.first_date.date();
        let next = collection.next_date.date();

        let mut style = Style::default();
        if first <= today {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }

        Row::new(vec![
            Cell::from(collection.fraction_name.clone()),
            Cell::from(first.format("%a %d.%m.%Y").to_string()),
            Cell::from(relative_day_label(first, today)),
            Cell::from(next.format("%a %d.%m.%Y").to_string()),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Fraction", "First", "In", "Next"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (date - today).num_days();
    match delta {
        0 => "today".to_owned(),
        1 => "tomorrow".to_owned(),
        days if days > 1 => format!("in {days} days"),
        -1 => "yesterday".to_owned(),
        days => format!("{} days ago", days.abs()),
    }
}
