//! Landing page rendering for the TaskMario TUI.
//!
//! One navbar row (logo, location button, animated search input, action
//! hints) above a hero heading and the service-card grid, drawn with
//! `ratatui` layouts and styled spans.

use crate::app::App;
use crate::models::SERVICES;
use ratatui::{prelude::*, widgets::*};

/// Renders one frame of the landing page from current application state.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // navbar
            Constraint::Length(4), // hero heading
            Constraint::Min(8),    // service cards
            Constraint::Length(1), // key hints
        ])
        .split(f.size());

    render_navbar(f, app, chunks[0]);
    render_hero_heading(f, chunks[1]);
    render_service_grid(f, app, chunks[2]);
    render_key_hints(f, chunks[3]);
}

fn render_navbar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(13),
            Constraint::Length(30),
            Constraint::Min(30),
            Constraint::Length(24),
        ])
        .split(area);

    // Logo
    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "Task",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Mario",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(logo, chunks[0]);

    // Location button
    let (label, style) = if app.location_loading {
        (
            "Detecting location...",
            Style::default().fg(Color::Yellow),
        )
    } else {
        (app.location_text.as_str(), Style::default().fg(Color::Cyan))
    };
    let location = Paragraph::new(Line::from(vec![
        Span::raw("◎ "),
        Span::styled(truncate(label, 24), style),
    ]))
    .block(
        Block::default()
            .title(" Location (d) ")
            .borders(Borders::ALL),
    );
    f.render_widget(location, chunks[1]);

    // Search input with the animated placeholder
    let placeholder = format!("Search for '{}'...", app.search_placeholder);
    let search = Paragraph::new(Line::from(vec![
        Span::styled("⌕ ", Style::default().fg(Color::DarkGray)),
        Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().title(" Search ").borders(Borders::ALL));
    f.render_widget(search, chunks[2]);

    // Action hints mirroring the account icons
    let actions = Paragraph::new(Line::from(Span::styled(
        "Tasks │ Cart │ Account",
        Style::default().fg(Color::DarkGray),
    )))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(actions, chunks[3]);
}

fn render_hero_heading(f: &mut Frame, area: Rect) {
    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            "Home services at your doorstep",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "What are you looking for?",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::NONE));
    f.render_widget(heading, area);
}

fn render_service_grid(f: &mut Frame, app: &App, area: Rect) {
    let columns = 4;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (row_index, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); 4])
            .split(*row_area);

        for (col_index, cell) in cells.iter().enumerate() {
            let service_index = row_index * columns + col_index;
            let Some(service) = SERVICES.get(service_index) else {
                continue;
            };

            let selected = service_index == app.selected_service;
            let border_style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let mut title_spans = vec![Span::styled(
                service.title,
                if selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            )];
            if service.is_new {
                title_spans.push(Span::styled(
                    " NEW",
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ));
            }

            let card = Paragraph::new(Line::from(title_spans))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border_style),
                );
            f.render_widget(card, *cell);
        }
    }
}

fn render_key_hints(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(Span::styled(
        " q quit │ ←/→ browse services │ d detect location",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(hints, area);
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
