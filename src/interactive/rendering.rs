//! TUI rendering with ratatui
//!
//! Found groups as colored bands above a four-column word grid.

use super::app::{App, GRID_COLUMNS, MessageStyle, Snowfall};
use crate::core::{Group, MAX_LIVES, MAX_SELECTED, NUM_GROUPS};
use crate::output::formatters::{group_rgb, lives_dots};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::time::Instant;

/// Height of one word cell, borders included
const CELL_HEIGHT: u16 = 3;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Board
            Constraint::Percentage(30), // Info panel
        ])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🎄 CONNECTIONS - Create four groups of four!")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let found = app.session.found_group_indices().len() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(found * 2), // Found group bands
            Constraint::Min(CELL_HEIGHT),  // Word grid or result
            Constraint::Length(3),         // Lives
        ])
        .split(area);

    render_found_groups(f, app, chunks[0]);

    if app.session.is_over() {
        render_result(f, app, chunks[1]);
    } else {
        render_board(f, app, chunks[1]);
    }

    if let Some(snow) = &app.snow {
        render_snow(f, snow, chunks[1], Instant::now());
    }
    if let Some(toast) = &app.toast {
        render_toast(f, toast, chunks[1]);
    }

    render_lives(f, app, chunks[2]);
}

fn band_style(group: &Group) -> Style {
    let (r, g, b) = group_rgb(group.color());
    Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b))
}

fn render_found_groups(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .session
        .found_groups()
        .flat_map(|group| {
            let style = band_style(group);
            [
                Line::styled(
                    group.category().to_string(),
                    style.add_modifier(Modifier::BOLD),
                ),
                Line::styled(group.words().join(", "), style),
            ]
        })
        .collect();

    let bands = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(bands, area);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let words: Vec<&str> = app
        .session
        .remaining_words()
        .map(|entry| entry.word.as_str())
        .collect();
    let rows = words.len().div_ceil(GRID_COLUMNS);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); rows])
        .split(area);

    for (row, chunk) in words.chunks(GRID_COLUMNS).enumerate() {
        let cell_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(row_areas[row]);

        for (col, &word) in chunk.iter().enumerate() {
            let index = row * GRID_COLUMNS + col;
            render_cell(f, app, word, index == app.cursor, cell_areas[col]);
        }
    }
}

fn render_cell(f: &mut Frame, app: &App, word: &str, under_cursor: bool, area: Rect) {
    let selected = app.session.is_selected(word);

    let text_style = match (selected, app.shaking) {
        (true, true) => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default()
            .fg(Color::Black)
            .bg(Color::Gray)
            .add_modifier(Modifier::BOLD),
        (false, _) => Style::default().fg(Color::White),
    };

    let (border_type, border_style) = if under_cursor {
        (BorderType::Double, Style::default().fg(Color::Yellow))
    } else {
        (BorderType::Rounded, Style::default().fg(Color::DarkGray))
    };

    let cell = Paragraph::new(word.to_string())
        .style(text_style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style),
        );
    f.render_widget(cell, area);
}

fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let (title, detail, color) = if app.session.is_won() {
        (
            "🎉 CONGRATULATIONS! 🎉",
            "You found all the connections!",
            Color::Green,
        )
    } else {
        ("GAME OVER", "Coal for you!", Color::Red)
    };

    let content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(detail),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'n' to play again or 'q' to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let panel = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(color)),
    );
    f.render_widget(panel, area);
}

/// Cell positions of the flakes that are currently falling
pub(crate) fn snowflake_positions(snow: &Snowfall, area: Rect, now: Instant) -> Vec<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return Vec::new();
    }

    let elapsed = now.saturating_duration_since(snow.started).as_secs_f64();
    let max_x = f64::from(area.width - 1);
    let max_y = f64::from(area.height - 1);

    snow.flakes
        .iter()
        .filter_map(|flake| {
            let progress = (elapsed - flake.delay) / flake.duration;
            if !(0.0..=1.0).contains(&progress) {
                return None;
            }
            let x = area.x + (flake.left * max_x).round() as u16;
            let y = area.y + (progress * max_y).round() as u16;
            Some((x, y))
        })
        .collect()
}

fn render_snow(f: &mut Frame, snow: &Snowfall, area: Rect, now: Instant) {
    let buf = f.buffer_mut();
    for (x, y) in snowflake_positions(snow, area, now) {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol("❄").set_fg(Color::White);
        }
    }
}

fn render_toast(f: &mut Frame, text: &str, area: Rect) {
    let width = (text.chars().count() as u16 + 4).min(area.width);
    let height = 3.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let toast = Paragraph::new(text.to_string())
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(Clear, popup);
    f.render_widget(toast, popup);
}

fn render_lives(f: &mut Frame, app: &App, area: Rect) {
    let lives = Paragraph::new(Line::from(vec![
        Span::raw("Mistakes remaining: "),
        Span::styled(
            lives_dots(app.session.lives_remaining(), MAX_LIVES),
            Style::default().fg(Color::Red),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(lives, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Groups found gauge
            Constraint::Min(5),    // Messages
        ])
        .split(area);

    render_progress(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let found = app.session.found_group_indices().len();
    let percent = (found * 100 / NUM_GROUPS) as u16;

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Groups Found ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent)
        .label(format!("{found}/{NUM_GROUPS}"));

    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .take(10)
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let selected_text = format!(
        "Selected: {}/{MAX_SELECTED}",
        app.session.selected().len()
    );
    let selected = Paragraph::new(selected_text).alignment(Alignment::Center);
    f.render_widget(selected, chunks[0]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        if app.stats.total_games > 0 {
            app.stats.games_won as f64 / app.stats.total_games as f64 * 100.0
        } else {
            0.0
        }
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let help_text = if app.session.is_over() {
        "q: Quit | n: New Game"
    } else {
        "←↑↓→: Move | Space: Select | Enter: Submit | d: Deselect | n: New | q: Quit"
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
