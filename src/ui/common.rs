//! Shared UI pieces: layout, status bar, leaderboard list, colours.

use flipping_bird::leaderboard::LeaderboardEntry;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Screen regions for a run in progress.
pub struct GameLayout {
    /// Where the playfield is scaled onto cells.
    pub content: Rect,
    /// Score line plus key hints.
    pub status_bar: Rect,
    /// Player name, score, best and pipe count.
    pub info_panel: Rect,
}

/// Split the screen for a run: the playfield fills the left side above a
/// two-line score bar, the info panel takes a fixed-width column on the right.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Render a status bar (2 lines: status message + controls).
///
/// `controls` is a slice of (key, action) pairs, e.g. `[("[Space]", "Flap")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let controls_line = Paragraph::new(controls_line(controls)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

pub fn controls_line(controls: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Render a bordered side panel and return its inner area.
pub fn render_panel_frame(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Leaderboard rows, medal-style numbering for the top three.
pub fn leaderboard_lines(entries: &[LeaderboardEntry], highlight: Option<&str>) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            "No scores yet!",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let place_color = match i {
                0 => Color::Yellow,
                1 => Color::Gray,
                2 => Color::LightRed,
                _ => Color::DarkGray,
            };
            let mut name_style = Style::default().fg(Color::White);
            if highlight == Some(entry.name.as_str()) {
                name_style = name_style.add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), Style::default().fg(place_color)),
                Span::styled(format!("{:<25}", entry.name), name_style),
                Span::styled(
                    format!("{:>5}", entry.score),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}

/// Centre a `width` x `height` box inside `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// HSL (degrees, 0-1, 0-1) to an RGB terminal colour.
pub fn hsl_color(hue: f64, saturation: f64, lightness: f64) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(to_byte(r), to_byte(g), to_byte(b))
}
