//! Playfield rendering: bird, pipes, particles, ground and the game-over summary.

use super::common::{
    centered_rect, create_game_layout, hsl_color, leaderboard_lines, render_panel_frame,
    render_status_bar,
};
use flipping_bird::game::{GameState, Snapshot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const GROUND_COLOR: Color = Color::Rgb(85, 139, 47);
const SKY_COLOR: Color = Color::Rgb(191, 233, 255);

/// Render the running (or frozen) game.
pub fn render_game(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let layout = create_game_layout(frame, area, " Flipping Bird ", Color::Cyan, 24);

    render_play_area(frame, layout.content, snap);
    render_game_status(frame, layout.status_bar, snap);
    render_info_panel(frame, layout.info_panel, snap);

    if snap.shows_summary() {
        render_game_over(frame, layout.content, snap);
    }
}

/// One terminal cell of the play area.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
}

fn render_play_area(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let pf = snap.playfield;
    let x_scale = width as f64 / pf.width;
    let y_scale = height as f64 / pf.height;
    let ground_y = pf.ground_y();

    let mut grid = vec![vec![Cell { ch: ' ', fg: SKY_COLOR }; width]; height];

    // Ground
    for (row, cells) in grid.iter_mut().enumerate() {
        let game_y = (row as f64 + 0.5) / y_scale;
        if game_y >= ground_y {
            for cell in cells.iter_mut() {
                *cell = Cell {
                    ch: '▒',
                    fg: GROUND_COLOR,
                };
            }
        }
    }

    // Pipes
    for pipe in snap.pipes {
        let first = (pipe.x * x_scale).floor().max(0.0) as usize;
        let last = (pipe.right() * x_scale).ceil().min(width as f64);
        if last <= 0.0 || first >= width {
            continue;
        }
        let color = hsl_color(pipe.hue, 0.7, 0.4);
        for (row, cells) in grid.iter_mut().enumerate() {
            let game_y = (row as f64 + 0.5) / y_scale;
            if game_y >= ground_y {
                break;
            }
            let blocked = game_y < pipe.top || game_y > pipe.gap_bottom();
            let lip = !blocked && (game_y - pipe.gap_bottom()).abs() < 0.5 / y_scale;
            for cell in cells.iter_mut().take(last as usize).skip(first) {
                if blocked {
                    *cell = Cell { ch: '█', fg: color };
                } else if lip {
                    *cell = Cell {
                        ch: '▔',
                        fg: Color::White,
                    };
                }
            }
        }
    }

    // Particles
    for p in snap.particles {
        if let Some((col, row)) = to_cell(p.x, p.y, x_scale, y_scale, width, height) {
            grid[row][col] = Cell {
                ch: '·',
                fg: hsl_color(p.hue, 1.0, 0.6),
            };
        }
    }

    // Bird
    let bird_color = snap
        .profile
        .map(|p| {
            let (r, g, b) = p.rgb();
            Color::Rgb(r, g, b)
        })
        .unwrap_or(Color::Yellow);
    if let Some((col, row)) = to_cell(snap.bird.x, snap.bird.y, x_scale, y_scale, width, height) {
        let ch = if snap.bird.vy < -2.0 {
            '▲'
        } else if snap.bird.vy > 4.0 {
            '▼'
        } else {
            '►'
        };
        grid[row][col] = Cell { ch, fg: bird_color };
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|cells| {
            Line::from(
                cells
                    .into_iter()
                    .map(|c| Span::styled(c.ch.to_string(), Style::default().fg(c.fg)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn to_cell(
    x: f64,
    y: f64,
    x_scale: f64,
    y_scale: f64,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let col = (x * x_scale).floor();
    let row = (y * y_scale).floor();
    if col < 0.0 || row < 0.0 || col >= width as f64 || row >= height as f64 {
        return None;
    }
    Some((col as usize, row as usize))
}

fn render_game_status(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    match snap.state {
        GameState::GameOver => render_status_bar(
            frame,
            area,
            &format!("Crashed with {} points", snap.score),
            Color::Red,
            &[("[Space/Enter/R]", "Restart"), ("[Q]", "Quit")],
        ),
        _ => render_status_bar(
            frame,
            area,
            &format!("Score: {}", snap.score),
            Color::Green,
            &[("[Space/Up]", "Flap"), ("[R]", "Restart"), ("[Q]", "Quit")],
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let inner = render_panel_frame(frame, area, " Info ");
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let name = snap.profile.map(|p| p.name.as_str()).unwrap_or("-");
    let best = snap
        .leaderboard
        .iter()
        .find(|e| e.name == name)
        .map(|e| e.score.to_string())
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                snap.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(best, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(" Pipes: ", Style::default().fg(Color::DarkGray)),
            Span::styled(snap.pipes.len().to_string(), Style::default().fg(Color::Green)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let board_rows = snap.leaderboard.len().max(1) as u16;
    let modal = centered_rect(area, 42, 8 + board_rows);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .title(" Game Over ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let summary = snap.last_run;
    let score = summary.map(|s| s.score).unwrap_or(snap.score);
    let rank_text = match summary.and_then(|s| s.rank) {
        Some(rank) => format!("Leaderboard place: #{}", rank),
        None => "Not on the leaderboard this time".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(rank_text, Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            "Leaderboard",
            Style::default().fg(Color::Yellow),
        )),
    ];
    lines.extend(leaderboard_lines(
        snap.leaderboard,
        snap.profile.map(|p| p.name.as_str()),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Press Space or R to restart]",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
