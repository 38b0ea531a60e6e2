//! Idle menu: profile form, start prompt and leaderboard.

use super::common::{centered_rect, controls_line, leaderboard_lines};
use flipping_bird::constants::{DEFAULT_BIRD_COLOR, MAX_NAME_LEN};
use flipping_bird::game::{GameInput, Snapshot};
use flipping_bird::profile::PlayerProfile;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Color,
}

/// Name and colour entry. Lives in the host; the core only sees the
/// submitted values.
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub editing: bool,
    pub name_input: String,
    pub color_input: String,
    pub focus: FormField,
}

impl ProfileForm {
    /// Pre-fill from the saved profile; start editing if there is none.
    pub fn new(profile: Option<&PlayerProfile>) -> Self {
        Self {
            editing: profile.is_none(),
            name_input: profile.map(|p| p.name.clone()).unwrap_or_default(),
            color_input: profile
                .map(|p| p.color.clone())
                .unwrap_or_else(|| DEFAULT_BIRD_COLOR.to_string()),
            focus: FormField::Name,
        }
    }

    pub fn open(&mut self) {
        self.editing = true;
        self.focus = FormField::Name;
    }

    pub fn close(&mut self) {
        self.editing = false;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Color,
            FormField::Color => FormField::Name,
        };
    }

    pub fn handle_char_input(&mut self, c: char) {
        match self.focus {
            FormField::Name => {
                if self.name_input.chars().count() < MAX_NAME_LEN {
                    self.name_input.push(c);
                }
            }
            FormField::Color => {
                if self.color_input.chars().count() < 7 {
                    self.color_input.push(c);
                }
            }
        }
    }

    pub fn handle_backspace(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name_input.pop();
            }
            FormField::Color => {
                self.color_input.pop();
            }
        }
    }

    /// Close the form and produce the submission input.
    pub fn submit(&mut self) -> GameInput {
        self.editing = false;
        GameInput::SubmitProfile {
            name: self.name_input.clone(),
            color: self.color_input.clone(),
        }
    }

    fn preview(&self) -> PlayerProfile {
        PlayerProfile::sanitize(&self.name_input, &self.color_input)
    }
}

pub fn render_menu(frame: &mut Frame, area: Rect, snap: &Snapshot, form: &ProfileForm) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Flipping Bird ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let board_rows = snap.leaderboard.len().max(1) as u16;
    let body = centered_rect(inner, 48, 16 + board_rows);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(7), // Form or greeting
            Constraint::Length(1), // Spacer
            Constraint::Min(2),    // Leaderboard
            Constraint::Length(2), // Controls
        ])
        .split(body);

    let title = Paragraph::new("Flipping Bird")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    if form.editing {
        render_form(frame, chunks[1], form);
    } else {
        render_greeting(frame, chunks[1], snap);
    }

    let mut board = vec![Line::from(Span::styled(
        "Leaderboard",
        Style::default().fg(Color::Yellow),
    ))];
    board.extend(leaderboard_lines(
        snap.leaderboard,
        snap.profile.map(|p| p.name.as_str()),
    ));
    frame.render_widget(Paragraph::new(board), chunks[3]);

    let controls: &[(&str, &str)] = if form.editing {
        &[("[Tab]", "Next field"), ("[Enter]", "Start"), ("[Esc]", "Back")]
    } else {
        &[("[Space]", "Start"), ("[E]", "Edit profile"), ("[Q]", "Quit")]
    };
    frame.render_widget(
        Paragraph::new(controls_line(controls)).alignment(Alignment::Center),
        chunks[4],
    );
}

fn render_form(frame: &mut Frame, area: Rect, form: &ProfileForm) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let field = |label: &str, value: &str, focused: bool| {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let text = if focused {
            format!("{}_", value)
        } else {
            value.to_string()
        };
        Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .title(format!(" {} ", label))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
    };

    frame.render_widget(
        field("Name", &form.name_input, form.focus == FormField::Name),
        rows[0],
    );
    frame.render_widget(
        field("Bird Color (#rrggbb)", &form.color_input, form.focus == FormField::Color),
        rows[1],
    );

    let preview = form.preview();
    let (r, g, b) = preview.rgb();
    let hint = Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::Rgb(r, g, b))),
        Span::styled(
            format!("Playing as {}", preview.name),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[2]);
}

fn render_greeting(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let name = snap.profile.map(|p| p.name.as_str()).unwrap_or("stranger");
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Welcome, {}!", name),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Space to flap and start",
            Style::default().fg(Color::Green),
        )),
    ];
    if let Some(run) = snap.last_run {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Last run: {}", run.score),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_without_profile_is_editing() {
        let form = ProfileForm::new(None);
        assert!(form.editing);
        assert!(form.name_input.is_empty());
        assert_eq!(form.color_input, DEFAULT_BIRD_COLOR);
    }

    #[test]
    fn test_name_input_capped() {
        let mut form = ProfileForm::new(None);
        for _ in 0..40 {
            form.handle_char_input('x');
        }
        assert_eq!(form.name_input.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_submit_closes_form() {
        let profile = PlayerProfile::sanitize("Ann", "#000000");
        let mut form = ProfileForm::new(Some(&profile));
        assert!(!form.editing);
        form.open();
        form.toggle_focus();
        form.handle_backspace();
        form.handle_char_input('1');
        let input = form.submit();
        assert!(!form.editing);
        assert_eq!(
            input,
            GameInput::SubmitProfile {
                name: "Ann".to_string(),
                color: "#000001".to_string(),
            }
        );
    }
}
