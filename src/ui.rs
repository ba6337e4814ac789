pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use sumsprint::{
    problem::Mode,
    session::{Action, Status},
    settings::TIME_OPTIONS,
};

use crate::{App, Tone};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const SELECTED: Color = Color::Green;
const UNSELECTED: Color = Color::Blue;

fn mode_key(mode: Mode) -> char {
    match mode {
        Mode::Addition => 'a',
        Mode::Subtraction => 's',
        Mode::Mixed => 'm',
    }
}

fn option_span(label: String, selected: bool) -> Span<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    if selected {
        Span::styled(
            label,
            bold_style.fg(SELECTED).add_modifier(Modifier::REVERSED),
        )
    } else {
        Span::styled(label, bold_style.fg(UNSELECTED))
    }
}

fn options_line(spans: Vec<Span<'static>>) -> Line<'static> {
    let mut out = Vec::with_capacity(spans.len() * 2);
    for (idx, span) in spans.into_iter().enumerate() {
        if idx > 0 {
            out.push(Span::raw("   "));
        }
        out.push(span);
    }
    Line::from(out)
}

pub fn render_settings(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let heading_style = Style::default().fg(Color::Gray);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(1), // time heading
            Constraint::Length(2), // time options
            Constraint::Length(1), // mode heading
            Constraint::Length(2), // mode options
            Constraint::Length(2), // start
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled("Game Settings", bold_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled("Choose Time Limit:", heading_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let selected_time = app.settings.selected_time();
    let times = TIME_OPTIONS
        .iter()
        .enumerate()
        .map(|(idx, secs)| {
            option_span(
                format!("({}) {} seconds", idx + 1, secs),
                selected_time == Some(*secs),
            )
        })
        .collect();
    Paragraph::new(options_line(times))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled("Choose Game Mode:", heading_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    let selected_mode = app.settings.selected_mode();
    let modes = Mode::ALL
        .iter()
        .map(|mode| {
            option_span(
                format!("({}) {}", mode_key(*mode), mode),
                selected_mode == Some(*mode),
            )
        })
        .collect();
    Paragraph::new(options_line(modes))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    let start_style = if app.settings.is_ready() {
        bold_style.fg(SELECTED)
    } else {
        bold_style.add_modifier(Modifier::DIM)
    };
    Paragraph::new(Span::styled("(enter) Start Game", start_style))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    Paragraph::new(Span::styled("(esc)ape", italic_style)).render(chunks[7], buf);
}

pub fn render_quiz(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let state = session.state();

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let stats_style = Style::default().fg(Color::Gray);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // score / accuracy
            Constraint::Length(2), // timer
            Constraint::Min(3),    // question
            Constraint::Length(2), // feedback
            Constraint::Length(3), // answer box
            Constraint::Length(1), // legend
        ])
        .split(area);

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    Paragraph::new(Span::styled(
        format!("Score: {}", state.scoreboard.score),
        stats_style,
    ))
    .alignment(Alignment::Center)
    .render(stats[0], buf);

    Paragraph::new(Span::styled(
        format!("Accuracy: {}", session.accuracy()),
        stats_style,
    ))
    .alignment(Alignment::Center)
    .render(stats[1], buf);

    let timer_color = if session.is_running_low() || state.status == Status::Ended {
        Color::Red
    } else {
        Color::Blue
    };
    Paragraph::new(Span::styled(
        format!("Time: {}s", state.remaining_seconds),
        bold_style.fg(timer_color),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let question = match (state.status, state.current_problem) {
        (Status::Ended, _) => "Time's Up!".to_string(),
        (_, Some(problem)) => problem.to_string(),
        (_, None) => "Welcome!".to_string(),
    };
    // vertically centre the question in its block
    let question_area = chunks[2];
    let question_row = Rect {
        y: question_area.y + question_area.height / 2,
        height: 1,
        ..question_area
    };
    Paragraph::new(Span::styled(question, bold_style))
        .alignment(Alignment::Center)
        .render(question_row, buf);

    if let Some((message, tone)) = &app.feedback.message {
        let color = match tone {
            Tone::Good => Color::Green,
            Tone::Bad => Color::Red,
            Tone::Neutral => Color::Reset,
        };
        Paragraph::new(Span::styled(message.clone(), bold_style.fg(color)))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }

    let (input_text, input_style) = if state.status == Status::Active {
        (format!("{}_", state.input), bold_style)
    } else {
        (String::new(), Style::default().add_modifier(Modifier::DIM))
    };
    Paragraph::new(Span::styled(input_text, input_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Answer")
                .border_style(input_style),
        )
        .render(chunks[4], buf);

    let action = match session.action() {
        Some(Action::SubmitAnswer) => "(enter) Submit Answer / (esc)ape",
        Some(Action::PlayAgain) => "(enter) Play Again / (esc)ape",
        None => "(esc)ape",
    };
    Paragraph::new(Span::styled(action, italic_style)).render(chunks[5], buf);
}
