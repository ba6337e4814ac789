mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use sumsprint::{
    app_dirs,
    error::ConfigError,
    logging,
    presenter::Presenter,
    problem::{Mode, OperandRange, RandomProblems, MAX_NUM, MIN_NUM},
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, Runner, ThreadClock},
    score::POINTS_PER_CORRECT,
    session::{Action, AnswerResult, QuizSession, SessionConfig},
    settings::{SettingsSelector, TIME_OPTIONS},
    timer::{Clock, TimerId},
};
use tracing::{debug, info, warn};

const POLL_RATE_MS: u64 = 100;
const _: () = assert!(POLL_RATE_MS > 0 && POLL_RATE_MS <= 1000);

/// timed arithmetic practice in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed arithmetic drill: pick a time limit and a mode, then answer as many addition and subtraction problems as you can before the clock runs out."
)]
pub struct Cli {
    /// preselect the time limit in seconds
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    secs: Option<u32>,

    /// preselect the game mode
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// smallest operand drawn
    #[clap(long, default_value_t = MIN_NUM)]
    min: i64,

    /// largest operand drawn
    #[clap(long, default_value_t = MAX_NUM)]
    max: i64,

    /// seed the problem generator for a repeatable sequence
    #[clap(long)]
    seed: Option<u64>,

    /// write logs here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// disable logging entirely
    #[clap(long, conflicts_with = "log_file")]
    no_log: bool,
}

impl Cli {
    fn operand_range(&self) -> Result<OperandRange, ConfigError> {
        OperandRange::new(self.min, self.max)
    }

    fn problem_source(&self) -> Result<RandomProblems, ConfigError> {
        let range = self.operand_range()?;
        Ok(match self.seed {
            Some(seed) => RandomProblems::seeded(seed, range),
            None => RandomProblems::from_entropy(range),
        })
    }

    fn log_path(&self) -> Option<PathBuf> {
        if self.no_log {
            return None;
        }
        self.log_file.clone().or_else(app_dirs::default_log_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Settings,
    Quiz,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Good,
    Bad,
    Neutral,
}

/// Feedback line under the question, driven by session notifications
#[derive(Debug, Default)]
pub struct Feedback {
    pub message: Option<(String, Tone)>,
}

impl Feedback {
    pub fn clear(&mut self) {
        self.message = None;
    }
}

impl Presenter for Feedback {
    fn on_config_ready(&mut self, _config: &SessionConfig) {
        self.clear();
    }

    fn on_answer_result(&mut self, result: &AnswerResult) {
        self.message = Some(match result {
            AnswerResult::Correct => (
                format!("Correct! +{} Points", POINTS_PER_CORRECT),
                Tone::Good,
            ),
            AnswerResult::Incorrect { expected } => {
                (format!("Wrong! The answer was: {}", expected), Tone::Bad)
            }
            AnswerResult::Invalid => ("Invalid input.".to_string(), Tone::Bad),
        });
    }

    fn on_session_ended(&mut self, final_score: u32) {
        self.message = Some((format!("Final Score: {}", final_score), Tone::Neutral));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub settings: SettingsSelector,
    pub session: QuizSession<RandomProblems>,
    pub feedback: Feedback,
    pub state: AppState,
}

impl App {
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        Ok(Self {
            settings: SettingsSelector::with_presets(cli.secs, cli.mode)?,
            session: QuizSession::new(cli.problem_source()?),
            feedback: Feedback::default(),
            state: AppState::Settings,
        })
    }

    fn handle_key(&mut self, key: KeyEvent, clock: &dyn Clock) -> Flow {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Quit;
        }

        match self.state {
            AppState::Settings => match key.code {
                KeyCode::Char(c @ '1'..='4') => {
                    let idx = c as usize - '1' as usize;
                    self.settings.select_time(TIME_OPTIONS[idx]);
                }
                KeyCode::Char('a') => self.settings.select_mode(Mode::Addition),
                KeyCode::Char('s') => self.settings.select_mode(Mode::Subtraction),
                KeyCode::Char('m') => self.settings.select_mode(Mode::Mixed),
                KeyCode::Enter => self.launch(clock),
                _ => {}
            },
            AppState::Quiz => match key.code {
                KeyCode::Char(c) => {
                    self.session.push_input(c);
                }
                KeyCode::Backspace => {
                    self.session.pop_input();
                }
                KeyCode::Enter => self.primary_action(),
                _ => {}
            },
        }
        Flow::Continue
    }

    fn launch(&mut self, clock: &dyn Clock) {
        if let Some(config) = self.settings.try_launch() {
            self.session.start(config, clock, &mut self.feedback);
            self.state = AppState::Quiz;
        }
    }

    fn primary_action(&mut self) {
        match self.session.action() {
            Some(Action::SubmitAnswer) => {
                if let Err(err) = self.session.submit_input(&mut self.feedback) {
                    debug!(%err, "submit ignored");
                }
            }
            Some(Action::PlayAgain) => {
                if self.session.acknowledge_end().is_ok() {
                    self.feedback.clear();
                    self.state = AppState::Settings;
                }
            }
            None => {}
        }
    }

    fn on_tick(&mut self, id: TimerId) {
        self.session.on_timer(id, &mut self.feedback);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = match App::new(&cli) {
        Ok(app) => app,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };

    if let Some(path) = cli.log_path() {
        // the game still runs without a log
        if let Err(err) = logging::init(&path) {
            eprintln!("logging disabled: {}", err);
        }
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        warn!(%err, "event loop failed");
    }
    info!("exiting");
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let source = CrosstermEventSource::new();
    let clock = ThreadClock::new(source.sender());
    let runner = Runner::new(source, FixedTicker::new(Duration::from_millis(POLL_RATE_MS)));

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            None => continue,
            Some(QuizEvent::Tick(id)) => app.on_tick(id),
            Some(QuizEvent::Resize) => {}
            Some(QuizEvent::Key(key)) => {
                if app.handle_key(key, &clock) == Flow::Quit {
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ratatui::{backend::TestBackend, Terminal};
    use sumsprint::{
        problem::Problem,
        session::Status,
        timer::ManualClock,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, clock: &ManualClock, codes: &[KeyCode]) -> Flow {
        let mut flow = Flow::Continue;
        for code in codes {
            flow = app.handle_key(key(*code), clock);
        }
        flow
    }

    fn type_str(app: &mut App, clock: &ManualClock, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)), clock);
        }
    }

    // operands pinned to 3 so every addition is 3 + 3
    fn fixed_app(extra: &[&str]) -> App {
        let mut args = vec!["sumsprint", "--min", "3", "--max", "3", "--no-log"];
        args.extend_from_slice(extra);
        App::new(&Cli::parse_from(args)).unwrap()
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["sumsprint"]);

        assert_eq!(cli.secs, None);
        assert_eq!(cli.mode, None);
        assert_eq!(cli.min, 1);
        assert_eq!(cli.max, 20);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.log_file, None);
        assert!(!cli.no_log);
    }

    #[test]
    fn test_cli_presets() {
        let cli = Cli::parse_from(["sumsprint", "-s", "45", "-m", "subtraction"]);
        assert_eq!(cli.secs, Some(45));
        assert_eq!(cli.mode, Some(Mode::Subtraction));

        let cli = Cli::parse_from(["sumsprint", "--secs", "30", "--mode", "mixed"]);
        assert_eq!(cli.secs, Some(30));
        assert_eq!(cli.mode, Some(Mode::Mixed));
    }

    #[test]
    fn test_cli_rejects_zero_secs() {
        assert!(Cli::try_parse_from(["sumsprint", "-s", "0"]).is_err());
    }

    #[test]
    fn test_cli_log_flags_conflict() {
        assert!(Cli::try_parse_from(["sumsprint", "--no-log", "--log-file", "x.log"]).is_err());

        let cli = Cli::parse_from(["sumsprint", "--log-file", "x.log"]);
        assert_eq!(cli.log_path(), Some(PathBuf::from("x.log")));

        let cli = Cli::parse_from(["sumsprint", "--no-log"]);
        assert_eq!(cli.log_path(), None);
    }

    #[test]
    fn test_app_new_rejects_inverted_range() {
        let cli = Cli::parse_from(["sumsprint", "--min", "10", "--max", "2"]);
        assert_eq!(
            App::new(&cli).unwrap_err(),
            ConfigError::EmptyRange { min: 10, max: 2 }
        );
    }

    #[test]
    fn test_app_new_rejects_overflowing_range() {
        let max = i64::MAX.to_string();
        let cli = Cli::parse_from(["sumsprint", "--min", max.as_str(), "--max", max.as_str()]);
        assert_eq!(
            App::new(&cli).unwrap_err(),
            ConfigError::RangeOverflow {
                min: i64::MAX,
                max: i64::MAX
            }
        );
    }

    #[test]
    fn test_app_starts_on_settings() {
        let app = fixed_app(&[]);
        assert_eq!(app.state, AppState::Settings);
        assert_eq!(app.session.status(), Status::Idle);
        assert!(!app.settings.is_ready());
    }

    #[test]
    fn test_launch_requires_both_selections() {
        let clock = ManualClock::new();
        let mut app = fixed_app(&[]);

        press(&mut app, &clock, &[KeyCode::Char('2'), KeyCode::Enter]);
        assert_eq!(app.state, AppState::Settings);
        assert_eq!(app.settings.selected_time(), Some(40));
        assert_eq!(clock.scheduled(), 0);

        press(&mut app, &clock, &[KeyCode::Char('a'), KeyCode::Enter]);
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.session.state().remaining_seconds, 40);
        assert_eq!(clock.live().len(), 1);
        // selections are cleared for the next visit
        assert_eq!(app.settings.selected_time(), None);
        assert_eq!(app.settings.selected_mode(), None);
    }

    #[test]
    fn test_mode_keys() {
        let clock = ManualClock::new();
        let mut app = fixed_app(&[]);
        press(&mut app, &clock, &[KeyCode::Char('s')]);
        assert_eq!(app.settings.selected_mode(), Some(Mode::Subtraction));
        press(&mut app, &clock, &[KeyCode::Char('m')]);
        assert_eq!(app.settings.selected_mode(), Some(Mode::Mixed));
        press(&mut app, &clock, &[KeyCode::Char('4')]);
        assert_eq!(app.settings.selected_time(), Some(60));
    }

    #[test]
    fn test_quiz_answers_update_feedback() {
        let clock = ManualClock::new();
        let mut app = fixed_app(&["-s", "30", "-m", "addition"]);
        press(&mut app, &clock, &[KeyCode::Enter]);
        assert_eq!(app.session.state().current_problem, Some(Problem::addition(3, 3)));

        type_str(&mut app, &clock, "6");
        press(&mut app, &clock, &[KeyCode::Enter]);
        assert_eq!(
            app.feedback.message,
            Some(("Correct! +10 Points".to_string(), Tone::Good))
        );

        type_str(&mut app, &clock, "59");
        press(&mut app, &clock, &[KeyCode::Backspace, KeyCode::Enter]);
        assert_eq!(
            app.feedback.message,
            Some(("Wrong! The answer was: 6".to_string(), Tone::Bad))
        );

        press(&mut app, &clock, &[KeyCode::Enter]);
        assert_eq!(
            app.feedback.message,
            Some(("Invalid input.".to_string(), Tone::Bad))
        );

        let board = app.session.state().scoreboard;
        assert_eq!(board.score, 10);
        assert_eq!(board.questions_asked, 3);
        assert_eq!(app.session.accuracy().to_string(), "33.3%");
    }

    #[test]
    fn test_full_round_returns_to_settings() {
        let clock = ManualClock::new();
        let mut app = fixed_app(&["-s", "3", "-m", "addition"]);
        press(&mut app, &clock, &[KeyCode::Enter]);
        let id = app.session.timer_id().unwrap();

        type_str(&mut app, &clock, "6");
        press(&mut app, &clock, &[KeyCode::Enter]);

        for _ in 0..3 {
            app.on_tick(id);
        }
        assert_eq!(app.session.status(), Status::Ended);
        assert_eq!(
            app.feedback.message,
            Some(("Final Score: 10".to_string(), Tone::Neutral))
        );
        assert!(clock.live().is_empty());

        // typing is ignored once time is up
        type_str(&mut app, &clock, "12");
        assert!(app.session.state().input.is_empty());

        press(&mut app, &clock, &[KeyCode::Enter]);
        assert_eq!(app.state, AppState::Settings);
        assert_eq!(app.session.status(), Status::Idle);
        assert_eq!(app.feedback.message, None);

        // a late tick from the finished session changes nothing
        app.on_tick(id);
        assert_eq!(app.session.status(), Status::Idle);
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let clock = ManualClock::new();
        let mut app = fixed_app(&[]);
        assert_eq!(press(&mut app, &clock, &[KeyCode::Esc]), Flow::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c, &clock), Flow::Quit);
    }

    #[test]
    fn test_ui_settings_screen() {
        let clock = ManualClock::new();
        let mut app = fixed_app(&[]);
        press(&mut app, &clock, &[KeyCode::Char('1')]);

        let content = render(&app);
        assert!(content.contains("Game Settings"));
        assert!(content.contains("30 seconds"));
        assert!(content.contains("Subtraction"));
    }

    #[test]
    fn test_ui_quiz_screen() {
        let clock = ManualClock::new();
        let mut app = fixed_app(&["-s", "30", "-m", "addition"]);
        press(&mut app, &clock, &[KeyCode::Enter]);
        type_str(&mut app, &clock, "4");

        let content = render(&app);
        assert!(content.contains("3 + 3 = ?"));
        assert!(content.contains("Time: 30s"));
        assert!(content.contains("Score: 0"));
        assert!(content.contains("Accuracy: -"));
        assert!(content.contains("Submit Answer"));
    }

    #[test]
    fn test_ui_ended_screen() {
        let clock = ManualClock::new();
        let mut app = fixed_app(&["-s", "1", "-m", "addition"]);
        press(&mut app, &clock, &[KeyCode::Enter]);
        let id = app.session.timer_id().unwrap();
        app.on_tick(id);

        let content = render(&app);
        assert!(content.contains("Time's Up!"));
        assert!(content.contains("Final Score: 0"));
        assert!(content.contains("Play Again"));
    }
}
