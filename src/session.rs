use tracing::{debug, info, warn};

use crate::error::{AnswerError, AnswerErrorKind, ConfigError, SessionError};
use crate::presenter::Presenter;
use crate::problem::{parse_answer, Mode, Problem, ProblemSource};
use crate::score::{Accuracy, Scoreboard};
use crate::timer::{Clock, TimerHandle, TimerId, TICK_INTERVAL};

/// Countdown at or below which the timer is shown as running low
pub const LOW_TIME_SECS: u32 = 5;

/// Settings a session runs with; fixed once the session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    time_limit_seconds: u32,
    mode: Mode,
}

impl SessionConfig {
    pub fn new(time_limit_seconds: u32, mode: Mode) -> Result<Self, ConfigError> {
        if time_limit_seconds == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(Self {
            time_limit_seconds,
            mode,
        })
    }

    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Active,
    Ended,
}

/// Outcome of one submitted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerResult {
    Correct,
    Incorrect { expected: i64 },
    /// Text was not an integer; scored as a wrong answer
    Invalid,
}

/// What the primary action key does right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitAnswer,
    PlayAgain,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub remaining_seconds: u32,
    pub scoreboard: Scoreboard,
    pub status: Status,
    pub current_problem: Option<Problem>,
    pub input: String,
}

/// One timed quiz run, from `start` until the countdown expires and the
/// player acknowledges the final score.
#[derive(Debug)]
pub struct QuizSession<P> {
    problems: P,
    config: Option<SessionConfig>,
    state: SessionState,
    timer: Option<TimerHandle>,
}

impl<P: ProblemSource> QuizSession<P> {
    pub fn new(problems: P) -> Self {
        Self {
            problems,
            config: None,
            state: SessionState::default(),
            timer: None,
        }
    }

    pub fn start(
        &mut self,
        config: SessionConfig,
        clock: &dyn Clock,
        presenter: &mut dyn Presenter,
    ) {
        if self.state.status == Status::Active {
            warn!("restarting a session that is still running");
        }
        // the old registration must be gone before a new one exists
        self.cancel_timer();

        self.config = Some(config);
        self.state = SessionState {
            remaining_seconds: config.time_limit_seconds(),
            status: Status::Active,
            current_problem: Some(self.problems.next_problem(config.mode())),
            ..SessionState::default()
        };

        let handle = clock.schedule_interval(TICK_INTERVAL);
        info!(
            timer = %handle.id(),
            time_limit = config.time_limit_seconds(),
            mode = %config.mode(),
            "session started"
        );
        self.timer = Some(handle);

        presenter.on_config_ready(&config);
        presenter.on_tick(self.state.remaining_seconds);
        presenter.on_stats_changed(0, self.accuracy());
    }

    /// One elapsed second. No-op unless a session is running.
    pub fn tick(&mut self, presenter: &mut dyn Presenter) -> Status {
        if self.state.status != Status::Active {
            return self.state.status;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        presenter.on_tick(self.state.remaining_seconds);

        if self.state.remaining_seconds == 0 {
            self.end(presenter);
        }
        self.state.status
    }

    /// Apply a tick delivered by the clock. Ticks from a registration the
    /// session no longer owns are dropped; returns whether it was applied.
    pub fn on_timer(&mut self, id: TimerId, presenter: &mut dyn Presenter) -> bool {
        let owned = self
            .timer
            .as_ref()
            .is_some_and(|handle| handle.id() == id && !handle.is_cancelled());
        if !owned {
            debug!(timer = %id, "ignoring stale tick");
            return false;
        }
        self.tick(presenter);
        true
    }

    pub fn submit_answer(
        &mut self,
        raw: &str,
        presenter: &mut dyn Presenter,
    ) -> Result<AnswerResult, SessionError> {
        let (Status::Active, Some(problem), Some(config)) =
            (self.state.status, self.state.current_problem, self.config)
        else {
            return Err(SessionError::NotActive);
        };

        let board = &mut self.state.scoreboard;
        let result = match parse_answer(raw) {
            Ok(answer) if problem.is_answered_by(answer) => {
                board.record_correct();
                AnswerResult::Correct
            }
            // an integer too wide for i64 can never be the expected answer
            Ok(_)
            | Err(AnswerError {
                kind: AnswerErrorKind::OutOfRange,
                ..
            }) => {
                board.record_miss();
                AnswerResult::Incorrect {
                    expected: problem.expected_answer,
                }
            }
            Err(err) => {
                debug!(%err, "answer rejected");
                board.record_miss();
                AnswerResult::Invalid
            }
        };
        debug!(problem = %problem, ?result, score = board.score, "answer checked");

        presenter.on_answer_result(&result);
        presenter.on_stats_changed(self.state.scoreboard.score, self.accuracy());

        self.state.current_problem = Some(self.problems.next_problem(config.mode()));
        self.state.input.clear();
        Ok(result)
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(
        &mut self,
        presenter: &mut dyn Presenter,
    ) -> Result<AnswerResult, SessionError> {
        let raw = std::mem::take(&mut self.state.input);
        self.submit_answer(&raw, presenter)
    }

    /// Append to the answer buffer. Only digits and a minus sign are
    /// accepted, and only while the session is running.
    pub fn push_input(&mut self, c: char) -> bool {
        if self.state.status != Status::Active || !(c.is_ascii_digit() || c == '-') {
            return false;
        }
        self.state.input.push(c);
        true
    }

    pub fn pop_input(&mut self) -> Option<char> {
        if self.state.status != Status::Active {
            return None;
        }
        self.state.input.pop()
    }

    /// Leave the final score screen; all session data is discarded
    pub fn acknowledge_end(&mut self) -> Result<(), SessionError> {
        if self.state.status != Status::Ended {
            return Err(SessionError::NotEnded);
        }
        info!(final_score = self.state.scoreboard.score, "session acknowledged");
        self.state = SessionState::default();
        self.config = None;
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn accuracy(&self) -> Accuracy {
        self.state.scoreboard.accuracy()
    }

    pub fn action(&self) -> Option<Action> {
        match self.state.status {
            Status::Active => Some(Action::SubmitAnswer),
            Status::Ended => Some(Action::PlayAgain),
            Status::Idle => None,
        }
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.as_ref().map(TimerHandle::id)
    }

    pub fn is_running_low(&self) -> bool {
        self.state.status == Status::Active && self.state.remaining_seconds <= LOW_TIME_SECS
    }

    fn end(&mut self, presenter: &mut dyn Presenter) {
        self.cancel_timer();
        self.state.status = Status::Ended;
        self.state.current_problem = None;
        self.state.input.clear();

        let board = &self.state.scoreboard;
        info!(
            score = board.score,
            asked = board.questions_asked,
            correct = board.correct_count,
            "session ended"
        );
        presenter.on_session_ended(board.score);
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            debug!(timer = %handle.id(), "cancelling tick registration");
            handle.cancel();
        }
    }
}
