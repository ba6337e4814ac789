use crate::score::Accuracy;
use crate::session::{AnswerResult, SessionConfig};

/// Notifications the quiz core sends to whatever is drawing it.
/// Every method defaults to doing nothing.
pub trait Presenter {
    fn on_config_ready(&mut self, _config: &SessionConfig) {}
    fn on_tick(&mut self, _remaining_seconds: u32) {}
    fn on_answer_result(&mut self, _result: &AnswerResult) {}
    fn on_stats_changed(&mut self, _score: u32, _accuracy: Accuracy) {}
    fn on_session_ended(&mut self, _final_score: u32) {}
}

/// Presenter that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Recorded form of a [`Presenter`] call
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    ConfigReady(SessionConfig),
    Tick(u32),
    AnswerResult(AnswerResult),
    StatsChanged { score: u32, accuracy: Accuracy },
    SessionEnded(u32),
}

impl Presenter for Vec<Notice> {
    fn on_config_ready(&mut self, config: &SessionConfig) {
        self.push(Notice::ConfigReady(*config));
    }

    fn on_tick(&mut self, remaining_seconds: u32) {
        self.push(Notice::Tick(remaining_seconds));
    }

    fn on_answer_result(&mut self, result: &AnswerResult) {
        self.push(Notice::AnswerResult(*result));
    }

    fn on_stats_changed(&mut self, score: u32, accuracy: Accuracy) {
        self.push(Notice::StatsChanged { score, accuracy });
    }

    fn on_session_ended(&mut self, final_score: u32) {
        self.push(Notice::SessionEnded(final_score));
    }
}
