use ratatui::Frame;

use crate::{
    ui::{render_quiz, render_settings},
    App, AppState,
};

/// A UI Screen boundary: responsible for rendering the app in one state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Time limit and mode selection
pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_settings(app, f.area(), f.buffer_mut());
    }
}

/// Countdown, question, answer box; also shows the final score
pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_quiz(app, f.area(), f.buffer_mut());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Settings => Box::new(SettingsScreen),
        AppState::Quiz => Box::new(QuizScreen),
    }
}
