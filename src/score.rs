use std::fmt;

pub const POINTS_PER_CORRECT: u32 = 10;

/// Running tally for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub questions_asked: u32,
    pub correct_count: u32,
}

impl Scoreboard {
    pub fn record_correct(&mut self) {
        self.questions_asked += 1;
        self.correct_count += 1;
        self.score += POINTS_PER_CORRECT;
    }

    pub fn record_miss(&mut self) {
        self.questions_asked += 1;
    }

    pub fn accuracy(&self) -> Accuracy {
        Accuracy::of(self.correct_count, self.questions_asked)
    }
}

/// Percentage of correct answers; undefined until something was answered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy(Option<f64>);

impl Accuracy {
    pub fn of(correct: u32, asked: u32) -> Self {
        match asked {
            0 => Self(None),
            n => Self(Some(100.0 * correct as f64 / n as f64)),
        }
    }

    pub fn percent(&self) -> Option<f64> {
        self.0
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(pct) => write!(f, "{:.1}%", pct),
            None => write!(f, "-"),
        }
    }
}
