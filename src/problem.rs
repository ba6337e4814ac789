use std::fmt;
use std::num::IntErrorKind;
use std::ops::RangeInclusive;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{AnswerError, AnswerErrorKind, ConfigError};

pub const MIN_NUM: i64 = 1;
pub const MAX_NUM: i64 = 20;

/// Which operations a session draws problems from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, strum_macros::Display)]
pub enum Mode {
    Addition,
    Subtraction,
    Mixed,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Addition, Mode::Subtraction, Mode::Mixed];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single question shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub operand_a: i64,
    pub operand_b: i64,
    pub operator: Operator,
    pub expected_answer: i64,
}

impl Problem {
    pub fn addition(a: i64, b: i64) -> Self {
        Self {
            operand_a: a,
            operand_b: b,
            operator: Operator::Plus,
            expected_answer: a + b,
        }
    }

    /// Larger operand always goes first so the answer is never negative
    pub fn subtraction(a: i64, b: i64) -> Self {
        let (hi, lo) = (a.max(b), a.min(b));
        Self {
            operand_a: hi,
            operand_b: lo,
            operator: Operator::Minus,
            expected_answer: hi - lo,
        }
    }

    pub fn is_answered_by(&self, answer: i64) -> bool {
        answer == self.expected_answer
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = ?",
            self.operand_a, self.operator, self.operand_b
        )
    }
}

/// Inclusive range operands are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandRange {
    min: i64,
    max: i64,
}

impl OperandRange {
    /// Every sum and difference of two operands must fit in an `i64`
    pub fn new(min: i64, max: i64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::EmptyRange { min, max });
        }
        let fits = max.checked_add(max).is_some()
            && min.checked_add(min).is_some()
            && max.checked_sub(min).is_some();
        if !fits {
            return Err(ConfigError::RangeOverflow { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        self.bounds().contains(&value)
    }

    fn bounds(&self) -> RangeInclusive<i64> {
        self.min..=self.max
    }
}

impl Default for OperandRange {
    fn default() -> Self {
        Self {
            min: MIN_NUM,
            max: MAX_NUM,
        }
    }
}

/// Generate one problem for `mode`. `Mixed` is resolved per problem.
pub fn generate<R: Rng + ?Sized>(mode: Mode, range: &OperandRange, rng: &mut R) -> Problem {
    let concrete = match mode {
        Mode::Mixed => {
            if rng.gen_bool(0.5) {
                Mode::Addition
            } else {
                Mode::Subtraction
            }
        }
        other => other,
    };

    let a = rng.gen_range(range.bounds());
    let b = rng.gen_range(range.bounds());

    match concrete {
        Mode::Subtraction => Problem::subtraction(a, b),
        _ => Problem::addition(a, b),
    }
}

/// Parse typed answer text. Surrounding whitespace is ignored.
pub fn parse_answer(raw: &str) -> Result<i64, AnswerError> {
    raw.trim().parse::<i64>().map_err(|err| AnswerError {
        raw: raw.to_string(),
        kind: match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => AnswerErrorKind::OutOfRange,
            _ => AnswerErrorKind::Malformed,
        },
    })
}

/// Where a session draws its next problem from
pub trait ProblemSource {
    fn next_problem(&mut self, mode: Mode) -> Problem;
}

impl<F> ProblemSource for F
where
    F: FnMut(Mode) -> Problem,
{
    fn next_problem(&mut self, mode: Mode) -> Problem {
        self(mode)
    }
}

/// Production problem source backed by a seedable RNG
#[derive(Debug, Clone)]
pub struct RandomProblems<R: Rng = StdRng> {
    rng: R,
    range: OperandRange,
}

impl RandomProblems<StdRng> {
    pub fn from_entropy(range: OperandRange) -> Self {
        Self::new(StdRng::from_entropy(), range)
    }

    pub fn seeded(seed: u64, range: OperandRange) -> Self {
        Self::new(StdRng::seed_from_u64(seed), range)
    }
}

impl<R: Rng> RandomProblems<R> {
    pub fn new(rng: R, range: OperandRange) -> Self {
        Self { rng, range }
    }
}

impl<R: Rng> ProblemSource for RandomProblems<R> {
    fn next_problem(&mut self, mode: Mode) -> Problem {
        generate(mode, &self.range, &mut self.rng)
    }
}
