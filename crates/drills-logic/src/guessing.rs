//! Number guessing game.
//!
//! A target is drawn uniformly from an inclusive range and the player gets a
//! fixed number of attempts. Only guesses that parse and fall inside the range
//! count as attempts; everything else is rejected before it reaches
//! [`GuessingGame::guess`].
//!
//! ```
//! use drills_logic::guessing::{Feedback, GameSettings, GameStatus, GuessingGame};
//!
//! let mut game = GuessingGame::with_target(&GameSettings::default(), 42).unwrap();
//! let turn = game.guess(50).unwrap();
//! assert_eq!(turn.feedback, Feedback::TooHigh);
//! assert_eq!(turn.status, GameStatus::Playing { remaining: 9 });
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Default inclusive lower bound of the target range.
pub const DEFAULT_MIN: i64 = 1;

/// Default inclusive upper bound of the target range.
pub const DEFAULT_MAX: i64 = 100;

/// Default number of valid guesses before the game is lost.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Tunable parameters for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Inclusive lower bound of the target range.
    pub min: i64,
    /// Inclusive upper bound of the target range.
    pub max: i64,
    /// Valid guesses allowed before the game ends in failure.
    pub max_attempts: u32,
    /// Fixed RNG seed for reproducible targets (None = entropy).
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Check the settings, returning all errors found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.min > self.max {
            errors.push(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.max_attempts == 0 {
            errors.push(ConfigError::ZeroAttempts);
        }
        errors
    }

    /// Build the RNG these settings ask for: seeded when `seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Number of candidates in the range.
    pub fn range_len(&self) -> u64 {
        if self.min > self.max {
            0
        } else {
            self.max.abs_diff(self.min).saturating_add(1)
        }
    }
}

/// Direction hint for a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    TooLow,
    TooHigh,
    Correct,
}

impl Feedback {
    /// Compare a guess against the target.
    pub fn for_guess(guess: i64, target: i64) -> Self {
        match guess.cmp(&target) {
            std::cmp::Ordering::Less => Self::TooLow,
            std::cmp::Ordering::Greater => Self::TooHigh,
            std::cmp::Ordering::Equal => Self::Correct,
        }
    }
}

/// Where the game stands after a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Still going, with this many attempts left (always > 0).
    Playing { remaining: u32 },
    /// Guessed correctly on attempt number `attempts`.
    Won { attempts: u32 },
    /// Ran out of attempts; reveals the target.
    Lost { target: i64 },
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Playing { .. })
    }
}

/// Result of one consumed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub guess: i64,
    pub feedback: Feedback,
    pub status: GameStatus,
}

/// Reasons a guess is refused without consuming an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Invalid input. Please enter a valid integer.")]
    NotANumber(String),
    #[error("Please enter a number between {min} and {max}.")]
    OutOfRange { guess: i64, min: i64, max: i64 },
    #[error("The game is already over.")]
    GameOver,
}

/// One game in progress.
#[derive(Debug, Clone)]
pub struct GuessingGame {
    min: i64,
    max: i64,
    max_attempts: u32,
    target: i64,
    attempts: u32,
    status: GameStatus,
}

impl GuessingGame {
    /// Start a game with a target drawn uniformly from the settings' range.
    pub fn new(settings: &GameSettings, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        check_settings(settings)?;
        let target = rng.gen_range(settings.min..=settings.max);
        Ok(Self::start(settings, target))
    }

    /// Start a game with a known target. The target must lie in range.
    pub fn with_target(settings: &GameSettings, target: i64) -> Result<Self, ConfigError> {
        check_settings(settings)?;
        if !(settings.min..=settings.max).contains(&target) {
            return Err(ConfigError::TargetOutOfRange {
                target,
                min: settings.min,
                max: settings.max,
            });
        }
        Ok(Self::start(settings, target))
    }

    fn start(settings: &GameSettings, target: i64) -> Self {
        Self {
            min: settings.min,
            max: settings.max,
            max_attempts: settings.max_attempts,
            target,
            attempts: 0,
            status: GameStatus::Playing {
                remaining: settings.max_attempts,
            },
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Valid guesses made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn remaining(&self) -> u32 {
        self.max_attempts - self.attempts
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// The secret target. Front ends should only show it once the game is over.
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Parse raw player input into an in-range guess.
    pub fn parse_guess(&self, input: &str) -> Result<i64, GuessError> {
        let trimmed = input.trim();
        let guess: i64 = trimmed
            .parse()
            .map_err(|_| GuessError::NotANumber(trimmed.to_string()))?;
        self.check_range(guess)?;
        Ok(guess)
    }

    fn check_range(&self, guess: i64) -> Result<(), GuessError> {
        if (self.min..=self.max).contains(&guess) {
            Ok(())
        } else {
            Err(GuessError::OutOfRange {
                guess,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Spend one attempt on `guess`.
    ///
    /// Out-of-range guesses and guesses after the game ended are refused and
    /// leave the attempt counter untouched.
    pub fn guess(&mut self, guess: i64) -> Result<Turn, GuessError> {
        if self.is_over() {
            return Err(GuessError::GameOver);
        }
        self.check_range(guess)?;

        self.attempts += 1;
        let feedback = Feedback::for_guess(guess, self.target);
        self.status = if feedback == Feedback::Correct {
            GameStatus::Won {
                attempts: self.attempts,
            }
        } else if self.attempts >= self.max_attempts {
            GameStatus::Lost {
                target: self.target,
            }
        } else {
            GameStatus::Playing {
                remaining: self.remaining(),
            }
        };

        Ok(Turn {
            guess,
            feedback,
            status: self.status,
        })
    }
}

fn check_settings(settings: &GameSettings) -> Result<(), ConfigError> {
    match settings.validate().into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Worst-case number of guesses bisection needs to find any target in a range
/// of `len` candidates: `ceil(log2(len + 1))`.
pub fn bisection_bound(len: u64) -> u32 {
    if len == 0 {
        return 0;
    }
    u64::BITS - len.leading_zeros()
}

/// Next guess of a bisection player who has narrowed the target to `lo..=hi`.
/// Widened to `i128` so the full `i64` range does not overflow.
pub fn bisection_guess(lo: i64, hi: i64) -> i64 {
    let (lo, hi) = (i128::from(lo), i128::from(hi));
    (lo + (hi - lo) / 2) as i64
}
