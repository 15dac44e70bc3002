//! Interactive guessing game session.

use std::io::{self, BufRead, Write};

use drills_logic::guessing::{Feedback, GameStatus, GuessingGame};
use tracing::{debug, info};

use crate::console::{plural, prompt_until_valid};

const PROMPT: &str = "Enter your guess: ";

/// Play `game` to the end. Returns the final status, or `None` when input ran
/// out before the game finished.
pub fn play<R: BufRead, W: Write>(
    mut game: GuessingGame,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<GameStatus>> {
    writeln!(output, "Welcome to the Number Guessing Game!")?;
    writeln!(
        output,
        "You have {} to guess the number between {} and {}.",
        plural(game.max_attempts(), "attempt"),
        game.min(),
        game.max()
    )?;

    while !game.is_over() {
        let Some(guess) = prompt_until_valid(input, output, PROMPT, |line| game.parse_guess(line))?
        else {
            writeln!(output)?;
            writeln!(output, "No more input. The number was {}.", game.target())?;
            info!(attempts = game.attempts(), "game abandoned");
            return Ok(None);
        };

        let turn = match game.guess(guess) {
            Ok(turn) => turn,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        debug!(guess, attempt = game.attempts(), feedback = ?turn.feedback, "guess");

        match turn.feedback {
            Feedback::TooLow => writeln!(output, "Too low!")?,
            Feedback::TooHigh => writeln!(output, "Too high!")?,
            Feedback::Correct => {}
        }
        match turn.status {
            GameStatus::Playing { remaining } => {
                writeln!(output, "{} left.", plural(remaining, "attempt"))?
            }
            GameStatus::Won { attempts } => writeln!(
                output,
                "Correct! You guessed the number in {}.",
                plural(attempts, "attempt")
            )?,
            GameStatus::Lost { target } => {
                writeln!(output, "Out of attempts. The number was {target}.")?
            }
        }
    }

    info!(status = ?game.status(), "game finished");
    Ok(Some(game.status()))
}
