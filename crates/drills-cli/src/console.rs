//! Line-oriented prompting over any `BufRead`/`Write` pair.
//!
//! Sessions never touch stdin/stdout directly, so tests drive them with
//! `Cursor` input and a `Vec<u8>` for output.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use drills_logic::summing::is_stop;
use tracing::debug;

/// Outcome of prompting for one entry in a stop-terminated sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    Value(T),
    /// Blank line, stop word, or end of input.
    Done,
}

/// Read one line without its line ending. `None` at end of input.
///
/// Bytes that are not UTF-8 become U+FFFD, so a garbled line reaches the
/// parser and is rejected like any other bad entry.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let mut line = String::from_utf8_lossy(&buf).into_owned();
    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);
    Ok(Some(line))
}

/// Print `message` (no newline) and read the reply.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;
    read_line(input)
}

/// Prompt until `parse` accepts the reply, printing each rejection.
/// `None` means input ended first.
pub fn prompt_until_valid<R, W, T, E>(
    input: &mut R,
    output: &mut W,
    message: &str,
    mut parse: impl FnMut(&str) -> Result<T, E>,
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
    E: Display,
{
    loop {
        let Some(line) = prompt(input, output, message)? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(err) => {
                debug!(input = %line, "rejected: {err}");
                writeln!(output, "{err}")?;
            }
        }
    }
}

/// Like [`prompt_until_valid`], but a blank line or stop word ends the
/// sequence instead of being parsed.
pub fn prompt_entry<R, W, T, E>(
    input: &mut R,
    output: &mut W,
    message: &str,
    mut parse: impl FnMut(&str) -> Result<T, E>,
) -> io::Result<Entry<T>>
where
    R: BufRead,
    W: Write,
    E: Display,
{
    let value = prompt_until_valid(input, output, message, |line| {
        if is_stop(line) {
            return Ok(None);
        }
        parse(line).map(Some)
    })?;
    Ok(match value {
        Some(Some(v)) => Entry::Value(v),
        _ => Entry::Done,
    })
}

/// "1 attempt", "3 attempts".
pub fn plural(count: impl Into<u64>, noun: &str) -> String {
    let count = count.into();
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
