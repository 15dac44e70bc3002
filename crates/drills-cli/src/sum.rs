//! Interactive number summing session.

use std::io::{self, BufRead, Write};

use drills_logic::summing::{format_number, parse_number, RunningTotal};
use tracing::{info, warn};

use crate::console::{plural, prompt_entry, Entry};

/// Read numbers until a blank line, `done`, or end of input, then print the
/// total.
pub fn run<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<RunningTotal> {
    writeln!(
        output,
        "Enter numbers one per line. Finish with an empty line or \"done\"."
    )?;

    let mut total = RunningTotal::new();
    while let Entry::Value(value) = prompt_entry(input, output, "Number: ", parse_number)? {
        if let Err(err) = total.add(value) {
            writeln!(output, "{err}")?;
            warn!(%value, total = %total.total(), "entry would overflow the total");
        }
    }

    writeln!(
        output,
        "Total of {}: {}",
        plural(total.count() as u64, "number"),
        format_number(total.total())
    )?;
    info!(count = total.count(), total = %total.total(), "sum finished");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sum(lines: &str) -> (RunningTotal, String) {
        sum_bytes(lines.as_bytes())
    }

    fn sum_bytes(bytes: &[u8]) -> (RunningTotal, String) {
        let mut input = Cursor::new(bytes);
        let mut output = Vec::new();
        let total = run(&mut input, &mut output).unwrap();
        (total, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_sum_until_blank() {
        let (total, out) = sum("2\n5\n3\n\n99\n");
        assert_eq!(format_number(total.total()), "10");
        assert!(out.contains("Total of 3 numbers: 10"));
    }

    #[test]
    fn test_invalid_entries_reprompt() {
        let (total, out) = sum("4\nfour\n1.5\ndone\n");
        assert_eq!(total.count(), 2);
        assert!(out.contains("Invalid input. Please enter a number."));
        assert!(out.contains("Total of 2 numbers: 5.5"));
    }

    #[test]
    fn test_decimal_entries_total_exactly() {
        let (total, out) = sum("0.1\n0.2\n\n");
        assert_eq!(total.count(), 2);
        assert!(out.contains("Total of 2 numbers: 0.3\n"));
    }

    #[test]
    fn test_overflowing_entry_is_refused() {
        let (total, out) = sum("79228162514264337593543950335\n1\n2\n\n");
        assert_eq!(total.count(), 1);
        assert!(out.contains("Total would overflow; this number was not added."));
        assert!(out.contains("Total of 1 number: 79228162514264337593543950335"));
    }

    #[test]
    fn test_invalid_utf8_line_reprompts() {
        let (total, out) = sum_bytes(b"\xff\xfe\n5\n\n");
        assert_eq!(total.count(), 1);
        assert_eq!(out.matches("Number: ").count(), 3);
        assert!(out.contains("Invalid input. Please enter a number."));
        assert!(out.contains("Total of 1 number: 5"));
    }

    #[test]
    fn test_eof_ends_input() {
        let (total, out) = sum("7");
        assert_eq!(total.count(), 1);
        assert!(out.contains("Total of 1 number: 7"));
    }

    #[test]
    fn test_no_entries() {
        let (total, out) = sum("");
        assert_eq!(total.count(), 0);
        assert!(out.contains("Total of 0 numbers: 0"));
    }
}
