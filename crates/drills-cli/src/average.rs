//! Interactive average time session.

use std::io::{self, BufRead, Write};

use drills_logic::timing::{format_duration, format_seconds, parse_duration, TimeAverager};
use tracing::{info, warn};

use crate::console::{plural, prompt_entry, Entry};

/// Read durations until a blank line, `done`, or end of input, then print
/// their mean.
pub fn run<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<TimeAverager> {
    writeln!(
        output,
        "Enter times as SS, MM:SS or HH:MM:SS. Finish with an empty line or \"done\"."
    )?;

    let mut averager = TimeAverager::new();
    while let Entry::Value(duration) = prompt_entry(input, output, "Time: ", parse_duration)? {
        if let Err(err) = averager.add(duration) {
            writeln!(output, "{err}")?;
            warn!(count = averager.count(), "time not counted");
        }
    }

    match averager.mean() {
        Ok(mean) => {
            writeln!(
                output,
                "Average of {}: {} ({} seconds)",
                plural(averager.count(), "time"),
                format_duration(mean),
                format_seconds(mean)
            )?;
            info!(count = averager.count(), mean_secs = mean.as_secs_f64(), "average finished");
        }
        Err(err) => {
            writeln!(output, "{err}")?;
            warn!("average requested with no entries");
        }
    }
    Ok(averager)
}
