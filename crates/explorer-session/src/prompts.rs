//! Interactive filter collection.
//!
//! All prompts run over generic `BufRead`/`Write` streams so the
//! loop-until-valid behaviour is testable with in-memory buffers. Malformed
//! input only ever re-prompts; the collector cannot return an invalid value.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use explorer_core::models::{City, DayFilter, FilterSelection, MonthFilter};
use tracing::debug;

/// Filter values supplied up-front (e.g. via CLI flags) that skip their
/// prompt for the first session.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterSeed {
    pub city: Option<City>,
    pub month: Option<MonthFilter>,
    pub day: Option<DayFilter>,
}

/// Collect a complete, validated [`FilterSelection`].
///
/// Presents the city, month and day prompts in order; each loops until the
/// input parses. Seeded values are used directly.
pub fn collect_filters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    seed: &FilterSeed,
) -> io::Result<FilterSelection> {
    let city = match seed.city {
        Some(city) => {
            debug!("city pre-selected: {}", city);
            city
        }
        None => prompt_parse(
            input,
            output,
            "Enter city name (Chicago, New York City, Washington): ",
            "Invalid city name. Please try again.",
        )?,
    };

    let month = match seed.month {
        Some(month) => month,
        None => prompt_parse(
            input,
            output,
            "Enter month name (all, january, february, ... , june): ",
            "Invalid month name. Please try again.",
        )?,
    };

    let day = match seed.day {
        Some(day) => day,
        None => prompt_parse(
            input,
            output,
            "Enter day of week (all, monday, tuesday, ... , sunday): ",
            "Invalid day name. Please try again.",
        )?,
    };

    Ok(FilterSelection { city, month, day })
}

/// Ask a yes/no question. Only a (case-insensitive) "yes" counts as yes.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    writeln!(output, "{}", question)?;
    output.flush()?;

    let line = read_line(input)?;
    Ok(line.trim().eq_ignore_ascii_case("yes"))
}

/// Prompt until the trimmed input parses as `T`.
fn prompt_parse<T: FromStr, R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    error_line: &str,
) -> io::Result<T> {
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let line = read_line(input)?;
        match line.trim().parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "{}", error_line)?,
        }
    }
}

/// Read one line, treating end-of-stream as an error so a closed stdin can
/// never spin the prompt loop.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input stream closed",
        ));
    }
    Ok(line)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
