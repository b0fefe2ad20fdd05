//! CSV loading and filtering for the Bikeshare Explorer.
//!
//! Reads a city's trip-history export into [`TripRecord`]s, derives the
//! temporal fields once at load time, and applies the month/day filters.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use explorer_core::error::{ExplorerError, Result};
use explorer_core::models::{Dataset, FilterSelection, TripRecord};
use explorer_core::timestamps::parse_trip_time;

use crate::sources::CitySources;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the selected city's export and apply the month/day filters.
///
/// Rows whose Start Time does not parse are skipped with a warning; a missing
/// or unreadable file is fatal for the load attempt.
pub fn load_dataset(sources: &CitySources, selection: &FilterSelection) -> Result<Dataset> {
    let path = sources.resolve(selection.city)?;
    let dataset = read_trip_csv(&path)?;

    debug!(
        "Loaded {} records from {} for {}",
        dataset.len(),
        path.display(),
        selection.city
    );

    Ok(filter_dataset(&dataset, selection))
}

/// Apply the month/day filters as a pure, order-preserving selection.
pub fn filter_dataset(dataset: &Dataset, selection: &FilterSelection) -> Dataset {
    let month = selection.month.number();
    let weekday = selection.day.weekday();

    dataset.filtered(|record| {
        month.map_or(true, |m| record.month == m)
            && weekday.map_or(true, |w| record.weekday == w)
    })
}

/// Parse a trip-history CSV into an unfiltered [`Dataset`].
///
/// Optional-column presence (Gender, Birth Year) is detected once from the
/// header and recorded on the dataset.
pub fn read_trip_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|source| ExplorerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let columns = Columns::from_headers(&headers, path)?;

    let mut records: Vec<TripRecord> = Vec::new();
    let mut rows_read = 0u64;
    let mut rows_skipped = 0u64;

    for row_result in reader.records() {
        let row = row_result?;
        rows_read += 1;

        match columns.parse_row(&row) {
            Some(record) => records.push(record),
            None => {
                rows_skipped += 1;
                warn!(
                    "Skipping row {} of {}: unparseable start time or duration",
                    rows_read,
                    path.display()
                );
            }
        }
    }

    debug!(
        "File {}: {} rows read, {} skipped",
        path.display(),
        rows_read,
        rows_skipped
    );

    Ok(Dataset::new(
        records,
        columns.gender.is_some(),
        columns.birth_year.is_some(),
    ))
}

// ── Column layout ─────────────────────────────────────────────────────────────

/// Header indices for one export, resolved once per file.
struct Columns {
    start_time: usize,
    end_time: Option<usize>,
    start_station: usize,
    end_station: usize,
    trip_duration: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| ExplorerError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            start_time: require("Start Time")?,
            end_time: find("End Time"),
            start_station: require("Start Station")?,
            end_station: require("End Station")?,
            trip_duration: require("Trip Duration")?,
            user_type: require("User Type")?,
            gender: find("Gender"),
            birth_year: find("Birth Year"),
        })
    }

    /// Convert one CSV row to a [`TripRecord`].
    ///
    /// Returns `None` when the start time or duration does not parse; such
    /// rows are skipped rather than failing the load.
    fn parse_row(&self, row: &StringRecord) -> Option<TripRecord> {
        let start_time = parse_trip_time(row.get(self.start_time)?)?;
        let trip_duration: f64 = row.get(self.trip_duration)?.parse().ok()?;

        let end_time = self
            .end_time
            .and_then(|i| row.get(i))
            .and_then(parse_trip_time);

        let field = |i: usize| row.get(i).unwrap_or_default().to_string();

        // Gender cells are frequently blank even where the column exists.
        let gender = self
            .gender
            .and_then(|i| row.get(i))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        // Birth years are exported as floats ("1992.0"); truncate to integer.
        let birth_year = self
            .birth_year
            .and_then(|i| row.get(i))
            .and_then(|s| s.parse::<f64>().ok())
            .map(|y| y as i32);

        Some(TripRecord::new(
            start_time,
            end_time,
            field(self.start_station),
            field(self.end_station),
            trip_duration,
            field(self.user_type),
            gender,
            birth_year,
        ))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
