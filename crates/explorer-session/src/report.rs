//! Plain-text rendering of the aggregate statistics and raw-data pages.

use std::io::{self, Write};
use std::time::Instant;

use explorer_core::formatting::{format_duration, format_number};
use explorer_core::models::{month_name, weekday_name, Dataset, TripRecord};
use explorer_data::pager::Page;
use explorer_data::stats::{
    station_stats, time_stats, trip_duration_stats, user_stats, OptionalColumnStats,
};

const NO_DATA: &str = "No trips match this filter.";

/// The `----` rule printed between report sections.
pub fn divider<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(40))
}

/// Run all four aggregators over `dataset` and render their reports.
///
/// Each section always renders, even when another section has nothing to
/// show; an empty dataset produces explicit "no data" lines rather than an
/// error.
pub fn render_analysis<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    render_time_section(out, dataset)?;
    render_station_section(out, dataset)?;
    render_duration_section(out, dataset)?;
    render_user_section(out, dataset)?;
    Ok(())
}

fn render_time_section<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
    let started = Instant::now();

    match time_stats(dataset) {
        Some(stats) => {
            writeln!(out, "Most Common Month: {}", month_name(stats.common_month))?;
            writeln!(
                out,
                "Most Common Day of Week: {}",
                weekday_name(stats.common_day)
            )?;
            writeln!(out, "Most Common Start Hour: {}", stats.common_hour)?;
        }
        None => writeln!(out, "{}", NO_DATA)?,
    }

    finish_section(out, started)
}

fn render_station_section<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;
    let started = Instant::now();

    match station_stats(dataset) {
        Some(stats) => {
            writeln!(
                out,
                "Most Commonly Used Start Station: {}",
                stats.common_start_station
            )?;
            writeln!(
                out,
                "Most Commonly Used End Station: {}",
                stats.common_end_station
            )?;
            writeln!(out, "Most Frequent Trip: {}", stats.common_trip)?;
        }
        None => writeln!(out, "{}", NO_DATA)?,
    }

    finish_section(out, started)
}

fn render_duration_section<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "\nCalculating Trip Duration...\n")?;
    let started = Instant::now();

    let stats = trip_duration_stats(dataset);
    writeln!(
        out,
        "Total Travel Time: {} seconds ({})",
        format_number(stats.total_seconds, 0),
        format_duration(stats.total_seconds)
    )?;
    match stats.mean_seconds {
        Some(mean) => writeln!(
            out,
            "Mean Travel Time: {} seconds ({})",
            format_number(mean, 1),
            format_duration(mean)
        )?,
        None => writeln!(out, "Mean Travel Time: no data")?,
    }

    finish_section(out, started)
}

fn render_user_section<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "\nCalculating User Stats...\n")?;
    let started = Instant::now();

    let stats = user_stats(dataset);

    if stats.user_type_counts.is_empty() {
        writeln!(out, "{}", NO_DATA)?;
    } else {
        writeln!(out, "Counts of User Types:")?;
        for (user_type, count) in &stats.user_type_counts {
            writeln!(out, "  {}: {}", user_type, format_number(*count as f64, 0))?;
        }
    }

    match &stats.gender_counts {
        OptionalColumnStats::Available(counts) => {
            writeln!(out, "Counts of Gender:")?;
            for (gender, count) in counts {
                writeln!(out, "  {}: {}", gender, format_number(*count as f64, 0))?;
            }
        }
        OptionalColumnStats::NoValues => writeln!(out, "No gender data for this filter.")?,
        OptionalColumnStats::NotRecorded => {
            writeln!(out, "Gender information is not available for this city.")?
        }
    }

    match &stats.birth_year {
        OptionalColumnStats::Available(years) => {
            writeln!(out, "Earliest Birth Year: {}", years.earliest)?;
            writeln!(out, "Most Recent Birth Year: {}", years.most_recent)?;
            writeln!(out, "Most Common Birth Year: {}", years.most_common)?;
        }
        OptionalColumnStats::NoValues => writeln!(out, "No birth year data for this filter.")?,
        OptionalColumnStats::NotRecorded => {
            writeln!(out, "Birth year information is not available for this city.")?
        }
    }

    finish_section(out, started)
}

fn finish_section<W: Write>(out: &mut W, started: Instant) -> io::Result<()> {
    writeln!(
        out,
        "\nThis took {:.4} seconds.",
        started.elapsed().as_secs_f64()
    )?;
    divider(out)
}

// ── Raw data ──────────────────────────────────────────────────────────────────

/// Render one page of raw records, numbering rows from `start_row`.
pub fn render_page<W: Write>(out: &mut W, page: &Page<'_>, start_row: usize) -> io::Result<()> {
    writeln!(out, "\nDisplaying raw data...\n")?;

    if page.records.is_empty() {
        writeln!(out, "No rows to display.")?;
    } else {
        for (offset, record) in page.records.iter().enumerate() {
            writeln!(out, "{:>5}  {}", start_row + offset, format_record(record))?;
        }
    }

    divider(out)
}

fn format_record(record: &TripRecord) -> String {
    let mut line = format!(
        "{} | {} | {} -> {} | {}",
        record.start_time.format("%Y-%m-%d %H:%M:%S"),
        format_duration(record.trip_duration),
        record.start_station,
        record.end_station,
        record.user_type,
    );
    if let Some(gender) = &record.gender {
        line.push_str(&format!(" | {}", gender));
    }
    if let Some(year) = record.birth_year {
        line.push_str(&format!(" | born {}", year));
    }
    line
}

// ── Tests ─────────────────────────────────────────────────────────────────────
