//! The four statistics aggregators.
//!
//! All are pure functions over a borrowed [`Dataset`]; none mutate anything,
//! so repeated calls on the same dataset always agree. Mode computations
//! break ties deterministically in favour of the smallest value.

use std::collections::BTreeMap;

use chrono::Weekday;
use explorer_core::models::{Dataset, TripRecord};

// ── Mode helper ───────────────────────────────────────────────────────────────

/// Most frequent key produced by `key_fn`, or `None` for an empty dataset.
///
/// Counts into a `BTreeMap` and only replaces the running best on a strictly
/// greater count, so ties resolve to the smallest key.
fn mode_by_key<K: Ord>(dataset: &Dataset, key_fn: impl Fn(&TripRecord) -> K) -> Option<K> {
    let mut counts: BTreeMap<K, u64> = BTreeMap::new();
    for record in dataset.records() {
        *counts.entry(key_fn(record)).or_insert(0) += 1;
    }

    let mut best: Option<(K, u64)> = None;
    for (key, count) in counts {
        match &best {
            Some((_, best_count)) if *best_count >= count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(key, _)| key)
}

/// Monday-first weekday order used for the day-of-week mode.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ── Time stats ────────────────────────────────────────────────────────────────

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Most common month (1-based).
    pub common_month: u32,
    /// Most common day of week.
    pub common_day: Weekday,
    /// Most common start hour (0-23).
    pub common_hour: u32,
}

/// Compute the most common month, weekday and start hour.
///
/// Returns `None` on an empty dataset.
pub fn time_stats(dataset: &Dataset) -> Option<TimeStats> {
    let common_month = mode_by_key(dataset, |r| r.month)?;
    let day_index = mode_by_key(dataset, |r| r.weekday.num_days_from_monday())?;
    let common_hour = mode_by_key(dataset, |r| r.hour)?;

    Some(TimeStats {
        common_month,
        common_day: WEEKDAYS[day_index as usize],
        common_hour,
    })
}

// ── Station stats ─────────────────────────────────────────────────────────────

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub common_start_station: String,
    pub common_end_station: String,
    /// Most frequent `"<start> to <end>"` combination.
    pub common_trip: String,
}

/// Compute the most common start station, end station and trip combination.
///
/// Returns `None` on an empty dataset.
pub fn station_stats(dataset: &Dataset) -> Option<StationStats> {
    let common_start_station = mode_by_key(dataset, |r| r.start_station.clone())?;
    let common_end_station = mode_by_key(dataset, |r| r.end_station.clone())?;
    let common_trip = mode_by_key(dataset, |r| format!("{} to {}", r.start_station, r.end_station))?;

    Some(StationStats {
        common_start_station,
        common_end_station,
        common_trip,
    })
}

// ── Trip duration stats ───────────────────────────────────────────────────────

/// Total and average trip duration, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDurationStats {
    /// Sum of all trip durations; 0.0 for an empty dataset.
    pub total_seconds: f64,
    /// Arithmetic mean; `None` for an empty dataset.
    pub mean_seconds: Option<f64>,
    /// Number of trips summed.
    pub trip_count: usize,
}

pub fn trip_duration_stats(dataset: &Dataset) -> TripDurationStats {
    let trip_count = dataset.len();
    let total_seconds: f64 = dataset.records().iter().map(|r| r.trip_duration).sum();
    let mean_seconds = if trip_count == 0 {
        None
    } else {
        Some(total_seconds / trip_count as f64)
    };

    TripDurationStats {
        total_seconds,
        mean_seconds,
        trip_count,
    }
}

// ── User stats ────────────────────────────────────────────────────────────────

/// Summary of an optional demographic column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionalColumnStats<T> {
    /// The column exists and produced a summary.
    Available(T),
    /// The column exists but the filtered dataset carries no values.
    NoValues,
    /// The city's export does not record this column.
    NotRecorded,
}

/// Integer birth-year extremes and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Distinct user types with occurrence counts, ordered by descending
    /// count; ties keep first-seen order.
    pub user_type_counts: Vec<(String, u64)>,
    /// Gender counts, where the city records them.
    pub gender_counts: OptionalColumnStats<Vec<(String, u64)>>,
    /// Birth-year statistics, where the city records them.
    pub birth_year: OptionalColumnStats<BirthYearStats>,
}

pub fn user_stats(dataset: &Dataset) -> UserStats {
    UserStats {
        user_type_counts: count_by_descending(
            dataset.records().iter().map(|r| r.user_type.as_str()),
        ),
        gender_counts: gender_counts(dataset),
        birth_year: birth_year_stats(dataset),
    }
}

fn gender_counts(dataset: &Dataset) -> OptionalColumnStats<Vec<(String, u64)>> {
    if !dataset.has_gender() {
        return OptionalColumnStats::NotRecorded;
    }

    let counts = count_by_descending(
        dataset
            .records()
            .iter()
            .filter_map(|r| r.gender.as_deref()),
    );
    if counts.is_empty() {
        OptionalColumnStats::NoValues
    } else {
        OptionalColumnStats::Available(counts)
    }
}

fn birth_year_stats(dataset: &Dataset) -> OptionalColumnStats<BirthYearStats> {
    if !dataset.has_birth_year() {
        return OptionalColumnStats::NotRecorded;
    }

    let years: Vec<i32> = dataset
        .records()
        .iter()
        .filter_map(|r| r.birth_year)
        .collect();
    if years.is_empty() {
        return OptionalColumnStats::NoValues;
    }

    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for year in &years {
        *counts.entry(*year).or_insert(0) += 1;
    }
    let mut most_common = None;
    for (year, count) in counts {
        match most_common {
            Some((_, best)) if best >= count => {}
            _ => most_common = Some((year, count)),
        }
    }

    OptionalColumnStats::Available(BirthYearStats {
        earliest: *years.iter().min().unwrap_or(&0),
        most_recent: *years.iter().max().unwrap_or(&0),
        most_common: most_common.map(|(year, _)| year).unwrap_or(0),
    })
}

/// Count distinct values, returning them by descending count with first-seen
/// order breaking ties (stable sort over insertion order).
fn count_by_descending<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, u64)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for value in values {
        if !counts.contains_key(value) {
            order.push(value.to_string());
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    let mut result: Vec<(String, u64)> = order
        .into_iter()
        .map(|v| {
            let count = counts[&v];
            (v, count)
        })
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use explorer_core::models::TripRecord;

    fn ts(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    fn trip(
        start: NaiveDateTime,
        from: &str,
        to: &str,
        duration: f64,
        user_type: &str,
        gender: Option<&str>,
        birth_year: Option<i32>,
    ) -> TripRecord {
        TripRecord::new(
            start,
            None,
            from.to_string(),
            to.to_string(),
            duration,
            user_type.to_string(),
            gender.map(|g| g.to_string()),
            birth_year,
        )
    }

    fn dataset(records: Vec<TripRecord>) -> Dataset {
        Dataset::new(records, true, true)
    }

    // ── time_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_time_stats_most_common_values() {
        // Two June trips (one Monday, one Saturday), one January Monday trip;
        // hours 9, 9, 17.
        let ds = dataset(vec![
            trip(ts(6, 5, 9), "A", "B", 100.0, "Subscriber", None, None),
            trip(ts(6, 3, 9), "A", "B", 100.0, "Subscriber", None, None),
            trip(ts(1, 2, 17), "A", "B", 100.0, "Subscriber", None, None),
        ]);
        let stats = time_stats(&ds).unwrap();
        assert_eq!(stats.common_month, 6);
        assert_eq!(stats.common_day, Weekday::Mon);
        assert_eq!(stats.common_hour, 9);
    }

    #[test]
    fn test_time_stats_empty_dataset() {
        assert!(time_stats(&Dataset::default()).is_none());
    }

    #[test]
    fn test_time_stats_tie_breaks_to_smallest() {
        // Months 1 and 6 appear once each; hour 8 and 20 once each.
        let ds = dataset(vec![
            trip(ts(6, 3, 20), "A", "B", 100.0, "Subscriber", None, None),
            trip(ts(1, 2, 8), "A", "B", 100.0, "Subscriber", None, None),
        ]);
        let stats = time_stats(&ds).unwrap();
        assert_eq!(stats.common_month, 1);
        assert_eq!(stats.common_hour, 8);
        // 2017-01-02 Monday vs 2017-06-03 Saturday: Monday wins the tie.
        assert_eq!(stats.common_day, Weekday::Mon);
    }

    #[test]
    fn test_time_stats_idempotent() {
        let ds = dataset(vec![
            trip(ts(3, 8, 7), "A", "B", 100.0, "Subscriber", None, None),
            trip(ts(4, 9, 8), "A", "B", 100.0, "Subscriber", None, None),
        ]);
        assert_eq!(time_stats(&ds), time_stats(&ds));
    }

    // ── station_stats ─────────────────────────────────────────────────────────

    #[test]
    fn test_station_stats_most_common() {
        let ds = dataset(vec![
            trip(ts(1, 2, 9), "Canal St", "State St", 100.0, "Subscriber", None, None),
            trip(ts(1, 3, 9), "Canal St", "State St", 100.0, "Subscriber", None, None),
            trip(ts(1, 4, 9), "Clark St", "Lake St", 100.0, "Subscriber", None, None),
        ]);
        let stats = station_stats(&ds).unwrap();
        assert_eq!(stats.common_start_station, "Canal St");
        assert_eq!(stats.common_end_station, "State St");
        assert_eq!(stats.common_trip, "Canal St to State St");
    }

    #[test]
    fn test_station_stats_trip_is_a_pair_not_independent_modes() {
        // "A" is the modal start and "D" the modal end, but they never occur
        // together; the modal pair is "B to C".
        let ds = dataset(vec![
            trip(ts(1, 2, 9), "A", "C", 100.0, "Subscriber", None, None),
            trip(ts(1, 3, 9), "A", "D", 100.0, "Subscriber", None, None),
            trip(ts(1, 4, 9), "A", "D", 100.0, "Subscriber", None, None),
            trip(ts(1, 5, 9), "B", "C", 100.0, "Subscriber", None, None),
            trip(ts(1, 6, 9), "B", "C", 100.0, "Subscriber", None, None),
            trip(ts(1, 7, 9), "B", "C", 100.0, "Subscriber", None, None),
        ]);
        let stats = station_stats(&ds).unwrap();
        assert_eq!(stats.common_start_station, "A");
        assert_eq!(stats.common_trip, "B to C");
    }

    #[test]
    fn test_station_stats_tie_breaks_lexicographically_smallest() {
        let ds = dataset(vec![
            trip(ts(1, 2, 9), "Zoo", "Zoo", 100.0, "Subscriber", None, None),
            trip(ts(1, 3, 9), "Aquarium", "Aquarium", 100.0, "Subscriber", None, None),
        ]);
        let stats = station_stats(&ds).unwrap();
        assert_eq!(stats.common_start_station, "Aquarium");
    }

    #[test]
    fn test_station_stats_empty_dataset() {
        assert!(station_stats(&Dataset::default()).is_none());
    }

    // ── trip_duration_stats ───────────────────────────────────────────────────

    #[test]
    fn test_trip_duration_totals_and_mean() {
        let ds = dataset(vec![
            trip(ts(1, 2, 9), "A", "B", 100.0, "Subscriber", None, None),
            trip(ts(1, 3, 9), "A", "B", 200.0, "Subscriber", None, None),
            trip(ts(1, 4, 9), "A", "B", 300.0, "Subscriber", None, None),
        ]);
        let stats = trip_duration_stats(&ds);
        assert_eq!(stats.total_seconds, 600.0);
        assert_eq!(stats.mean_seconds, Some(200.0));
        assert_eq!(stats.trip_count, 3);
    }

    #[test]
    fn test_trip_duration_empty_dataset() {
        let stats = trip_duration_stats(&Dataset::default());
        assert_eq!(stats.total_seconds, 0.0);
        assert_eq!(stats.mean_seconds, None);
        assert_eq!(stats.trip_count, 0);
    }

    // ── user_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_user_stats_type_counts_descending() {
        let ds = dataset(vec![
            trip(ts(1, 2, 9), "A", "B", 100.0, "Customer", None, None),
            trip(ts(1, 3, 9), "A", "B", 100.0, "Subscriber", None, None),
            trip(ts(1, 4, 9), "A", "B", 100.0, "Subscriber", None, None),
        ]);
        let stats = user_stats(&ds);
        assert_eq!(
            stats.user_type_counts,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
    }

    #[test]
    fn test_user_stats_type_ties_keep_first_seen_order() {
        let ds = dataset(vec![
            trip(ts(1, 2, 9), "A", "B", 100.0, "Dependent", None, None),
            trip(ts(1, 3, 9), "A", "B", 100.0, "Customer", None, None),
        ]);
        let stats = user_stats(&ds);
        assert_eq!(stats.user_type_counts[0].0, "Dependent");
        assert_eq!(stats.user_type_counts[1].0, "Customer");
    }

    #[test]
    fn test_user_stats_gender_counts() {
        let ds = dataset(vec![
            trip(ts(1, 2, 9), "A", "B", 100.0, "Subscriber", Some("Male"), Some(1985)),
            trip(ts(1, 3, 9), "A", "B", 100.0, "Subscriber", Some("Female"), Some(1992)),
            trip(ts(1, 4, 9), "A", "B", 100.0, "Subscriber", Some("Female"), Some(1992)),
        ]);
        let stats = user_stats(&ds);
        assert_eq!(
            stats.gender_counts,
            OptionalColumnStats::Available(vec![
                ("Female".to_string(), 2),
                ("Male".to_string(), 1)
            ])
        );
    }

    #[test]
    fn test_user_stats_birth_year_min_max_mode() {
        let ds = dataset(vec![
            trip(ts(1, 2, 9), "A", "B", 100.0, "Subscriber", None, Some(1985)),
            trip(ts(1, 3, 9), "A", "B", 100.0, "Subscriber", None, Some(1992)),
            trip(ts(1, 4, 9), "A", "B", 100.0, "Subscriber", None, Some(1992)),
            trip(ts(1, 5, 9), "A", "B", 100.0, "Subscriber", None, Some(2001)),
        ]);
        let stats = user_stats(&ds);
        assert_eq!(
            stats.birth_year,
            OptionalColumnStats::Available(BirthYearStats {
                earliest: 1985,
                most_recent: 2001,
                most_common: 1992,
            })
        );
    }

    #[test]
    fn test_user_stats_unrecorded_columns_reported_explicitly() {
        // Washington-style schema: no Gender or Birth Year columns.
        let records = vec![trip(ts(1, 2, 9), "A", "B", 100.0, "Subscriber", None, None)];
        let ds = Dataset::new(records, false, false);

        let stats = user_stats(&ds);
        assert_eq!(stats.gender_counts, OptionalColumnStats::NotRecorded);
        assert_eq!(stats.birth_year, OptionalColumnStats::NotRecorded);
        // The other sections still run.
        assert_eq!(stats.user_type_counts.len(), 1);
    }

    #[test]
    fn test_user_stats_recorded_column_with_no_values() {
        let records = vec![trip(ts(1, 2, 9), "A", "B", 100.0, "Subscriber", None, None)];
        let ds = Dataset::new(records, true, true);

        let stats = user_stats(&ds);
        assert_eq!(stats.gender_counts, OptionalColumnStats::NoValues);
        assert_eq!(stats.birth_year, OptionalColumnStats::NoValues);
    }

    #[test]
    fn test_user_stats_empty_dataset() {
        let stats = user_stats(&Dataset::default());
        assert!(stats.user_type_counts.is_empty());
        assert_eq!(stats.gender_counts, OptionalColumnStats::NotRecorded);
    }
}
