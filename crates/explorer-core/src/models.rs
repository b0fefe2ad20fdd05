use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::fmt;
use std::str::FromStr;

use crate::error::ExplorerError;

// ── Filter enums ──────────────────────────────────────────────────────────────

/// One of the three cities with published trip-history exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All supported cities, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for City {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            other => Err(ExplorerError::InvalidFilter(other.to_string())),
        }
    }
}

/// Month filter. The published exports cover January through June only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    January,
    February,
    March,
    April,
    May,
    June,
}

impl MonthFilter {
    /// 1-based month number, or `None` for [`MonthFilter::All`].
    pub fn number(self) -> Option<u32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::January => Some(1),
            MonthFilter::February => Some(2),
            MonthFilter::March => Some(3),
            MonthFilter::April => Some(4),
            MonthFilter::May => Some(5),
            MonthFilter::June => Some(6),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonthFilter::All => "all",
            MonthFilter::January => "January",
            MonthFilter::February => "February",
            MonthFilter::March => "March",
            MonthFilter::April => "April",
            MonthFilter::May => "May",
            MonthFilter::June => "June",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MonthFilter {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(MonthFilter::All),
            "january" => Ok(MonthFilter::January),
            "february" => Ok(MonthFilter::February),
            "march" => Ok(MonthFilter::March),
            "april" => Ok(MonthFilter::April),
            "may" => Ok(MonthFilter::May),
            "june" => Ok(MonthFilter::June),
            other => Err(ExplorerError::InvalidFilter(other.to_string())),
        }
    }
}

/// Day-of-week filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayFilter {
    /// The chrono weekday this filter selects, or `None` for `All`.
    pub fn weekday(self) -> Option<Weekday> {
        match self {
            DayFilter::All => None,
            DayFilter::Monday => Some(Weekday::Mon),
            DayFilter::Tuesday => Some(Weekday::Tue),
            DayFilter::Wednesday => Some(Weekday::Wed),
            DayFilter::Thursday => Some(Weekday::Thu),
            DayFilter::Friday => Some(Weekday::Fri),
            DayFilter::Saturday => Some(Weekday::Sat),
            DayFilter::Sunday => Some(Weekday::Sun),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayFilter::All => "all",
            DayFilter::Monday => "Monday",
            DayFilter::Tuesday => "Tuesday",
            DayFilter::Wednesday => "Wednesday",
            DayFilter::Thursday => "Thursday",
            DayFilter::Friday => "Friday",
            DayFilter::Saturday => "Saturday",
            DayFilter::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DayFilter {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DayFilter::All),
            "monday" => Ok(DayFilter::Monday),
            "tuesday" => Ok(DayFilter::Tuesday),
            "wednesday" => Ok(DayFilter::Wednesday),
            "thursday" => Ok(DayFilter::Thursday),
            "friday" => Ok(DayFilter::Friday),
            "saturday" => Ok(DayFilter::Saturday),
            "sunday" => Ok(DayFilter::Sunday),
            other => Err(ExplorerError::InvalidFilter(other.to_string())),
        }
    }
}

/// One complete filter choice, collected fresh for every analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

// ── Weekday / month names ─────────────────────────────────────────────────────

/// Full English weekday name for a chrono [`Weekday`].
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// English month name for a 1-based month number. Falls back to the raw
/// number for out-of-range input.
pub fn month_name(month: u32) -> String {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    match NAMES.get(month.wrapping_sub(1) as usize) {
        Some(name) => (*name).to_string(),
        None => month.to_string(),
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// One trip-history row, with temporal fields derived once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// When the trip started. Always present and parseable.
    pub start_time: NaiveDateTime,
    /// When the trip ended, where the export includes it.
    pub end_time: Option<NaiveDateTime>,
    /// Station the trip started from.
    pub start_station: String,
    /// Station the trip ended at.
    pub end_station: String,
    /// Trip length in seconds.
    pub trip_duration: f64,
    /// Rider category, e.g. "Subscriber" or "Customer".
    pub user_type: String,
    /// Rider gender, only present in the Chicago and New York exports.
    pub gender: Option<String>,
    /// Rider birth year, only present in the Chicago and New York exports.
    pub birth_year: Option<i32>,
    /// Derived: 1-based month of `start_time`.
    pub month: u32,
    /// Derived: weekday of `start_time`.
    pub weekday: Weekday,
    /// Derived: hour-of-day (0-23) of `start_time`.
    pub hour: u32,
}

impl TripRecord {
    /// Build a record, computing the derived month/weekday/hour fields from
    /// the start time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_time: NaiveDateTime,
        end_time: Option<NaiveDateTime>,
        start_station: String,
        end_station: String,
        trip_duration: f64,
        user_type: String,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        Self {
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
            end_time,
            start_station,
            end_station,
            trip_duration,
            user_type,
            gender,
            birth_year,
        }
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// An ordered, read-only table of trip records plus the schema capabilities
/// detected from the source CSV header.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TripRecord>,
    has_gender: bool,
    has_birth_year: bool,
}

impl Dataset {
    pub fn new(records: Vec<TripRecord>, has_gender: bool, has_birth_year: bool) -> Self {
        Self {
            records,
            has_gender,
            has_birth_year,
        }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source schema carried a Gender column.
    pub fn has_gender(&self) -> bool {
        self.has_gender
    }

    /// Whether the source schema carried a Birth Year column.
    pub fn has_birth_year(&self) -> bool {
        self.has_birth_year
    }

    /// A new dataset containing only the records for which `keep` returns
    /// `true`, preserving relative order. Schema flags carry over.
    pub fn filtered(&self, keep: impl Fn(&TripRecord) -> bool) -> Dataset {
        Dataset {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
            has_gender: self.has_gender,
            has_birth_year: self.has_birth_year,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
