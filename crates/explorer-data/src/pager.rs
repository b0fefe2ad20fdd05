//! Sequential raw-data paging over a filtered dataset.

use explorer_core::models::{Dataset, TripRecord};

/// Number of raw rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// One window of raw records.
#[derive(Debug)]
pub struct Page<'a> {
    /// Up to [`PAGE_SIZE`] records, clipped to the dataset bounds.
    pub records: &'a [TripRecord],
    /// Whether another non-empty page follows this one.
    pub has_more: bool,
}

/// Return the records in `[start_row, start_row + PAGE_SIZE)`.
///
/// Out-of-range start rows yield an empty page, never an error.
pub fn page(dataset: &Dataset, start_row: usize) -> Page<'_> {
    let len = dataset.len();
    let start = start_row.min(len);
    let end = start_row.saturating_add(PAGE_SIZE).min(len);

    Page {
        records: &dataset.records()[start..end],
        has_more: start_row.saturating_add(PAGE_SIZE) < len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use explorer_core::models::TripRecord;

    fn twelve_records() -> Dataset {
        let records = (0..12)
            .map(|i| {
                TripRecord::new(
                    NaiveDate::from_ymd_opt(2017, 1, 1 + i)
                        .unwrap()
                        .and_hms_opt(9, 0, 0)
                        .unwrap(),
                    None,
                    format!("start-{i}"),
                    format!("end-{i}"),
                    60.0,
                    "Subscriber".to_string(),
                    None,
                    None,
                )
            })
            .collect();
        Dataset::new(records, false, false)
    }

    #[test]
    fn test_successive_pages_over_twelve_records() {
        let ds = twelve_records();

        let first = page(&ds, 0);
        assert_eq!(first.records.len(), 5);
        assert!(first.has_more);
        assert_eq!(first.records[0].start_station, "start-0");

        let second = page(&ds, 5);
        assert_eq!(second.records.len(), 5);
        assert!(second.has_more);
        assert_eq!(second.records[0].start_station, "start-5");

        let third = page(&ds, 10);
        assert_eq!(third.records.len(), 2);
        assert!(!third.has_more);
        assert_eq!(third.records[1].start_station, "start-11");
    }

    #[test]
    fn test_out_of_range_start_is_empty_page() {
        let ds = twelve_records();
        let p = page(&ds, 100);
        assert!(p.records.is_empty());
        assert!(!p.has_more);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::default();
        let p = page(&ds, 0);
        assert!(p.records.is_empty());
        assert!(!p.has_more);
    }

    #[test]
    fn test_exact_multiple_boundary() {
        let ds = twelve_records();
        // Rows 7..12 exist; starting at 7 yields 5 rows with nothing after.
        let p = page(&ds, 7);
        assert_eq!(p.records.len(), 5);
        assert!(!p.has_more);
    }
}
