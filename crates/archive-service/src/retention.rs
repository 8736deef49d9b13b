//! Destruction date calculation.

use chrono::{Datelike, NaiveDate};

use archive_entity::Retention;

/// December 31 of `entry_date`'s year plus `storage_years`.
///
/// Returns `None` only when the resulting year is outside the calendar
/// range `chrono` supports.
pub fn destruction_date(entry_date: NaiveDate, storage_years: u32) -> Option<NaiveDate> {
    let year = i32::try_from(storage_years)
        .ok()
        .and_then(|years| entry_date.year().checked_add(years))?;
    NaiveDate::from_ymd_opt(year, 12, 31)
}

/// Retention of a document with the given inputs. Indestructible documents
/// never carry a date.
pub fn retention_for(
    entry_date: NaiveDate,
    storage_years: u32,
    indestructible: bool,
) -> Option<Retention> {
    if indestructible {
        return Some(Retention::Indestructible);
    }
    destruction_date(entry_date, storage_years)
        .map(|destruction_date| Retention::Destructible { destruction_date })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_of_year_after_storage_period() {
        assert_eq!(destruction_date(date(2020, 6, 1), 5), Some(date(2025, 12, 31)));
        assert_eq!(destruction_date(date(2020, 12, 31), 0), Some(date(2020, 12, 31)));
        assert_eq!(destruction_date(date(2020, 1, 1), 10), Some(date(2030, 12, 31)));
    }

    #[test]
    fn test_out_of_range_year() {
        assert_eq!(destruction_date(date(2020, 1, 1), u32::MAX), None);
    }

    #[test]
    fn test_indestructible_has_no_date() {
        assert_eq!(
            retention_for(date(2020, 6, 1), 5, true),
            Some(Retention::Indestructible)
        );
        assert_eq!(
            retention_for(date(2020, 6, 1), 5, false),
            Some(Retention::Destructible {
                destruction_date: date(2025, 12, 31)
            })
        );
    }

    proptest! {
        #[test]
        fn prop_destruction_is_dec_31(days in 0i64..40_000, years in 0u32..200) {
            let entry = date(1950, 1, 1) + chrono::Duration::days(days);
            let destroy = destruction_date(entry, years).unwrap();
            prop_assert_eq!(destroy.month(), 12);
            prop_assert_eq!(destroy.day(), 31);
            prop_assert_eq!(destroy.year(), entry.year() + years as i32);
            prop_assert!(destroy >= entry);
        }

        #[test]
        fn prop_indestructible_never_dated(days in 0i64..40_000, years in 0u32..200) {
            let entry = date(1950, 1, 1) + chrono::Duration::days(days);
            let retention = retention_for(entry, years, true).unwrap();
            prop_assert_eq!(retention.destruction_date(), None);
            prop_assert!(retention.is_indestructible());
        }
    }
}
