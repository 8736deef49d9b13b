//! Retention state of a document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use archive_core::AppError;

/// Whether and when a document is due for destruction.
///
/// Replaces the nullable destruction date paired with an indestructible
/// flag: a destructible document always carries its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "retention", rename_all = "snake_case")]
pub enum Retention {
    /// Destroyed once `destruction_date` has passed.
    Destructible {
        /// Scheduled destruction date.
        destruction_date: NaiveDate,
    },
    /// Kept indefinitely.
    Indestructible,
}

/// Why a destroy request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DestroyRejection {
    /// The destruction date has not been reached.
    #[error(
        "The document is not destroyed because the destruction date ({due}) has not yet been reached"
    )]
    NotYetDue {
        /// Scheduled destruction date.
        due: NaiveDate,
    },
    /// The document is flagged indestructible.
    #[error("This document is indestructible")]
    Indestructible,
}

impl From<DestroyRejection> for AppError {
    fn from(rejection: DestroyRejection) -> Self {
        AppError::validation(rejection.to_string())
    }
}

impl Retention {
    /// Build from the backend's nullable pair, `None` when the pair is inconsistent.
    pub fn from_parts(destruction_date: Option<NaiveDate>, indestructible: bool) -> Option<Self> {
        match (destruction_date, indestructible) {
            (_, true) => Some(Self::Indestructible),
            (Some(destruction_date), false) => Some(Self::Destructible { destruction_date }),
            (None, false) => None,
        }
    }

    /// Scheduled destruction date, if any.
    pub fn destruction_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Destructible { destruction_date } => Some(*destruction_date),
            Self::Indestructible => None,
        }
    }

    /// Whether the document is kept indefinitely.
    pub fn is_indestructible(&self) -> bool {
        matches!(self, Self::Indestructible)
    }

    /// Whether the destruction date lies strictly before `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.destruction_date().is_some_and(|date| date < today)
    }

    /// Check that a destroy request is allowed on `today`.
    pub fn check_destroy(&self, today: NaiveDate) -> Result<(), DestroyRejection> {
        match self {
            Self::Indestructible => Err(DestroyRejection::Indestructible),
            Self::Destructible { destruction_date } if *destruction_date < today => Ok(()),
            Self::Destructible { destruction_date } => Err(DestroyRejection::NotYetDue {
                due: *destruction_date,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_parts_enforces_pairing() {
        assert_eq!(
            Retention::from_parts(Some(date(2030, 12, 31)), true),
            Some(Retention::Indestructible)
        );
        assert_eq!(
            Retention::from_parts(Some(date(2030, 12, 31)), false),
            Some(Retention::Destructible {
                destruction_date: date(2030, 12, 31)
            })
        );
        assert_eq!(Retention::from_parts(None, false), None);
    }

    #[test]
    fn test_check_destroy() {
        let today = date(2024, 5, 10);
        let due_yesterday = Retention::Destructible {
            destruction_date: date(2024, 5, 9),
        };
        let due_today = Retention::Destructible {
            destruction_date: today,
        };
        let due_tomorrow = Retention::Destructible {
            destruction_date: date(2024, 5, 11),
        };

        assert_eq!(due_yesterday.check_destroy(today), Ok(()));
        assert_eq!(
            due_today.check_destroy(today),
            Err(DestroyRejection::NotYetDue { due: today })
        );
        assert!(matches!(
            due_tomorrow.check_destroy(today),
            Err(DestroyRejection::NotYetDue { .. })
        ));
        assert_eq!(
            Retention::Indestructible.check_destroy(today),
            Err(DestroyRejection::Indestructible)
        );
    }

    #[test]
    fn test_rejection_maps_to_validation() {
        let err: AppError = DestroyRejection::Indestructible.into();
        assert!(err.is_validation());
    }
}
