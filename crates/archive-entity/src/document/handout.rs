//! Hand-out state machine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use archive_core::AppError;

use crate::user::User;

/// Details of a document currently handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOut {
    /// Who holds the document.
    pub recipient: User,
    /// When it was handed out.
    pub date: NaiveDate,
    /// Why it was handed out.
    pub reason: String,
}

/// Hand-out status: `Available` ⇄ `HandedOut`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HandOutStatus {
    /// In storage.
    #[default]
    Available,
    /// Checked out to a recipient.
    HandedOut(HandOut),
}

/// Rejected hand-out transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandOutError {
    #[error("The document is already handed out to {holder}")]
    AlreadyHandedOut { holder: String },
    #[error("The document is not handed out")]
    NotHandedOut,
    #[error("A hand-out reason is required")]
    MissingReason,
}

impl From<HandOutError> for AppError {
    fn from(err: HandOutError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl HandOutStatus {
    /// Whether the document is currently handed out.
    pub fn is_handed_out(&self) -> bool {
        matches!(self, Self::HandedOut(_))
    }

    /// Current hand-out details.
    pub fn details(&self) -> Option<&HandOut> {
        match self {
            Self::HandedOut(h) => Some(h),
            Self::Available => None,
        }
    }

    /// Transition `Available` → `HandedOut`.
    pub fn hand_out(&self, hand_out: HandOut) -> Result<Self, HandOutError> {
        if hand_out.reason.trim().is_empty() {
            return Err(HandOutError::MissingReason);
        }
        match self {
            Self::Available => Ok(Self::HandedOut(hand_out)),
            Self::HandedOut(current) => Err(HandOutError::AlreadyHandedOut {
                holder: current.recipient.name.clone(),
            }),
        }
    }

    /// Transition `HandedOut` → `Available`.
    pub fn check_in(&self) -> Result<Self, HandOutError> {
        match self {
            Self::HandedOut(_) => Ok(Self::Available),
            Self::Available => Err(HandOutError::NotHandedOut),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_out(reason: &str) -> HandOut {
        HandOut {
            recipient: User::new(5, "Dana Weber"),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let status = HandOutStatus::Available;
        let out = status.hand_out(hand_out("Audit")).expect("hand out");
        assert!(out.is_handed_out());
        assert_eq!(out.details().unwrap().reason, "Audit");

        let back = out.check_in().expect("check in");
        assert_eq!(back, HandOutStatus::Available);
        assert!(back.details().is_none());
    }

    #[test]
    fn test_rejections() {
        let out = HandOutStatus::Available.hand_out(hand_out("Audit")).unwrap();
        assert!(matches!(
            out.hand_out(hand_out("Again")),
            Err(HandOutError::AlreadyHandedOut { .. })
        ));
        assert_eq!(
            HandOutStatus::Available.check_in(),
            Err(HandOutError::NotHandedOut)
        );
        assert_eq!(
            HandOutStatus::Available.hand_out(hand_out("  ")),
            Err(HandOutError::MissingReason)
        );
    }
}
