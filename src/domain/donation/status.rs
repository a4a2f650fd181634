//! Donation status state machine.
//!
//! A record starts as CREATED when the checkout session is opened and moves
//! forward as the processor reports progress. SUCCESS and FAILED are final.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Payment status of a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    /// Checkout session opened, no callback yet.
    Created,

    /// Processor acknowledged the payment but has not settled it.
    Pending,

    /// Payment settled.
    Success,

    /// Payment failed or expired.
    Failed,

    /// Processor reported a status we do not recognize.
    Unknown,
}

impl DonationStatus {
    /// Maps a processor status string, case-insensitively.
    ///
    /// - `SUCCESS` -> Success
    /// - `PENDING` -> Pending
    /// - `FAILED`, `FAILURE`, `EXPIRED` -> Failed
    /// - anything else -> Unknown
    pub fn from_processor(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => DonationStatus::Success,
            "PENDING" => DonationStatus::Pending,
            "FAILED" | "FAILURE" | "EXPIRED" => DonationStatus::Failed,
            _ => DonationStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Created => "CREATED",
            DonationStatus::Pending => "PENDING",
            DonationStatus::Success => "SUCCESS",
            DonationStatus::Failed => "FAILED",
            DonationStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for DonationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DonationStatus::*;
        matches!(
            (self, target),
            // From CREATED
            (Created, Pending)
                | (Created, Success)
                | (Created, Failed)
                | (Created, Unknown)
            // From PENDING
                | (Pending, Success)
                | (Pending, Failed)
                | (Pending, Unknown)
            // From UNKNOWN
                | (Unknown, Pending)
                | (Unknown, Success)
                | (Unknown, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DonationStatus::*;
        match self {
            Created => vec![Pending, Success, Failed, Unknown],
            Pending => vec![Success, Failed, Unknown],
            Unknown => vec![Pending, Success, Failed],
            Success | Failed => vec![],
        }
    }
}
