//! Operation outcomes reported by the lending engine
//!
//! Successful operations carry structured status values back to the caller;
//! rejections travel as [`crate::types::LendingError`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Physical state of a copy on return
///
/// Determines both the condition fine and whether the copy re-enters
/// circulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnCondition {
    /// Copy is intact and returns to the available pool
    Good,
    /// Copy is damaged: flat fine, copy leaves circulation
    Damaged,
    /// Copy was never returned: flat fine, copy leaves circulation
    Lost,
}

/// Result of a successful issuance attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueOutcome {
    /// A copy was handed out
    Issued {
        /// Date the loan falls due
        due_date: NaiveDate,
    },

    /// No copy available; the member was enrolled on the waitlist
    ///
    /// Enrollment is idempotent: a member already queued keeps their
    /// original position.
    Waitlisted,
}

/// Result of a successful return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnOutcome {
    /// Fine added by this return: late fee plus condition penalty
    pub fine_delta: Decimal,

    /// Days between the original borrow date and the return date
    pub reading_days: i64,
}
