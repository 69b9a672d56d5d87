//! Member-related types for the lending engine
//!
//! Defines the Member record owned by the membership registry: active loans,
//! reading history, accumulated fines and challenge progress.

use super::book::{Isbn, MemberId};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of simultaneously borrowed books per member
pub const BORROW_LIMIT: usize = 5;

/// Membership term granted at registration, in days
pub const MEMBERSHIP_TERM_DAYS: u64 = 365;

/// Membership tier
///
/// Carried as registration metadata; the lending policy itself does not
/// differ between tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Standard,
    Premium,
}

/// Member record state
///
/// Invariants: `borrowed.len() <= BORROW_LIMIT`; a title appears at most once
/// in `borrowed`; `fines` never decreases (no payment operation exists).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique member identifier
    pub member_id: MemberId,

    /// Display name
    pub name: String,

    /// Contact detail (email or phone, free-form)
    pub contact: String,

    /// Membership tier
    pub membership_type: MembershipType,

    /// Last day the membership is valid; issuance is rejected after this date
    pub membership_expiry: NaiveDate,

    /// Active loans: isbn mapped to due date
    pub borrowed: HashMap<Isbn, NaiveDate>,

    /// Append-only sequence of returned titles, in return order
    pub history: Vec<Isbn>,

    /// Reading duration of each completed loan, in days
    ///
    /// Parallel to `history`; measured from the original borrow date to the
    /// return date.
    pub reading_days: Vec<i64>,

    /// Accumulated fines (late fees plus condition penalties), non-negative
    pub fines: Decimal,

    /// Count of completed returns, shown against the reading goal
    pub challenge_progress: u32,

    /// Whether the member opted in to borrowing; defaults to true
    pub consent_given: bool,
}

impl Member {
    /// Create a new member valid for one year from `today`
    pub fn new(
        member_id: impl Into<MemberId>,
        name: impl Into<String>,
        contact: impl Into<String>,
        membership_type: MembershipType,
        today: NaiveDate,
    ) -> Self {
        Member {
            member_id: member_id.into(),
            name: name.into(),
            contact: contact.into(),
            membership_type,
            membership_expiry: today + Days::new(MEMBERSHIP_TERM_DAYS),
            borrowed: HashMap::new(),
            history: Vec::new(),
            reading_days: Vec::new(),
            fines: Decimal::ZERO,
            challenge_progress: 0,
            consent_given: true,
        }
    }
}
