//! Membership management module
//!
//! This module provides the `Membership` struct which owns every Member
//! record and the mutation seams the lending engine drives: loan
//! bookkeeping, fine accrual and completed-read logging.

use crate::types::{LendingError, Member, MemberId, MembershipType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Owns all Member records
///
/// Members are created once via [`Membership::register`] and never removed.
#[derive(Debug, Default)]
pub struct Membership {
    /// Map of member id to member state
    members: HashMap<MemberId, Member>,
}

impl Membership {
    /// Create a new Membership registry with no members
    pub fn new() -> Self {
        Membership {
            members: HashMap::new(),
        }
    }

    /// Register a member valid for one year from `today`
    ///
    /// Registration is first-record-wins: re-registering an existing id is
    /// ignored, preserving the member's loans, history and fines.
    pub fn register(
        &mut self,
        member_id: &str,
        name: &str,
        contact: &str,
        membership_type: MembershipType,
        today: NaiveDate,
    ) {
        self.members
            .entry(member_id.to_string())
            .or_insert_with(|| Member::new(member_id, name, contact, membership_type, today));
    }

    /// Get an immutable reference to a member
    pub fn get(&self, member_id: &str) -> Option<&Member> {
        self.members.get(member_id)
    }

    /// Get a mutable reference to a member
    pub fn get_mut(&mut self, member_id: &str) -> Option<&mut Member> {
        self.members.get_mut(member_id)
    }

    /// Check whether a member holds any loan due strictly before `today`
    ///
    /// Unknown members have no loans and report false.
    pub fn has_active_overdue(&self, member_id: &str, today: NaiveDate) -> bool {
        self.overdue_count(member_id, today) > 0
    }

    /// Number of loans due strictly before `today`; zero for unknown members
    pub fn overdue_count(&self, member_id: &str, today: NaiveDate) -> usize {
        self.members
            .get(member_id)
            .map(|member| member.borrowed.values().filter(|due| **due < today).count())
            .unwrap_or(0)
    }

    /// Add a fine to a member's balance
    ///
    /// Fines are monotonic: they are only ever added by the engine, never
    /// reduced (payment is out of scope). The amount must be non-negative,
    /// a caller guarantee.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` for an unknown id.
    pub fn add_fine(&mut self, member_id: &str, amount: Decimal) -> Result<(), LendingError> {
        debug_assert!(amount >= Decimal::ZERO, "fines only accrue");
        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| LendingError::member_not_found(member_id))?;
        member.fines += amount;
        Ok(())
    }

    /// Record an active loan against a member
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` for an unknown id.
    pub fn record_loan(
        &mut self,
        member_id: &str,
        isbn: &str,
        due_date: NaiveDate,
    ) -> Result<(), LendingError> {
        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| LendingError::member_not_found(member_id))?;
        member.borrowed.insert(isbn.to_string(), due_date);
        Ok(())
    }

    /// Remove an active loan, returning its recorded due date
    ///
    /// Returns `None` when the member is unknown or does not hold the title.
    pub fn remove_loan(&mut self, member_id: &str, isbn: &str) -> Option<NaiveDate> {
        self.members.get_mut(member_id)?.borrowed.remove(isbn)
    }

    /// Log a completed read after a return
    ///
    /// Appends the title to the member's history, records the reading
    /// duration and advances the reading-challenge counter.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` for an unknown id.
    pub fn log_completed_read(
        &mut self,
        member_id: &str,
        isbn: &str,
        reading_days: i64,
    ) -> Result<(), LendingError> {
        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| LendingError::member_not_found(member_id))?;
        member.history.push(isbn.to_string());
        member.reading_days.push(reading_days);
        member.challenge_progress += 1;
        Ok(())
    }
}
