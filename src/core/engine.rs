//! Lending engine
//!
//! This module provides the LendingEngine that orchestrates issuance and
//! return by coordinating between the Catalog and Membership components.
//!
//! The engine enforces the lending policy:
//! - Offline gate, consent, expiry, overdue-block and borrow-limit checks
//!   before any issuance
//! - Waitlist enrollment when no copy is available
//! - Queue-priority semantics for members already waitlisted
//! - Fine accrual on return (late fee plus condition penalty)
//! - Bounded waitlist promotion after each return

use crate::analytics::{self, MemberProfile};
use crate::core::catalog::Catalog;
use crate::core::membership::Membership;
use crate::types::{
    BookType, Branch, BranchId, IssueOutcome, Isbn, LendingError, MemberId, MembershipType,
    ReturnCondition, ReturnOutcome, BORROW_LIMIT,
};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Loan period granted at issuance, in days
pub const LOAN_PERIOD_DAYS: u64 = 14;

/// Flat late fee per day past due
pub const LATE_FEE_PER_DAY: i64 = 5;

/// Flat fine for a copy returned damaged
pub const DAMAGED_FEE: i64 = 100;

/// Flat fine for a copy reported lost
pub const LOST_FEE: i64 = 500;

/// Default seed for the popularity-sampling RNG
const DEFAULT_SEED: u64 = 42;

/// What to do with a waitlisted member whose auto-issue fails
///
/// The upstream behavior silently drops the candidate: a member popped from
/// the waitlist who fails an eligibility check (expiry, overdue, limit) is
/// neither re-queued nor notified. `Requeue` is the opt-in recovery path
/// that puts them back at the end of the queue instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionPolicy {
    /// Drop a failed candidate from the queue (upstream-faithful)
    #[default]
    DropOnFailure,
    /// Re-queue a failed candidate at the back
    Requeue,
}

/// One ledger entry per issuance
///
/// The ledger is append-only and feeds the trending projection. Auto-issued
/// loans carry no branch tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRecord {
    /// Member the copy was issued to
    pub member_id: MemberId,

    /// Title issued
    pub isbn: Isbn,

    /// Originating branch, `None` for waitlist auto-issues
    pub branch: Option<BranchId>,

    /// Date the loan started
    pub issued_on: NaiveDate,

    /// Date the loan falls due
    pub due_date: NaiveDate,
}

/// Where an issuance request originated
enum IssueOrigin<'a> {
    /// Direct request at a branch counter
    Branch(&'a str),
    /// Return-triggered waitlist promotion
    Promotion,
}

/// The lending state machine
///
/// Owns the Catalog and Membership registries, the branch directory, the
/// loan ledger and the offline gate. All operations run to completion
/// synchronously; promotion after a return is a bounded drain loop inside
/// the same call.
pub struct LendingEngine {
    catalog: Catalog,
    membership: Membership,
    branches: HashMap<BranchId, Branch>,
    ledger: Vec<LoanRecord>,
    online: bool,
    promotion_policy: PromotionPolicy,
    rng: StdRng,
}

impl LendingEngine {
    /// Create a new online engine with the default sampling seed
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create a new online engine with an explicit sampling seed
    ///
    /// The seed drives only the popularity-report sampling; everything else
    /// in the engine is deterministic.
    pub fn with_seed(seed: u64) -> Self {
        LendingEngine {
            catalog: Catalog::new(),
            membership: Membership::new(),
            branches: HashMap::new(),
            ledger: Vec::new(),
            online: true,
            promotion_policy: PromotionPolicy::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Set the policy applied to failed waitlist promotions
    pub fn with_promotion_policy(mut self, policy: PromotionPolicy) -> Self {
        self.promotion_policy = policy;
        self
    }

    /// Open or close the circulation gate
    ///
    /// While offline, both issuance and return are rejected with
    /// `SystemOffline`. The flag is static configuration, not a transient
    /// fault.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
        tracing::info!(online, "circulation gate changed");
    }

    /// Whether circulation is currently enabled
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Register a library branch
    ///
    /// Branches are issuance-origin tags only; re-registering an existing
    /// id is ignored.
    pub fn add_branch(&mut self, branch_id: &str, location: &str, operating_hours: &str) {
        self.branches
            .entry(branch_id.to_string())
            .or_insert_with(|| Branch::new(branch_id, location, operating_hours));
    }

    /// Register a title or merge additional stock (see [`Catalog::add_book`])
    pub fn add_book(
        &mut self,
        isbn: &str,
        title: &str,
        author: &str,
        genre: &str,
        copies: u32,
        book_type: BookType,
    ) {
        self.catalog
            .add_book(isbn, title, author, genre, copies, book_type);
    }

    /// Register a member valid for one year (see [`Membership::register`])
    pub fn register_member(
        &mut self,
        member_id: &str,
        name: &str,
        contact: &str,
        membership_type: MembershipType,
        today: NaiveDate,
    ) {
        self.membership
            .register(member_id, name, contact, membership_type, today);
    }

    /// Issue a book to a member at a branch
    ///
    /// Runs the full policy gate sequence; see the module docs for the
    /// ordering. When no copy is available the member is enrolled on the
    /// waitlist and `Ok(Waitlisted)` is returned without consuming a slot.
    ///
    /// # Errors
    ///
    /// Any of the recoverable policy statuses in [`LendingError`].
    pub fn issue_book(
        &mut self,
        member_id: &str,
        isbn: &str,
        branch_id: &str,
        today: NaiveDate,
    ) -> Result<IssueOutcome, LendingError> {
        if !self.online {
            tracing::warn!(member = member_id, isbn, "issue rejected: system offline");
            return Err(LendingError::SystemOffline);
        }
        if !self.branches.contains_key(branch_id) {
            return Err(LendingError::branch_not_found(branch_id));
        }
        self.issue_internal(member_id, isbn, IssueOrigin::Branch(branch_id), today)
    }

    /// Policy checks and state mutation shared by direct and auto issuance
    ///
    /// Promotion skips branch tagging and the queue-priority guard (the
    /// candidate was already popped from the queue) but runs every
    /// eligibility check, so an auto-issue can legitimately fail.
    fn issue_internal(
        &mut self,
        member_id: &str,
        isbn: &str,
        origin: IssueOrigin<'_>,
        today: NaiveDate,
    ) -> Result<IssueOutcome, LendingError> {
        if !self.online {
            return Err(LendingError::SystemOffline);
        }

        let member = self
            .membership
            .get(member_id)
            .ok_or_else(|| LendingError::member_not_found(member_id))?;

        if !member.consent_given {
            return Err(LendingError::consent_missing(member_id));
        }
        if today > member.membership_expiry {
            return Err(LendingError::membership_expired(
                member_id,
                member.membership_expiry,
            ));
        }
        let overdue = self.membership.overdue_count(member_id, today);
        if overdue > 0 {
            return Err(LendingError::overdue_block(member_id, overdue));
        }
        if member.borrowed.len() >= BORROW_LIMIT {
            return Err(LendingError::borrow_limit_reached(member_id, BORROW_LIMIT));
        }
        if member.borrowed.contains_key(isbn) {
            return Err(LendingError::already_borrowed(member_id, isbn));
        }

        let book = self
            .catalog
            .get(isbn)
            .ok_or_else(|| LendingError::book_not_found(isbn))?;

        if book.available_copies == 0 {
            self.catalog.enqueue_waitlist(isbn, member_id)?;
            tracing::info!(member = member_id, isbn, "no availability, member waitlisted");
            return Ok(IssueOutcome::Waitlisted);
        }

        // Priority-hold: a queued member may only be served at the head of
        // the queue, even with copies on the shelf.
        if matches!(origin, IssueOrigin::Branch(_)) {
            if let Some(position) = book.waitlist.iter().position(|m| m == member_id) {
                if position > 0 {
                    return Err(LendingError::queue_priority_violation(
                        member_id, isbn, position,
                    ));
                }
            }
        }

        let book = self
            .catalog
            .get_mut(isbn)
            .ok_or_else(|| LendingError::book_not_found(isbn))?;
        book.available_copies -= 1;
        if book.waitlist.front().is_some_and(|m| m == member_id) {
            book.waitlist.pop_front();
        }

        let due_date = today + Days::new(LOAN_PERIOD_DAYS);
        self.membership.record_loan(member_id, isbn, due_date)?;

        let branch = match origin {
            IssueOrigin::Branch(branch_id) => {
                if let Some(branch) = self.branches.get_mut(branch_id) {
                    *branch.inventory.entry(isbn.to_string()).or_insert(0) += 1;
                }
                Some(branch_id.to_string())
            }
            IssueOrigin::Promotion => None,
        };
        let auto = branch.is_none();
        self.ledger.push(LoanRecord {
            member_id: member_id.to_string(),
            isbn: isbn.to_string(),
            branch,
            issued_on: today,
            due_date,
        });

        tracing::info!(member = member_id, isbn, %due_date, auto, "book issued");
        Ok(IssueOutcome::Issued { due_date })
    }

    /// Return a borrowed book
    ///
    /// Removes the loan, logs the completed read, accrues the late and
    /// condition fines in a single monotonic step, adjusts the copy pool
    /// per the condition, then drains the waitlist while copies remain.
    ///
    /// # Errors
    ///
    /// - `SystemOffline` while the circulation gate is closed
    /// - `MemberNotFound` / `BookNotFound` for unknown ids
    /// - `RecordNotFound` when the member does not hold the title; no state
    ///   is mutated in that case
    pub fn return_book(
        &mut self,
        member_id: &str,
        isbn: &str,
        return_date: NaiveDate,
        condition: ReturnCondition,
    ) -> Result<ReturnOutcome, LendingError> {
        if !self.online {
            tracing::warn!(member = member_id, isbn, "return rejected: system offline");
            return Err(LendingError::SystemOffline);
        }
        if self.membership.get(member_id).is_none() {
            return Err(LendingError::member_not_found(member_id));
        }
        if self.catalog.get(isbn).is_none() {
            return Err(LendingError::book_not_found(isbn));
        }

        let due_date = self
            .membership
            .remove_loan(member_id, isbn)
            .ok_or_else(|| LendingError::record_not_found(member_id, isbn))?;

        // The original borrow date is implied by the recorded due date.
        let borrowed_on = due_date - Days::new(LOAN_PERIOD_DAYS);
        let reading_days = (return_date - borrowed_on).num_days();
        self.membership
            .log_completed_read(member_id, isbn, reading_days)?;

        let late_days = (return_date - due_date).num_days().max(0);
        let mut fine_delta = Decimal::from(late_days * LATE_FEE_PER_DAY);

        let book = self
            .catalog
            .get_mut(isbn)
            .ok_or_else(|| LendingError::book_not_found(isbn))?;
        match condition {
            ReturnCondition::Good => {
                book.available_copies += 1;
            }
            ReturnCondition::Damaged => {
                // Copy leaves circulation; the pool shrinks instead of
                // restoring availability.
                book.total_copies = book.total_copies.saturating_sub(1);
                fine_delta += Decimal::from(DAMAGED_FEE);
            }
            ReturnCondition::Lost => {
                book.total_copies = book.total_copies.saturating_sub(1);
                fine_delta += Decimal::from(LOST_FEE);
            }
        }

        if fine_delta > Decimal::ZERO {
            self.membership.add_fine(member_id, fine_delta)?;
        }
        tracing::info!(
            member = member_id,
            isbn,
            %return_date,
            ?condition,
            %fine_delta,
            "book returned"
        );

        self.promote_waitlist(isbn, return_date);

        Ok(ReturnOutcome {
            fine_delta,
            reading_days,
        })
    }

    /// Drain the waitlist while copies remain
    ///
    /// An explicit bounded loop rather than recursion: at most one attempt
    /// per member queued at entry, so a `Requeue` policy cannot spin.
    fn promote_waitlist(&mut self, isbn: &str, today: NaiveDate) {
        let mut remaining = self
            .catalog
            .get(isbn)
            .map(|book| book.waitlist.len())
            .unwrap_or(0);

        while remaining > 0 {
            remaining -= 1;
            let has_stock = self
                .catalog
                .get(isbn)
                .is_some_and(|book| book.available_copies > 0);
            if !has_stock {
                break;
            }
            let Some(candidate) = self.catalog.dequeue_waitlist(isbn) else {
                break;
            };
            match self.issue_internal(&candidate, isbn, IssueOrigin::Promotion, today) {
                Ok(IssueOutcome::Issued { due_date }) => {
                    tracing::info!(
                        member = candidate.as_str(),
                        isbn,
                        %due_date,
                        "waitlisted member auto-issued"
                    );
                }
                // Stock was checked above; the issue path re-enqueued the
                // candidate itself if it vanished.
                Ok(IssueOutcome::Waitlisted) => {}
                Err(err) => {
                    tracing::warn!(
                        member = candidate.as_str(),
                        isbn,
                        %err,
                        requeue = matches!(self.promotion_policy, PromotionPolicy::Requeue),
                        "auto-issue failed for waitlisted member"
                    );
                    if matches!(self.promotion_policy, PromotionPolicy::Requeue) {
                        let _ = self.catalog.enqueue_waitlist(isbn, &candidate);
                    }
                }
            }
        }
    }

    /// Assemble the reporting profile for a member
    ///
    /// A read-only projection over catalog, membership and ledger state.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` for an unknown id.
    pub fn member_profile(
        &self,
        member_id: &str,
        today: NaiveDate,
    ) -> Result<MemberProfile, LendingError> {
        let member = self
            .membership
            .get(member_id)
            .ok_or_else(|| LendingError::member_not_found(member_id))?;
        Ok(analytics::member_profile(
            &self.catalog,
            member,
            &self.ledger,
            today,
        ))
    }

    /// Sample up to three titles of a genre (seeded, reproducible)
    pub fn popular_books_report(&mut self, genre: &str) -> Vec<String> {
        analytics::popular_books(&self.catalog, &mut self.rng, genre)
    }

    /// The catalog state (read-only)
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The membership state (read-only)
    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// The append-only loan ledger
    pub fn ledger(&self) -> &[LoanRecord] {
        &self.ledger
    }

    /// Look up a registered branch
    pub fn branch(&self, branch_id: &str) -> Option<&Branch> {
        self.branches.get(branch_id)
    }
}

impl Default for LendingEngine {
    fn default() -> Self {
        Self::new()
    }
}
