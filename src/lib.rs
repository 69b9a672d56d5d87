//! Library Lending Engine
//! # Overview
//!
//! This library is a single-process, in-memory simulation of a small
//! library's lending workflow: branches, book inventory, member borrowing,
//! waitlists, fines and simple reading analytics.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Book, Member, Branch, outcomes, errors)
//! - [`cli`] - CLI argument parsing for the demo binary
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - The lending state machine (issuance, return,
//!     waitlist promotion, fine accrual)
//!   - [`core::catalog`] - Book records, copy pools and waitlists
//!   - [`core::membership`] - Member records, loans, fines and history
//! - [`analytics`] - Read-only reporting projections
//!
//! # Lending Policy
//!
//! An issuance passes through an ordered gate sequence: offline flag,
//! consent, membership expiry, overdue block, borrow limit. Without stock
//! the member is enrolled on a FIFO waitlist; a queued member may only be
//! served at the head of the queue. A return accrues late and condition
//! fines, adjusts the copy pool, then promotes waitlisted members while
//! copies remain.
//!
//! All failures are recoverable status values; the engine never panics on
//! caller mistakes.

// Module declarations
pub mod analytics;
pub mod cli;
pub mod core;
pub mod types;

pub use crate::core::{Catalog, LendingEngine, LoanRecord, Membership, PromotionPolicy};
pub use analytics::{GenreShare, MemberProfile};
pub use types::{
    Book, BookType, Branch, BranchId, Isbn, IssueOutcome, LendingError, Member, MemberId,
    MembershipType, ReturnCondition, ReturnOutcome, BORROW_LIMIT,
};
