//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `book`: Book record, copy counts and waitlist, id aliases
//! - `member`: Member record and borrowing limits
//! - `branch`: Branch record (issuance-origin tag)
//! - `outcome`: Status values returned by engine operations
//! - `error`: Error types for the lending engine

pub mod book;
pub mod branch;
pub mod error;
pub mod member;
pub mod outcome;

pub use book::{Book, BookType, BranchId, Isbn, MemberId};
pub use branch::Branch;
pub use error::LendingError;
pub use member::{Member, MembershipType, BORROW_LIMIT, MEMBERSHIP_TERM_DAYS};
pub use outcome::{IssueOutcome, ReturnCondition, ReturnOutcome};
