//! Error types for the lending engine
//!
//! Every failure in the lending workflow is a recoverable status value,
//! never a process-terminating fault. The caller can retry later, wait for
//! a promotion, or settle fines out of band.
//!
//! # Error Categories
//!
//! - **Gate failures**: system offline, missing consent, expired membership
//! - **Policy failures**: overdue block, borrow limit, queue priority
//! - **Lookup failures**: unknown member/book/branch, return of an unheld title
//!
//! Unknown identifiers are reported as not-found statuses rather than
//! panics; the engine applies this consistently across the whole surface.

use chrono::NaiveDate;
use thiserror::Error;

use super::book::{BranchId, Isbn, MemberId};

/// Main error type for the lending engine
///
/// Each variant carries enough context to render a useful rejection
/// message to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LendingError {
    /// Circulation is globally disabled
    ///
    /// A static gate checked before anything else; both issuance and
    /// return are rejected while the system is offline.
    #[error("Lending system is offline")]
    SystemOffline,

    /// Member has not opted in to borrowing
    #[error("Member {member} has not given consent")]
    ConsentMissing {
        /// Member attempting the issuance
        member: MemberId,
    },

    /// Membership lapsed before the requested issuance date
    #[error("Membership of {member} expired on {expired_on}")]
    MembershipExpired {
        /// Member attempting the issuance
        member: MemberId,
        /// Last day the membership was valid
        expired_on: NaiveDate,
    },

    /// Member holds at least one overdue book
    ///
    /// Borrowing is blocked system-wide for the member until every
    /// overdue loan is returned.
    #[error("Member {member} has {overdue} overdue book(s); borrowing is blocked")]
    OverdueBlock {
        /// Member attempting the issuance
        member: MemberId,
        /// Number of loans already past due
        overdue: usize,
    },

    /// Member already holds the maximum number of active loans
    #[error("Member {member} reached the borrowing limit of {limit}")]
    BorrowLimitReached {
        /// Member attempting the issuance
        member: MemberId,
        /// The enforced limit
        limit: usize,
    },

    /// Member tried to bypass their own waitlist position
    ///
    /// A queued member may only receive a copy at the head of the queue,
    /// even while copies sit on the shelf (priority-hold semantics).
    #[error("Member {member} is position {position} in the waitlist for {isbn} and must wait")]
    QueuePriorityViolation {
        /// Member attempting the issuance
        member: MemberId,
        /// Title being requested
        isbn: Isbn,
        /// Zero-based position in the waitlist
        position: usize,
    },

    /// Member already holds an active loan for this title
    #[error("Member {member} already borrowed {isbn}")]
    AlreadyBorrowed {
        /// Member attempting the issuance
        member: MemberId,
        /// Title being requested
        isbn: Isbn,
    },

    /// Return of a title the member does not currently hold
    #[error("No active loan of {isbn} for member {member}")]
    RecordNotFound {
        /// Member attempting the return
        member: MemberId,
        /// Title being returned
        isbn: Isbn,
    },

    /// Unknown member identifier
    #[error("Member {member} is not registered")]
    MemberNotFound {
        /// The id that was not found
        member: MemberId,
    },

    /// Unknown book identifier
    #[error("Book {isbn} is not in the catalog")]
    BookNotFound {
        /// The isbn that was not found
        isbn: Isbn,
    },

    /// Unknown branch identifier
    #[error("Branch {branch} is not registered")]
    BranchNotFound {
        /// The id that was not found
        branch: BranchId,
    },
}

// Helper constructors for the variants built from borrowed ids

impl LendingError {
    /// Create a ConsentMissing error
    pub fn consent_missing(member: &str) -> Self {
        LendingError::ConsentMissing {
            member: member.to_string(),
        }
    }

    /// Create a MembershipExpired error
    pub fn membership_expired(member: &str, expired_on: NaiveDate) -> Self {
        LendingError::MembershipExpired {
            member: member.to_string(),
            expired_on,
        }
    }

    /// Create an OverdueBlock error
    pub fn overdue_block(member: &str, overdue: usize) -> Self {
        LendingError::OverdueBlock {
            member: member.to_string(),
            overdue,
        }
    }

    /// Create a BorrowLimitReached error
    pub fn borrow_limit_reached(member: &str, limit: usize) -> Self {
        LendingError::BorrowLimitReached {
            member: member.to_string(),
            limit,
        }
    }

    /// Create a QueuePriorityViolation error
    pub fn queue_priority_violation(member: &str, isbn: &str, position: usize) -> Self {
        LendingError::QueuePriorityViolation {
            member: member.to_string(),
            isbn: isbn.to_string(),
            position,
        }
    }

    /// Create an AlreadyBorrowed error
    pub fn already_borrowed(member: &str, isbn: &str) -> Self {
        LendingError::AlreadyBorrowed {
            member: member.to_string(),
            isbn: isbn.to_string(),
        }
    }

    /// Create a RecordNotFound error
    pub fn record_not_found(member: &str, isbn: &str) -> Self {
        LendingError::RecordNotFound {
            member: member.to_string(),
            isbn: isbn.to_string(),
        }
    }

    /// Create a MemberNotFound error
    pub fn member_not_found(member: &str) -> Self {
        LendingError::MemberNotFound {
            member: member.to_string(),
        }
    }

    /// Create a BookNotFound error
    pub fn book_not_found(isbn: &str) -> Self {
        LendingError::BookNotFound {
            isbn: isbn.to_string(),
        }
    }

    /// Create a BranchNotFound error
    pub fn branch_not_found(branch: &str) -> Self {
        LendingError::BranchNotFound {
            branch: branch.to_string(),
        }
    }
}
