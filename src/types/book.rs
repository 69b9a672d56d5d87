//! Book-related types for the lending engine
//!
//! This module defines the Book record owned by the catalog, including
//! the per-title copy counts and the FIFO waitlist of members awaiting
//! a copy.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Book identifier (ISBN string, e.g. "9780451524935")
pub type Isbn = String;

/// Member identifier (library card code, e.g. "LM001")
pub type MemberId = String;

/// Branch identifier (e.g. "B001")
pub type BranchId = String;

/// Physical form of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    /// A physical copy on a shelf
    Physical,
    /// A digital license
    Digital,
}

/// Book record state
///
/// Tracks the global copy pool for one title together with the waitlist of
/// members queued for it. Invariant: `0 <= available_copies <= total_copies`.
/// `available_copies` decreases only on issuance and increases only on a
/// return in good condition; a destroyed copy (damaged or lost return)
/// reduces `total_copies` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique title identifier
    pub isbn: Isbn,

    /// Title as first registered (later registrations merge counts only)
    pub title: String,

    /// Author as first registered
    pub author: String,

    /// Genre used by the analytics projections
    pub genre: String,

    /// Physical or digital
    pub book_type: BookType,

    /// Copies owned by the library, across all branches
    pub total_copies: u32,

    /// Copies currently on the shelf and issuable
    pub available_copies: u32,

    /// FIFO queue of members awaiting a copy
    ///
    /// No duplicates: a member appears at most once, at the position of
    /// their first enqueue.
    pub waitlist: VecDeque<MemberId>,
}

impl Book {
    /// Create a new book with all copies available and an empty waitlist
    pub fn new(
        isbn: impl Into<Isbn>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        copies: u32,
        book_type: BookType,
    ) -> Self {
        Book {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            book_type,
            total_copies: copies,
            available_copies: copies,
            waitlist: VecDeque::new(),
        }
    }
}
