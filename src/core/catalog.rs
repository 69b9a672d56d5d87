//! Catalog management module
//!
//! This module provides the `Catalog` struct which owns every Book record
//! and the per-title waitlists.
//!
//! The Catalog is responsible for:
//! - Registering titles and merging additional stock on duplicate isbns
//! - Tracking the global copy pool per title
//! - Maintaining the FIFO, duplicate-free waitlist per title
//! - Providing sorted book listings for deterministic reporting

use crate::types::{Book, BookType, Isbn, LendingError, MemberId};
use std::collections::HashMap;

/// Owns all Book records and their waitlists
///
/// The Catalog maintains an in-memory map of isbns to book state. Books are
/// created once via [`Catalog::add_book`] and never removed.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Map of isbn to book state
    books: HashMap<Isbn, Book>,
}

impl Catalog {
    /// Create a new Catalog with no books
    pub fn new() -> Self {
        Catalog {
            books: HashMap::new(),
        }
    }

    /// Register a title or merge additional stock into an existing one
    ///
    /// For an unseen isbn a new Book is created with all copies available.
    /// For a known isbn both `total_copies` and `available_copies` grow by
    /// `copies`; the originally registered metadata is kept even when the
    /// new call carries different title/author/genre values.
    pub fn add_book(
        &mut self,
        isbn: &str,
        title: &str,
        author: &str,
        genre: &str,
        copies: u32,
        book_type: BookType,
    ) {
        self.books
            .entry(isbn.to_string())
            .and_modify(|book| {
                book.total_copies += copies;
                book.available_copies += copies;
            })
            .or_insert_with(|| Book::new(isbn, title, author, genre, copies, book_type));
    }

    /// Get an immutable reference to a book
    pub fn get(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Get a mutable reference to a book
    pub fn get_mut(&mut self, isbn: &str) -> Option<&mut Book> {
        self.books.get_mut(isbn)
    }

    /// Append a member to a book's waitlist
    ///
    /// Enqueueing is idempotent: a member already queued keeps the position
    /// of their first enqueue and is not added again.
    ///
    /// # Errors
    ///
    /// Returns `BookNotFound` for an unknown isbn.
    pub fn enqueue_waitlist(&mut self, isbn: &str, member_id: &str) -> Result<(), LendingError> {
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| LendingError::book_not_found(isbn))?;

        if !book.waitlist.iter().any(|queued| queued == member_id) {
            book.waitlist.push_back(member_id.to_string());
            tracing::debug!(isbn, member = member_id, "member enqueued on waitlist");
        }
        Ok(())
    }

    /// Pop and return the head of a book's waitlist
    ///
    /// Returns `None` when the waitlist is empty or the isbn is unknown.
    pub fn dequeue_waitlist(&mut self, isbn: &str) -> Option<MemberId> {
        let head = self.books.get_mut(isbn)?.waitlist.pop_front();
        if let Some(member) = &head {
            tracing::debug!(isbn, member = member.as_str(), "waitlist head dequeued");
        }
        head
    }

    /// Get all books sorted by isbn
    ///
    /// The sorted order is the catalog iteration order used by the analytics
    /// projections, keeping their output deterministic.
    pub fn all_books(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.values().collect();
        books.sort_by_key(|book| &book.isbn);
        books
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_one_title() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_book("B1", "1984", "George Orwell", "Dystopia", 3, BookType::Physical);
        catalog
    }

    #[test]
    fn test_new_creates_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.all_books().is_empty());
    }

    #[test]
    fn test_add_book_makes_all_copies_available() {
        let catalog = catalog_with_one_title();

        let book = catalog.get("B1").unwrap();
        assert_eq!(book.total_copies, 3);
        assert_eq!(book.available_copies, 3);
        assert!(book.waitlist.is_empty());
    }

    #[test]
    fn test_add_book_merges_stock_on_duplicate_isbn() {
        let mut catalog = catalog_with_one_title();

        catalog.add_book("B1", "Nineteen Eighty-Four", "Orwell", "Fiction", 2, BookType::Digital);

        let book = catalog.get("B1").unwrap();
        assert_eq!(book.total_copies, 5);
        assert_eq!(book.available_copies, 5);
        // First registration wins on metadata
        assert_eq!(book.title, "1984");
        assert_eq!(book.genre, "Dystopia");
        assert_eq!(book.book_type, BookType::Physical);
    }

    #[test]
    fn test_duplicate_add_only_merges_new_copies() {
        let mut catalog = catalog_with_one_title();
        catalog.get_mut("B1").unwrap().available_copies = 1;

        catalog.add_book("B1", "1984", "George Orwell", "Dystopia", 2, BookType::Physical);

        let book = catalog.get("B1").unwrap();
        assert_eq!(book.total_copies, 5);
        assert_eq!(book.available_copies, 3);
    }

    #[test]
    fn test_enqueue_waitlist_preserves_fifo_order() {
        let mut catalog = catalog_with_one_title();

        catalog.enqueue_waitlist("B1", "LM001").unwrap();
        catalog.enqueue_waitlist("B1", "LM002").unwrap();
        catalog.enqueue_waitlist("B1", "LM003").unwrap();

        assert_eq!(catalog.dequeue_waitlist("B1").as_deref(), Some("LM001"));
        assert_eq!(catalog.dequeue_waitlist("B1").as_deref(), Some("LM002"));
        assert_eq!(catalog.dequeue_waitlist("B1").as_deref(), Some("LM003"));
        assert_eq!(catalog.dequeue_waitlist("B1"), None);
    }

    #[test]
    fn test_enqueue_waitlist_is_idempotent() {
        let mut catalog = catalog_with_one_title();

        catalog.enqueue_waitlist("B1", "LM001").unwrap();
        catalog.enqueue_waitlist("B1", "LM002").unwrap();
        catalog.enqueue_waitlist("B1", "LM001").unwrap();

        let book = catalog.get("B1").unwrap();
        assert_eq!(book.waitlist.len(), 2);
        assert_eq!(book.waitlist[0], "LM001");
    }

    #[test]
    fn test_enqueue_waitlist_unknown_isbn_fails() {
        let mut catalog = Catalog::new();

        let result = catalog.enqueue_waitlist("missing", "LM001");
        assert!(matches!(
            result.unwrap_err(),
            LendingError::BookNotFound { .. }
        ));
    }

    #[test]
    fn test_dequeue_waitlist_on_empty_returns_none() {
        let mut catalog = catalog_with_one_title();
        assert_eq!(catalog.dequeue_waitlist("B1"), None);
        assert_eq!(catalog.dequeue_waitlist("missing"), None);
    }

    #[test]
    fn test_all_books_sorted_by_isbn() {
        let mut catalog = Catalog::new();
        catalog.add_book("C3", "Sapiens", "Harari", "Biography", 4, BookType::Digital);
        catalog.add_book("A1", "The Odyssey", "Homer", "Epic", 2, BookType::Physical);
        catalog.add_book("B2", "1984", "Orwell", "Dystopia", 3, BookType::Physical);

        let isbns: Vec<&str> = catalog.all_books().iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["A1", "B2", "C3"]);
    }
}
