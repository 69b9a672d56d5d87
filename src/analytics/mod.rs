//! Read-only analytics projections
//!
//! Everything here derives reporting views from catalog, membership and
//! ledger state without mutating any of it. Tie-breaks are deterministic
//! (stable first-seen order) and the only randomness, popularity sampling,
//! comes from an explicitly seeded generator owned by the engine, so every
//! projection is reproducible.

use crate::core::catalog::Catalog;
use crate::core::engine::LoanRecord;
use crate::types::{Member, MemberId, MembershipType};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use serde::Serialize;

/// Genres considered "favorite" when ranking a member's history
const FAVORITE_GENRE_COUNT: usize = 2;

/// Titles suggested in a member profile
const RECOMMENDATION_COUNT: usize = 3;

/// Titles sampled by the popularity report
const POPULAR_SAMPLE_SIZE: usize = 3;

/// One genre's share of a member's reading history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreShare {
    /// Genre name
    pub genre: String,
    /// Percentage of history, rounded independently per genre
    ///
    /// Shares may not sum to exactly 100.
    pub percent: u32,
}

/// Reporting view over one member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberProfile {
    pub member_id: MemberId,
    pub name: String,
    pub membership_type: MembershipType,
    /// Books returned so far
    pub history_count: usize,
    /// Genre shares in first-read order
    pub genre_distribution: Vec<GenreShare>,
    /// Mean reading duration over completed loans, 0 if none
    pub avg_reading_days: f64,
    /// Active loans
    pub active_borrowed: usize,
    /// Active loans already past due
    pub overdue_count: usize,
    /// Accumulated fines
    pub pending_fines: Decimal,
    /// Completed returns counted toward the reading goal
    pub challenge_progress: u32,
    /// Suggested titles from the member's favorite genres
    pub recommendations: Vec<String>,
    /// Most-borrowed titles across the whole library
    pub trending: Vec<String>,
}

/// Genre frequencies over a member's history, in first-seen order
///
/// The first-seen order is what makes the later stable sort a documented,
/// deterministic tie-break.
fn genre_counts(catalog: &Catalog, member: &Member) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for isbn in &member.history {
        let Some(book) = catalog.get(isbn) else {
            continue;
        };
        match counts.iter_mut().find(|(genre, _)| *genre == book.genre) {
            Some(entry) => entry.1 += 1,
            None => counts.push((book.genre.clone(), 1)),
        }
    }
    counts
}

/// Suggest up to `n` unread titles from the member's top genres
///
/// Top-2 genres by history frequency (ties keep first-seen order), then
/// titles of those genres the member has not read yet, in catalog
/// iteration order (sorted by isbn).
pub fn recommendations(catalog: &Catalog, member: &Member, n: usize) -> Vec<String> {
    let mut counts = genre_counts(catalog, member);
    counts.sort_by(|a, b| b.1.cmp(&a.1)); // stable: ties keep first-seen order
    let favorites: Vec<&str> = counts
        .iter()
        .take(FAVORITE_GENRE_COUNT)
        .map(|(genre, _)| genre.as_str())
        .collect();

    catalog
        .all_books()
        .into_iter()
        .filter(|book| favorites.contains(&book.genre.as_str()))
        .filter(|book| !member.history.contains(&book.isbn))
        .take(n)
        .map(|book| book.title.clone())
        .collect()
}

/// Genre shares of a member's history, rounded independently
pub fn genre_distribution(catalog: &Catalog, member: &Member) -> Vec<GenreShare> {
    let counts = genre_counts(catalog, member);
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .into_iter()
        .map(|(genre, count)| GenreShare {
            genre,
            percent: ((count as f64 / total as f64) * 100.0).round() as u32,
        })
        .collect()
}

/// Mean reading duration across completed loans, 0 if none returned yet
pub fn average_reading_days(member: &Member) -> f64 {
    if member.reading_days.is_empty() {
        return 0.0;
    }
    let total: i64 = member.reading_days.iter().sum();
    total as f64 / member.reading_days.len() as f64
}

/// Sample up to three titles of a genre
///
/// Drawn from the engine's seeded generator; the same seed and operation
/// sequence reproduces the same sample.
pub fn popular_books(catalog: &Catalog, rng: &mut StdRng, genre: &str) -> Vec<String> {
    let in_genre: Vec<&str> = catalog
        .all_books()
        .into_iter()
        .filter(|book| book.genre == genre)
        .map(|book| book.title.as_str())
        .collect();
    in_genre
        .choose_multiple(rng, POPULAR_SAMPLE_SIZE)
        .map(|title| title.to_string())
        .collect()
}

/// Most-borrowed titles across the loan ledger
///
/// Top three by issuance count; ties keep the order of first appearance in
/// the ledger.
pub fn trending(catalog: &Catalog, ledger: &[LoanRecord]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in ledger {
        match counts.iter_mut().find(|(isbn, _)| *isbn == record.isbn) {
            Some(entry) => entry.1 += 1,
            None => counts.push((record.isbn.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .iter()
        .take(POPULAR_SAMPLE_SIZE)
        .filter_map(|(isbn, _)| catalog.get(isbn).map(|book| book.title.clone()))
        .collect()
}

/// Assemble the full reporting profile for a member
pub fn member_profile(
    catalog: &Catalog,
    member: &Member,
    ledger: &[LoanRecord],
    today: NaiveDate,
) -> MemberProfile {
    MemberProfile {
        member_id: member.member_id.clone(),
        name: member.name.clone(),
        membership_type: member.membership_type,
        history_count: member.history.len(),
        genre_distribution: genre_distribution(catalog, member),
        avg_reading_days: average_reading_days(member),
        active_borrowed: member.borrowed.len(),
        overdue_count: member.borrowed.values().filter(|due| **due < today).count(),
        pending_fines: member.fines,
        challenge_progress: member.challenge_progress,
        recommendations: recommendations(catalog, member, RECOMMENDATION_COUNT),
        trending: trending(catalog, ledger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BookType;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog_fixture() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_book("A1", "1984", "Orwell", "Dystopia", 2, BookType::Physical);
        catalog.add_book("A2", "Brave New World", "Huxley", "Dystopia", 2, BookType::Physical);
        catalog.add_book("A3", "We", "Zamyatin", "Dystopia", 1, BookType::Physical);
        catalog.add_book("B1", "Sapiens", "Harari", "Biography", 3, BookType::Digital);
        catalog.add_book("C1", "The Odyssey", "Homer", "Epic", 1, BookType::Physical);
        catalog
    }

    fn reader_of(history: &[&str]) -> Member {
        let mut member = Member::new(
            "LM001",
            "John Smith",
            "john@example.com",
            MembershipType::Premium,
            date(2026, 1, 1),
        );
        member.history = history.iter().map(|s| s.to_string()).collect();
        member
    }

    #[test]
    fn test_recommendations_cover_top_genres_unread_only() {
        let catalog = catalog_fixture();
        let member = reader_of(&["A1", "A2", "B1"]);

        let recs = recommendations(&catalog, &member, 5);

        // Dystopia (2) and Biography (1) are the favorites; A3 is the only
        // unread title among them, in catalog order
        assert_eq!(recs, vec!["We"]);
    }

    #[test]
    fn test_recommendations_tie_broken_by_first_seen_genre() {
        let catalog = catalog_fixture();
        // Epic read before Biography, both once; Dystopia twice
        let member = reader_of(&["C1", "A1", "B1", "A2"]);

        let recs = recommendations(&catalog, &member, 5);

        // Favorites: Dystopia (2), then Epic (first-seen tie-break over
        // Biography). Sapiens must not appear.
        assert_eq!(recs, vec!["We"]);
    }

    #[test]
    fn test_recommendations_respect_count_limit() {
        let catalog = catalog_fixture();
        let member = reader_of(&["B1"]);

        // Biography is the only favorite and fully read; nothing to suggest
        assert!(recommendations(&catalog, &member, 3).is_empty());

        let dystopia_fan = reader_of(&["A1"]);
        assert_eq!(recommendations(&catalog, &dystopia_fan, 1).len(), 1);
    }

    #[test]
    fn test_genre_distribution_rounds_independently() {
        let catalog = catalog_fixture();
        let member = reader_of(&["A1", "A2", "B1"]);

        let shares = genre_distribution(&catalog, &member);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0], GenreShare { genre: "Dystopia".into(), percent: 67 });
        assert_eq!(shares[1], GenreShare { genre: "Biography".into(), percent: 33 });
    }

    #[test]
    fn test_genre_distribution_empty_history() {
        let catalog = catalog_fixture();
        let member = reader_of(&[]);
        assert!(genre_distribution(&catalog, &member).is_empty());
    }

    #[test]
    fn test_average_reading_days_zero_without_returns() {
        let member = reader_of(&[]);
        assert_eq!(average_reading_days(&member), 0.0);
    }

    #[test]
    fn test_average_reading_days_mean() {
        let mut member = reader_of(&["A1", "A2"]);
        member.reading_days = vec![10, 4];
        assert_eq!(average_reading_days(&member), 7.0);
    }

    #[test]
    fn test_popular_books_is_reproducible_per_seed() {
        let catalog = catalog_fixture();

        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let sample_a = popular_books(&catalog, &mut rng_a, "Dystopia");
        let sample_b = popular_books(&catalog, &mut rng_b, "Dystopia");

        assert_eq!(sample_a, sample_b);
        assert_eq!(sample_a.len(), 3);
        for title in &sample_a {
            assert!(["1984", "Brave New World", "We"].contains(&title.as_str()));
        }
    }

    #[test]
    fn test_popular_books_caps_at_genre_size() {
        let catalog = catalog_fixture();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(popular_books(&catalog, &mut rng, "Epic"), vec!["The Odyssey"]);
        assert!(popular_books(&catalog, &mut rng, "Unknown").is_empty());
    }

    #[test]
    fn test_trending_ranks_by_borrow_count_first_seen_ties() {
        let catalog = catalog_fixture();
        let loan = |isbn: &str| LoanRecord {
            member_id: "LM001".to_string(),
            isbn: isbn.to_string(),
            branch: Some("B001".to_string()),
            issued_on: date(2026, 1, 5),
            due_date: date(2026, 1, 19),
        };
        let ledger = vec![loan("B1"), loan("A1"), loan("A1"), loan("C1")];

        let titles = trending(&catalog, &ledger);

        // A1 twice, then B1 and C1 once each in ledger order
        assert_eq!(titles, vec!["1984", "Sapiens", "The Odyssey"]);
    }

    #[test]
    fn test_member_profile_assembly() {
        let catalog = catalog_fixture();
        let mut member = reader_of(&["A1", "B1"]);
        member.reading_days = vec![8, 6];
        member.challenge_progress = 2;
        member.fines = Decimal::from(25);
        member.borrowed.insert("A2".to_string(), date(2026, 1, 10));

        let profile = member_profile(&catalog, &member, &[], date(2026, 1, 20));

        assert_eq!(profile.history_count, 2);
        assert_eq!(profile.active_borrowed, 1);
        assert_eq!(profile.overdue_count, 1);
        assert_eq!(profile.avg_reading_days, 7.0);
        assert_eq!(profile.pending_fines, Decimal::from(25));
        assert_eq!(profile.challenge_progress, 2);
        assert!(profile.trending.is_empty());
    }
}
