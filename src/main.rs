//! Lending Engine demo harness
//!
//! Runs a scripted lending scenario against an in-memory engine and renders
//! a member reading profile at the end.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --seed 7
//! cargo run -- --json
//! cargo run -- --offline
//! ```
//!
//! Structured logs go to stderr; set `RUST_LOG` to adjust the filter
//! (default `info`).

use chrono::{Days, Local, NaiveDate};
use lending_engine::cli;
use lending_engine::{BookType, IssueOutcome, LendingEngine, MembershipType, ReturnCondition};
use std::error::Error;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut engine = LendingEngine::with_seed(args.seed);
    if args.offline {
        engine.set_online(false);
    }

    if let Err(e) = run_demo(&mut engine, args.json) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Script the sample lending day and render one member's profile
fn run_demo(engine: &mut LendingEngine, json: bool) -> Result<(), Box<dyn Error>> {
    let today = Local::now().date_naive();

    engine.add_branch("B001", "City Center", "9am - 9pm");

    engine.add_book("9780451524935", "1984", "George Orwell", "Mystery", 3, BookType::Physical);
    engine.add_book("9780140449136", "The Odyssey", "Homer", "Epic", 1, BookType::Physical);
    engine.add_book("9780141036137", "Sapiens", "Yuval Noah Harari", "Biography", 4, BookType::Digital);

    engine.register_member("LM001", "John Smith", "john@example.com", MembershipType::Premium, today);
    engine.register_member("LM002", "Priya Patel", "priya@example.com", MembershipType::Standard, today);

    for isbn in ["9780451524935", "9780141036137", "9780140449136"] {
        report_issue(engine, "LM001", isbn, today);
    }

    // The single Odyssey copy is out; LM002 lands on the waitlist
    report_issue(engine, "LM002", "9780140449136", today);

    // LM001 brings 1984 back five days late; the waitlisted Odyssey stays out
    let return_date = today + Days::new(19);
    match engine.return_book("LM001", "9780451524935", return_date, ReturnCondition::Good) {
        Ok(outcome) => println!(
            "Returned 1984 after {} days, fine added: {}",
            outcome.reading_days, outcome.fine_delta
        ),
        Err(err) => println!("Return rejected: {}", err),
    }

    // Returning The Odyssey promotes LM002 automatically
    match engine.return_book("LM001", "9780140449136", return_date, ReturnCondition::Good) {
        Ok(_) => println!("Returned The Odyssey; waitlist promotion ran"),
        Err(err) => println!("Return rejected: {}", err),
    }

    let profile = engine.member_profile("LM001", return_date)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        render_profile_text(&profile);
        println!("\nPopular in Mystery:");
        for title in engine.popular_books_report("Mystery") {
            println!("- {}", title);
        }
    }

    Ok(())
}

fn report_issue(engine: &mut LendingEngine, member: &str, isbn: &str, today: NaiveDate) {
    match engine.issue_book(member, isbn, "B001", today) {
        Ok(IssueOutcome::Issued { due_date }) => {
            println!("Issued {} to {} (due {})", isbn, member, due_date)
        }
        Ok(IssueOutcome::Waitlisted) => {
            println!("No copies of {}; {} added to waitlist", isbn, member)
        }
        Err(err) => println!("Issue rejected: {}", err),
    }
}

fn render_profile_text(profile: &lending_engine::MemberProfile) {
    println!("\n=== MEMBER READING PROFILE ===");
    println!("Member: {} (ID: {})", profile.name, profile.member_id);
    println!("Books returned: {}", profile.history_count);
    println!("Favorite genres:");
    for share in &profile.genre_distribution {
        println!("- {}: {}%", share.genre, share.percent);
    }
    println!("Average reading time: {:.1} days per book", profile.avg_reading_days);
    println!("Current status:");
    println!("- Books issued: {}/5", profile.active_borrowed);
    println!("- Overdue books: {}", profile.overdue_count);
    println!("- Pending fines: {}", profile.pending_fines);
    println!("- Challenge progress: {}", profile.challenge_progress);
    println!("Recommended books:");
    for title in &profile.recommendations {
        println!("- {}", title);
    }
    println!("Trending now:");
    for title in &profile.trending {
        println!("- {}", title);
    }
}
