//! Core business logic module
//!
//! This module contains the lending state machine and the registries it
//! orchestrates:
//! - `catalog` - Book records, copy pools and waitlists
//! - `membership` - Member records, loans, fines and history
//! - `engine` - Issuance/return orchestration and waitlist promotion

pub mod catalog;
pub mod engine;
pub mod membership;

pub use catalog::Catalog;
pub use engine::{
    LendingEngine, LoanRecord, PromotionPolicy, DAMAGED_FEE, LATE_FEE_PER_DAY, LOAN_PERIOD_DAYS,
    LOST_FEE,
};
pub use membership::Membership;
