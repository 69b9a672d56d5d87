//! Branch-related types for the lending engine

use super::book::{BranchId, Isbn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Library branch record
///
/// A branch is an issuance-origin tag only: the copy pool is global and a
/// branch never gates availability. The inventory map tallies how many
/// issuances were recorded against this branch per title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Unique branch identifier
    pub branch_id: BranchId,

    /// Street address or district name
    pub location: String,

    /// Free-form opening hours (e.g. "9am - 9pm")
    pub operating_hours: String,

    /// Per-title issuance tally for loans originated here
    pub inventory: HashMap<Isbn, u32>,
}

impl Branch {
    /// Create a new branch with an empty issuance tally
    pub fn new(
        branch_id: impl Into<BranchId>,
        location: impl Into<String>,
        operating_hours: impl Into<String>,
    ) -> Self {
        Branch {
            branch_id: branch_id.into(),
            location: location.into(),
            operating_hours: operating_hours.into(),
            inventory: HashMap::new(),
        }
    }
}
