//! Per-run counters

use serde::{Deserialize, Serialize};

/// Counters for one provisioning run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTally {
    /// Creation calls that returned an id
    pub created: usize,
    /// Creation calls issued
    pub attempted: usize,
    /// Creation calls that returned no id
    pub failed: usize,
    /// Days whose epic failed, skipping their whole subtree
    pub days_skipped: usize,
    /// Created stories whose tasks were left out for exceeding the cutoff
    pub stories_trimmed: usize,
}

impl RunTally {
    /// Whether every attempted call succeeded
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
