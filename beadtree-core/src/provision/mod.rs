//! Provisioning of a plan into the tracker
//!
//! Days become epics, stories are created under their day and tasks under
//! their story. A node is only attempted when its parent was created, and
//! no single failure stops the run.

mod engine;
mod tally;

pub use engine::{Provisioner, RateLimits};
pub use tally::RunTally;
