//! Tracker abstraction for the external issue CLI
//!
//! The provisioning engine only ever talks to a [`Tracker`]. The real
//! implementation shells out to `bd`; a dry-run tracker fabricates ids so a
//! plan can be previewed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::plan::Tier;

mod bd;
mod dry_run;
mod output;

pub use bd::BdCli;
pub use dry_run::DryRunTracker;
pub use output::{extract_tracker_id, ExtractError, SUCCESS_MARKER};

/// Identifier bd assigned to a created issue (e.g. `bd-42f1`)
///
/// Treated as an opaque token: it is only ever passed back as `--parent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackerId(String);

impl TrackerId {
    /// Wrap a raw id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as printed by the tracker
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single node to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// Level of the node in the tree
    pub tier: Tier,
    /// Issue title
    pub title: String,
    /// Priority (0 = highest)
    pub priority: u8,
    /// Parent issue, absent only for days
    pub parent: Option<TrackerId>,
}

/// Why a creation call produced no id
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// The tracker executable does not exist
    #[error("tracker executable not found at '{0}'. Is bd installed?")]
    NotFound(String),

    /// The process could not be started
    #[error("failed to start tracker: {0}")]
    Spawn(#[source] std::io::Error),

    /// Waiting for the process or reading its output failed
    #[error("failed to read tracker output: {0}")]
    Io(#[source] std::io::Error),

    /// The process did not finish in time and was killed
    #[error("tracker timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The output did not satisfy the success contract
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Outcome of one creation call
pub type CreateResult = std::result::Result<TrackerId, CreateError>;

/// Trait for issue trackers that can create linked nodes
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Command shown to the operator (used in summary hints)
    fn command(&self) -> &str;

    /// Create one node and return its id
    async fn create(&self, request: &CreateRequest) -> CreateResult;
}
