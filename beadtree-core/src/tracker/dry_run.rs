//! Tracker that creates nothing

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{CreateRequest, CreateResult, Tracker, TrackerId};

/// Tracker for previews: every call succeeds with a made-up id
#[derive(Debug)]
pub struct DryRunTracker {
    command: String,
    id_prefix: String,
    next: AtomicUsize,
}

impl DryRunTracker {
    /// Create a dry-run tracker mimicking `command`
    pub fn new(command: impl Into<String>, id_prefix: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            id_prefix: id_prefix.into(),
            next: AtomicUsize::new(1),
        }
    }
}

#[async_trait]
impl Tracker for DryRunTracker {
    fn command(&self) -> &str {
        &self.command
    }

    async fn create(&self, _request: &CreateRequest) -> CreateResult {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Ok(TrackerId::new(format!("{}dry{}", self.id_prefix, n)))
    }
}
