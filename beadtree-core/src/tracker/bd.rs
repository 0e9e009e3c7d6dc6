//! bd (beads) CLI tracker

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{extract_tracker_id, CreateError, CreateRequest, CreateResult, Tracker, TrackerId};
use crate::config::TrackerConfig;

/// Tracker that runs `bd create` once per node
#[derive(Debug, Clone)]
pub struct BdCli {
    bd_path: String,
    id_prefix: String,
    status: String,
    timeout: Duration,
    workdir: Option<PathBuf>,
}

impl BdCli {
    /// Create a bd tracker with default settings
    pub fn new() -> Self {
        Self::from_config(&TrackerConfig::default())
    }

    /// Create a bd tracker from configuration
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            bd_path: config.bd_path.clone(),
            id_prefix: config.id_prefix.clone(),
            status: config.status.clone(),
            timeout: config.timeout,
            workdir: config.workdir.clone(),
        }
    }

    /// Use a custom path to the bd executable
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.bd_path = path.into();
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run bd in a specific directory
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    /// Build the `bd create` command for a request
    ///
    /// `bd create <title> -p <priority> --status <status> [--parent <id>]`
    pub fn build_command(&self, request: &CreateRequest) -> Command {
        let mut cmd = Command::new(&self.bd_path);
        cmd.arg("create")
            .arg(&request.title)
            .arg("-p")
            .arg(request.priority.to_string())
            .arg("--status")
            .arg(&self.status);

        if let Some(ref parent) = request.parent {
            cmd.arg("--parent").arg(parent.as_str());
        }

        if let Some(ref workdir) = self.workdir {
            cmd.current_dir(workdir);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd
    }
}

impl Default for BdCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tracker for BdCli {
    fn command(&self) -> &str {
        &self.bd_path
    }

    async fn create(&self, request: &CreateRequest) -> CreateResult {
        let child = self.build_command(request).spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CreateError::NotFound(self.bd_path.clone())
            } else {
                CreateError::Spawn(e)
            }
        })?;

        // Dropping the future on timeout kills the child (kill_on_drop)
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CreateError::Timeout(self.timeout))?
            .map_err(CreateError::Io)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}\n{}", stdout.trim(), stderr.trim());

        debug!(
            title = %request.title,
            status = %output.status,
            output = %combined.trim(),
            "bd create finished"
        );

        let id: TrackerId = extract_tracker_id(&combined, &self.id_prefix)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Tier;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_root_command_has_no_parent() {
        let bd = BdCli::new();
        let request = CreateRequest {
            tier: Tier::Day,
            title: "Day 1: Setup".to_string(),
            priority: 0,
            parent: None,
        };

        let cmd = bd.build_command(&request);
        assert_eq!(cmd.as_std().get_program(), "bd");
        assert_eq!(
            args(&cmd),
            vec!["create", "Day 1: Setup", "-p", "0", "--status", "open"]
        );
    }

    #[test]
    fn test_child_command_carries_parent() {
        let bd = BdCli::new().with_path("./bin/bd.exe");
        let request = CreateRequest {
            tier: Tier::Task,
            title: "Install deps".to_string(),
            priority: 2,
            parent: Some(TrackerId::new("bd-7c")),
        };

        let cmd = bd.build_command(&request);
        assert_eq!(cmd.as_std().get_program(), "./bin/bd.exe");
        assert_eq!(
            args(&cmd),
            vec![
                "create",
                "Install deps",
                "-p",
                "2",
                "--status",
                "open",
                "--parent",
                "bd-7c"
            ]
        );
    }

    #[test]
    fn test_status_from_config() {
        let config = TrackerConfig {
            status: "in_progress".to_string(),
            ..Default::default()
        };
        let bd = BdCli::from_config(&config);
        let request = CreateRequest {
            tier: Tier::Story,
            title: "Story".to_string(),
            priority: 1,
            parent: Some(TrackerId::new("bd-1")),
        };

        assert!(args(&bd.build_command(&request)).contains(&"in_progress".to_string()));
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let bd = BdCli::new().with_path("/usr/bin/nonexistent-bd-binary");
        let request = CreateRequest {
            tier: Tier::Day,
            title: "Day".to_string(),
            priority: 0,
            parent: None,
        };

        let err = bd.create(&request).await.unwrap_err();
        assert!(matches!(err, CreateError::NotFound(_)));
    }
}
