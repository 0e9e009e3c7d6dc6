//! Beadtree Core - Core library for provisioning beads task trees
//!
//! This crate turns a declarative day → story → task plan into linked
//! issues in the `bd` issue tracker, one CLI call per node.

pub mod config;
pub mod error;
pub mod plan;
pub mod provision;
pub mod report;
pub mod tracker;

pub use config::{Config, ProvisionConfig, TrackerConfig, DEFAULT_MAX_TASKS_PER_STORY};
pub use error::{Error, Result};
pub use plan::{load_plan, parse_plan, Day, Plan, Story, Tier};
pub use provision::{Provisioner, RateLimits, RunTally};
pub use report::{ConsoleReporter, Reporter, SilentReporter};
pub use tracker::{
    extract_tracker_id, BdCli, CreateError, CreateRequest, CreateResult, DryRunTracker,
    ExtractError, Tracker, TrackerId,
};
