//! CLI command implementations

pub mod plan;
pub mod provision;

pub use plan::PlanArgs;
pub use provision::ProvisionArgs;
