//! Plan model and loading
//!
//! A plan is a three-level tree: days (created as epics), stories under
//! each day, and task titles under each story. Plans are read from TOML
//! files so the provisioning engine never depends on specific content.

mod parser;
mod tier;

pub use parser::{load_plan, parse_plan, Day, Plan, Story, MAX_PRIORITY};
pub use tier::Tier;
