//! Levels of the provisioned tree

use serde::{Deserialize, Serialize};

/// A level in the day → story → task hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Top level, created as an epic without a parent
    Day,
    /// Created under a day
    Story,
    /// Created under a story
    Task,
}

impl Tier {
    /// Priority used when the plan does not set one
    ///
    /// Days carry their own priority in the plan; this is the fallback.
    pub fn default_priority(&self) -> u8 {
        match self {
            Self::Day => 0,
            Self::Story => 1,
            Self::Task => 2,
        }
    }

    /// Nesting depth, 0 for days
    pub fn depth(&self) -> usize {
        match self {
            Self::Day => 0,
            Self::Story => 1,
            Self::Task => 2,
        }
    }

    /// Whether nodes of this tier need a parent id
    pub fn requires_parent(&self) -> bool {
        !matches!(self, Self::Day)
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Day => "epic",
            Self::Story => "story",
            Self::Task => "task",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
