//! Plan file parser

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Lowest priority bd accepts (0 is highest)
pub const MAX_PRIORITY: u8 = 4;

/// A parsed plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// Title of the plan
    #[serde(default)]
    pub title: String,
    /// Days in the plan, in creation order
    #[serde(default)]
    pub days: Vec<Day>,
}

/// A day in the plan (corresponds to an epic)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Day {
    /// Epic title
    pub title: String,
    /// Epic priority (0 = highest)
    #[serde(default)]
    pub priority: u8,
    /// Stories under this day
    #[serde(default)]
    pub stories: Vec<Story>,
}

/// A story under a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Story {
    /// Story title
    pub title: String,
    /// Task titles
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl Story {
    /// Whether this story's tasks are small enough to be created
    pub fn tasks_within(&self, max_tasks: usize) -> bool {
        self.tasks.len() <= max_tasks
    }
}

impl Plan {
    /// Total number of stories across all days
    pub fn story_count(&self) -> usize {
        self.days.iter().map(|d| d.stories.len()).sum()
    }

    /// Total number of declared tasks, including ones over the cutoff
    pub fn task_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| &d.stories)
            .map(|s| s.tasks.len())
            .sum()
    }

    /// Number of creation calls a run issues when every call succeeds
    pub fn planned_calls(&self, max_tasks: usize) -> usize {
        self.days
            .iter()
            .map(|day| {
                1 + day
                    .stories
                    .iter()
                    .map(|s| 1 + if s.tasks_within(max_tasks) { s.tasks.len() } else { 0 })
                    .sum::<usize>()
            })
            .sum()
    }

    /// Check titles and priorities
    pub fn validate(&self) -> Result<()> {
        for (i, day) in self.days.iter().enumerate() {
            if day.title.trim().is_empty() {
                return Err(Error::Plan(format!("day #{} has an empty title", i + 1)));
            }
            if day.priority > MAX_PRIORITY {
                return Err(Error::Plan(format!(
                    "day '{}' has priority {}, expected 0-{}",
                    day.title, day.priority, MAX_PRIORITY
                )));
            }

            for (j, story) in day.stories.iter().enumerate() {
                if story.title.trim().is_empty() {
                    return Err(Error::Plan(format!(
                        "story #{} of '{}' has an empty title",
                        j + 1,
                        day.title
                    )));
                }
                if let Some(k) = story.tasks.iter().position(|t| t.trim().is_empty()) {
                    return Err(Error::Plan(format!(
                        "task #{} of '{}' has an empty title",
                        k + 1,
                        story.title
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Parse and validate plan TOML
pub fn parse_plan(content: &str) -> Result<Plan> {
    let plan: Plan = toml::from_str(content)?;
    plan.validate()?;
    Ok(plan)
}

/// Read and parse a plan file
pub fn load_plan(path: impl AsRef<Path>) -> Result<Plan> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_plan(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PLAN: &str = r#"
title = "Test Plan"

[[days]]
title = "Day 1: Setup"
priority = 0

[[days.stories]]
title = "Story 1.1: Environment"
tasks = ["Create venv", "Install deps"]

[[days.stories]]
title = "Story 1.2: Big story"
tasks = ["a", "b", "c", "d", "e", "f"]

[[days]]
title = "Day 2: Pipeline"
priority = 1

[[days.stories]]
title = "Story 2.1: No tasks"
"#;

    #[test]
    fn test_parse_plan_title() {
        let plan = parse_plan(SAMPLE_PLAN).unwrap();
        assert_eq!(plan.title, "Test Plan");
    }

    #[test]
    fn test_parse_days() {
        let plan = parse_plan(SAMPLE_PLAN).unwrap();
        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.days[0].title, "Day 1: Setup");
        assert_eq!(plan.days[1].priority, 1);
    }

    #[test]
    fn test_parse_stories_and_tasks() {
        let plan = parse_plan(SAMPLE_PLAN).unwrap();
        let stories = &plan.days[0].stories;
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].tasks, vec!["Create venv", "Install deps"]);
        assert!(plan.days[1].stories[0].tasks.is_empty());
    }

    #[test]
    fn test_priority_defaults_to_zero() {
        let plan = parse_plan("[[days]]\ntitle = \"Day\"\n").unwrap();
        assert_eq!(plan.days[0].priority, 0);
    }

    #[test]
    fn test_counts() {
        let plan = parse_plan(SAMPLE_PLAN).unwrap();
        assert_eq!(plan.story_count(), 3);
        assert_eq!(plan.task_count(), 8);
    }

    #[test]
    fn test_planned_calls_skip_large_stories() {
        let plan = parse_plan(SAMPLE_PLAN).unwrap();
        // 2 days + 3 stories + 2 tasks; the six-task story contributes none
        assert_eq!(plan.planned_calls(5), 7);
        assert_eq!(plan.planned_calls(6), 13);
    }

    #[test]
    fn test_empty_plan_is_valid() {
        let plan = parse_plan("").unwrap();
        assert!(plan.days.is_empty());
        assert_eq!(plan.planned_calls(5), 0);
    }

    #[test]
    fn test_rejects_empty_title() {
        let err = parse_plan("[[days]]\ntitle = \"  \"\n").unwrap_err();
        assert!(matches!(err, Error::Plan(_)));
    }

    #[test]
    fn test_rejects_empty_task_title() {
        let content = r#"
[[days]]
title = "Day"
[[days.stories]]
title = "Story"
tasks = ["ok", ""]
"#;
        let err = parse_plan(content).unwrap_err();
        assert!(err.to_string().contains("task #2"));
    }

    #[test]
    fn test_rejects_out_of_range_priority() {
        let err = parse_plan("[[days]]\ntitle = \"Day\"\npriority = 7\n").unwrap_err();
        assert!(matches!(err, Error::Plan(_)));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = parse_plan("[[days]]\ntitle = \"Day\"\nowner = \"me\"\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_bundled_poc_plan() {
        let plan = parse_plan(include_str!("../../../plans/poc.toml")).unwrap();
        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.story_count(), 30);
        assert_eq!(plan.task_count(), 118);
        // Two six-task stories are created without their tasks
        assert_eq!(plan.planned_calls(5), 143);
    }

    #[test]
    fn test_load_plan_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        std::fs::write(&path, SAMPLE_PLAN).unwrap();

        let plan = load_plan(&path).unwrap();
        assert_eq!(plan.days.len(), 2);
    }

    #[test]
    fn test_load_missing_plan() {
        let err = load_plan("/nonexistent/plan-12345.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
