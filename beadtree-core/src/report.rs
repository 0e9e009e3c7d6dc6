//! Progress and summary reporting
//!
//! The engine notifies a [`Reporter`] about every attempt and outcome.
//! Reporters only observe; nothing they do feeds back into the run.

use std::io::Write;

use crate::plan::{Day, Plan, Story, Tier};
use crate::provision::RunTally;
use crate::tracker::{CreateError, CreateRequest, TrackerId};

/// Observer of a provisioning run
///
/// All methods default to doing nothing.
pub trait Reporter: Send {
    /// The run is about to start
    fn run_started(&mut self, _plan: &Plan, _tracker: &str) {}

    /// A creation call is about to be issued
    fn attempt(&mut self, _request: &CreateRequest) {}

    /// A creation call returned an id
    fn created(&mut self, _request: &CreateRequest, _id: &TrackerId) {}

    /// A creation call failed
    fn failed(&mut self, _request: &CreateRequest, _error: &CreateError) {}

    /// A day's epic failed, so nothing below it will be attempted
    fn day_skipped(&mut self, _day: &Day) {}

    /// A story declares too many tasks to create them
    fn tasks_skipped(&mut self, _story: &Story, _max_tasks: usize) {}

    /// The whole plan has been walked
    fn run_finished(&mut self, _tally: &RunTally) {}
}

/// Reporter that prints nothing (tracing events are still emitted)
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

const RULE_WIDTH: usize = 60;

/// Human-readable progress log, indented by tree depth
pub struct ConsoleReporter<W: Write + Send> {
    out: W,
    tracker: String,
}

impl ConsoleReporter<std::io::Stdout> {
    /// Report to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Report to any writer
    pub fn new(out: W) -> Self {
        Self {
            out,
            tracker: "bd".to_string(),
        }
    }

    /// Consume the reporter, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    // Output is best-effort; a closed stdout must not stop the run.
    fn line(&mut self, depth: usize, text: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{:indent$}{}", "", text, indent = depth * 2);
    }

    fn rule(&mut self) {
        self.line(0, "=".repeat(RULE_WIDTH));
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self, plan: &Plan, tracker: &str) {
        self.tracker = tracker.to_string();
        self.rule();
        if plan.title.is_empty() {
            self.line(0, "Setting up beads from plan");
        } else {
            self.line(0, format!("Setting up beads from {}", plan.title));
        }
        self.rule();
    }

    fn attempt(&mut self, request: &CreateRequest) {
        if request.tier == Tier::Day {
            self.line(0, "");
        }
        self.line(
            request.tier.depth(),
            format!("Creating {}: {}", request.tier, request.title),
        );
    }

    fn created(&mut self, request: &CreateRequest, id: &TrackerId) {
        self.line(request.tier.depth() + 1, format!("✓ Created {}", id));
    }

    fn failed(&mut self, request: &CreateRequest, error: &CreateError) {
        self.line(
            request.tier.depth() + 1,
            format!("✗ Failed to create {} ({})", request.tier, error),
        );
    }

    fn day_skipped(&mut self, day: &Day) {
        self.line(0, format!("Skipping {} due to epic creation failure", day.title));
    }

    fn tasks_skipped(&mut self, story: &Story, max_tasks: usize) {
        self.line(
            Tier::Task.depth(),
            format!(
                "Skipping {} tasks (more than {} per story)",
                story.tasks.len(),
                max_tasks
            ),
        );
    }

    fn run_finished(&mut self, tally: &RunTally) {
        self.line(0, "");
        self.rule();
        self.line(0, format!("✓ Setup complete! Created {} beads", tally.created));
        if !tally.is_clean() {
            self.line(0, format!("  {} creation call(s) failed", tally.failed));
        }
        self.rule();
        self.line(0, "");
        let tracker = self.tracker.clone();
        self.line(0, format!("Run '{} status' to see all tasks", tracker));
        self.line(0, format!("Run '{} ready' to see tasks ready to work on", tracker));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::ExtractError;

    fn request(tier: Tier, title: &str, parent: Option<&str>) -> CreateRequest {
        CreateRequest {
            tier,
            title: title.to_string(),
            priority: tier.default_priority(),
            parent: parent.map(TrackerId::new),
        }
    }

    fn render(f: impl FnOnce(&mut ConsoleReporter<Vec<u8>>)) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new());
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_indentation_follows_depth() {
        let out = render(|r| {
            let day = request(Tier::Day, "Day 1", None);
            r.attempt(&day);
            r.created(&day, &TrackerId::new("bd-1"));
            let story = request(Tier::Story, "Story 1.1", Some("bd-1"));
            r.attempt(&story);
            r.created(&story, &TrackerId::new("bd-2"));
            let task = request(Tier::Task, "Task", Some("bd-2"));
            r.attempt(&task);
        });

        assert!(out.contains("\nCreating epic: Day 1\n"));
        assert!(out.contains("\n  ✓ Created bd-1\n"));
        assert!(out.contains("\n  Creating story: Story 1.1\n"));
        assert!(out.contains("\n    ✓ Created bd-2\n"));
        assert!(out.contains("\n    Creating task: Task\n"));
    }

    #[test]
    fn test_failure_line() {
        let out = render(|r| {
            let story = request(Tier::Story, "Story", Some("bd-1"));
            r.failed(&story, &CreateError::Extract(ExtractError::MissingMarker));
        });
        assert!(out.starts_with("    ✗ Failed to create story"));
    }

    #[test]
    fn test_summary_and_hints() {
        let out = render(|r| {
            r.run_started(
                &Plan {
                    title: "PoC".to_string(),
                    days: vec![],
                },
                "./bin/bd.exe",
            );
            r.run_finished(&RunTally {
                created: 5,
                ..Default::default()
            });
        });

        assert!(out.contains("Setting up beads from PoC"));
        assert!(out.contains("✓ Setup complete! Created 5 beads"));
        assert!(out.contains("Run './bin/bd.exe status' to see all tasks"));
        assert!(out.contains("Run './bin/bd.exe ready' to see tasks ready to work on"));
        assert!(!out.contains("failed"));
    }

    #[test]
    fn test_summary_mentions_failures() {
        let out = render(|r| {
            r.run_finished(&RunTally {
                created: 0,
                attempted: 3,
                failed: 3,
                ..Default::default()
            });
        });
        assert!(out.contains("Created 0 beads"));
        assert!(out.contains("3 creation call(s) failed"));
    }
}
