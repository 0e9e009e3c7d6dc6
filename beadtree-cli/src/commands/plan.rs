//! Plan inspection commands

use std::fmt::Write;
use std::path::PathBuf;

use beadtree_core::{load_plan, Config, Plan};
use clap::{Args, Subcommand};

/// Plan inspection commands
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommand,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Show the tree a provisioning run would create
    Show {
        /// Path to plan file
        #[arg(short, long, default_value = "plan.toml")]
        file: PathBuf,

        /// Stories with more tasks than this stay story-only (overrides config)
        #[arg(long)]
        max_tasks: Option<usize>,
    },
}

impl PlanArgs {
    /// Cutoff override given on the command line, if any
    pub fn max_tasks(&self) -> Option<usize> {
        match &self.command {
            PlanCommand::Show { max_tasks, .. } => *max_tasks,
        }
    }

    /// Execute the plan command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        match &self.command {
            PlanCommand::Show { file, .. } => {
                let plan = load_plan(file)
                    .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", file.display(), e))?;

                println!(
                    "Parsed {}: {} days, {} stories, {} tasks",
                    file.display(),
                    plan.days.len(),
                    plan.story_count(),
                    plan.task_count()
                );
                println!();
                print!(
                    "{}",
                    render_tree(&plan, config.provision.max_tasks_per_story)
                );
                Ok(())
            }
        }
    }
}

/// Render the plan as it would be provisioned
fn render_tree(plan: &Plan, max_tasks: usize) -> String {
    let mut out = String::new();

    if !plan.title.is_empty() {
        let _ = writeln!(out, "{}", plan.title);
        let _ = writeln!(out);
    }

    for day in &plan.days {
        let _ = writeln!(out, "📁 Epic (p{}): {}", day.priority, day.title);

        for story in &day.stories {
            if story.tasks_within(max_tasks) {
                let _ = writeln!(out, "  📝 {}", story.title);
                for task in &story.tasks {
                    let _ = writeln!(out, "       └─ {}", task);
                }
            } else {
                let _ = writeln!(
                    out,
                    "  📝 {} ({} tasks, more than {}: story only)",
                    story.title,
                    story.tasks.len(),
                    max_tasks
                );
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "A fully successful run issues {} creation call(s).",
        plan.planned_calls(max_tasks)
    );

    out
}
