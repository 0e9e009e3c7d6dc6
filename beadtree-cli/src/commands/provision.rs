//! Provision command - Create a plan's tree in bd

use std::path::PathBuf;

use beadtree_core::{
    load_plan, BdCli, Config, ConsoleReporter, DryRunTracker, Provisioner, RateLimits,
};
use clap::Args;

/// Arguments for the provision command
#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Path to plan file
    #[arg(short, long, default_value = "plan.toml")]
    pub file: PathBuf,

    /// Walk the plan without calling bd
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run tally as JSON (progress goes to stderr)
    #[arg(long)]
    pub json: bool,

    /// Stories with more tasks than this stay story-only (overrides config)
    #[arg(long)]
    pub max_tasks: Option<usize>,
}

impl ProvisionArgs {
    /// Execute the provision command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let plan = load_plan(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", self.file.display(), e))?;

        if verbose {
            tracing::info!(
                file = %self.file.display(),
                days = plan.days.len(),
                planned_calls = plan.planned_calls(config.provision.max_tasks_per_story),
                dry_run = self.dry_run,
                "Plan loaded"
            );
        }

        let provisioner = if self.dry_run {
            let tracker = DryRunTracker::new(&config.tracker.bd_path, &config.tracker.id_prefix);
            Provisioner::from_config(tracker, &config.provision).with_rate_limits(RateLimits::none())
        } else {
            Provisioner::from_config(BdCli::from_config(&config.tracker), &config.provision)
        };

        let mut provisioner = if self.json {
            provisioner.with_reporter(ConsoleReporter::new(std::io::stderr()))
        } else {
            provisioner.with_reporter(ConsoleReporter::stdout())
        };

        if self.dry_run && !self.json {
            println!("[Dry run] bd will not be called; ids below are placeholders");
            println!();
        }

        let tally = provisioner.provision(&plan).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&tally)?);
        }

        Ok(())
    }
}
