//! Beadtree CLI - Command line interface for beadtree
//!
//! Provisions a day → story → task plan as linked issues in bd.

mod commands;

use std::path::PathBuf;

use beadtree_core::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{PlanArgs, ProvisionArgs};

/// Beadtree: provision a hierarchical plan into the bd issue tracker
#[derive(Parser, Debug)]
#[command(name = "beadtree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/beadtree/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to bd executable (overrides config and env)
    #[arg(long, global = true, env = "BEADTREE_BD_PATH")]
    bd_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Create the plan's epics, stories and tasks in bd
    #[command(visible_alias = "p")]
    Provision(ProvisionArgs),

    /// Inspect a plan file
    Plan(PlanArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let max_tasks = match &cli.command {
        Some(Commands::Provision(args)) => args.max_tasks,
        Some(Commands::Plan(args)) => args.max_tasks(),
        _ => None,
    };

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.config.as_deref(), cli.bd_path.clone(), max_tasks)?;

    if cli.verbose {
        tracing::info!(
            bd_path = %config.tracker.bd_path,
            id_prefix = %config.tracker.id_prefix,
            timeout = ?config.tracker.timeout,
            max_tasks_per_story = config.provision.max_tasks_per_story,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("beadtree {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Provision(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Plan(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Config) => {
            println!("Beadtree Configuration");
            println!("======================");
            println!();
            println!("Tracker Settings:");
            println!("  bd_path: {}", config.tracker.bd_path);
            println!("  id_prefix: {}", config.tracker.id_prefix);
            println!("  status: {}", config.tracker.status);
            println!("  timeout: {:?}", config.tracker.timeout);
            match &config.tracker.workdir {
                Some(dir) => println!("  workdir: {}", dir.display()),
                None => println!("  workdir: (current directory)"),
            }
            println!();
            println!("Provision Settings:");
            println!(
                "  max_tasks_per_story: {}",
                config.provision.max_tasks_per_story
            );
            println!("  day_delay: {:?}", config.provision.day_delay);
            println!("  story_delay: {:?}", config.provision.story_delay);
            println!("  task_delay: {:?}", config.provision.task_delay);
            println!();
            let path = cli.config.or_else(Config::default_config_path);
            if let Some(path) = path {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Beadtree - Provision hierarchical plans into bd");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
