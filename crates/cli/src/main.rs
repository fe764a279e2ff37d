//! Unseal CLI - repair "damaged" application bundles from the terminal
//!
//! Thin presentation shell: all repair logic lives in unseal-core, all
//! process spawning in unseal-infra-system. This binary only wires them
//! together and renders the outcome.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use unseal_core::application::{RepairEngine, RepairLane};
use unseal_core::domain::RepairOutcome;
use unseal_infra_system::SystemCommandRunner;

#[derive(Parser)]
#[command(name = "unseal")]
#[command(about = "Remove macOS Gatekeeper quarantine from an application bundle", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip the quarantine attributes from a bundle and verify the repair
    Repair {
        /// Path to the application bundle (e.g. /Applications/Foo.app)
        path: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the Gatekeeper trust assessment without modifying anything
    Assess {
        /// Path to the application bundle
        path: String,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let log_format = std::env::var("UNSEAL_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("unseal=warn"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

fn render_outcome(path: &str, outcome: &RepairOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        RepairOutcome::Success => {
            println!("{} {}", "Repaired:".green().bold(), path);
        }
        RepairOutcome::Failure(diag) => {
            println!("{} {}", "Repair failed:".red().bold(), diag.title);
            println!("  {}", diag.message);
            println!("  {} {}", "command:".dimmed(), diag.command);
            if !diag.output.is_empty() {
                println!("  {} {}", "output:".dimmed(), diag.output.trim_end());
            }
            if !diag.suggestions.is_empty() {
                println!("{}", "Suggestions:".bold());
                for suggestion in &diag.suggestions {
                    println!("  - {}", suggestion);
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let runner = Arc::new(SystemCommandRunner::new());
    let engine = Arc::new(RepairEngine::new(runner));

    match cli.command {
        Commands::Repair { path, json } => {
            let lane = RepairLane::new(engine);
            let ticket = lane.submit(path.clone());

            let outcome = match ticket.outcome().await {
                Ok(outcome) => outcome,
                Err(e) => {
                    eprintln!("{} {}", "error:".red().bold(), e);
                    lane.shutdown().await;
                    std::process::exit(2);
                }
            };
            lane.shutdown().await;

            render_outcome(&path, &outcome, json)?;
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Assess { path, json } => {
            let assessment = match engine.assess(&path).await {
                Ok(assessment) => assessment,
                Err(e) => {
                    eprintln!("{} {}", "error:".red().bold(), e);
                    std::process::exit(2);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{} {}", "Trust status:".bold(), assessment.status);
                if !assessment.details.is_empty() {
                    println!("{}", assessment.details.trim_end());
                }
            }
        }
    }

    Ok(())
}
