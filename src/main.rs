//! Aletheia - SQL Injection Verification Harness CLI

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing_subscriber::EnvFilter;

use aletheia::config::{self, HarnessConfig};
use aletheia::harness::Harness;
use aletheia::models::{CaseOutcome, CaseRecord, RunSummary, SecurityLevel, Technique};
use aletheia::report;

/// Aletheia - verifies SQL injection detection outcomes across the
/// security levels of a graded vulnerable target
#[derive(Parser)]
#[command(name = "aletheia", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the verification matrix against a target
    Run {
        /// Base URL of the target application
        #[arg(short, long)]
        target: Option<String>,

        /// Login username
        #[arg(short, long)]
        username: Option<String>,

        /// Login password
        #[arg(short, long)]
        password: Option<String>,

        /// Security levels to exercise (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        levels: Option<Vec<String>>,

        /// Techniques to exercise (comma-separated)
        #[arg(short = 'T', long, value_delimiter = ',')]
        techniques: Option<Vec<String>>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Time-based oracle differential threshold in seconds
        #[arg(long)]
        delay_threshold: Option<f64>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the structured case records to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the supported injection techniques
    Techniques,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "aletheia=debug"
    } else {
        "aletheia=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

fn print_banner() {
    let banner = r#"
    ╔══════════════════════════════════════╗
    ║  ALETHEIA v0.1.0                     ║
    ║  SQL Injection Verification Harness  ║
    ╚══════════════════════════════════════╝
    "#;
    println!("{}", banner.cyan());
}

fn parse_list<T: std::str::FromStr<Err = String>>(values: Vec<String>, what: &str) -> Vec<T> {
    values
        .into_iter()
        .map(|v| {
            v.parse::<T>().unwrap_or_else(|e| {
                eprintln!("Error: invalid {what}: {e}");
                std::process::exit(2);
            })
        })
        .collect()
}

fn outcome_cell(record: &CaseRecord) -> String {
    match &record.outcome {
        CaseOutcome::Passed => {
            if record.expected {
                "vulnerability detected (expected)".green().to_string()
            } else {
                "no vulnerability (expected)".green().to_string()
            }
        }
        CaseOutcome::MissedDetection => "vulnerability NOT detected".red().bold().to_string(),
        CaseOutcome::FalsePositive => "false positive detected".red().to_string(),
        CaseOutcome::Errored(e) => format!("errored: {e}").yellow().to_string(),
    }
}

fn print_results(summary: &RunSummary) {
    println!("\n{}", "  Verification Results".bold());
    println!("  {}", "─".repeat(35));

    let mut builder = Builder::default();
    builder.push_record(["Technique", "Level", "Status", "Result", "Time (s)"]);

    for record in &summary.records {
        let status = if record.outcome.is_pass() {
            "pass".green().to_string()
        } else {
            "fail".red().to_string()
        };
        builder.push_record([
            record.technique.to_string(),
            record.level.to_string(),
            status,
            outcome_cell(record),
            format!("{:.2}", record.elapsed_secs),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{table}");

    println!(
        "\n  {} {} {} {}",
        format!("{} cases", summary.records.len()).bold(),
        format!("{} passed", summary.passed()).green(),
        format!("{} failed", summary.failed()).red(),
        format!("{} errored", summary.errored()).yellow(),
    );
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            target,
            username,
            password,
            levels,
            techniques,
            timeout,
            delay_threshold,
            config: config_path,
            output,
            verbose,
        } => {
            init_tracing(verbose);
            print_banner();

            let mut harness_config = if let Some(ref path) = config_path {
                config::load_config(path)?
            } else {
                let default_path = Path::new("config/default.toml");
                if default_path.exists() {
                    config::load_config(default_path)?
                } else {
                    HarnessConfig::default()
                }
            };

            let levels = levels.map(|l| parse_list::<SecurityLevel>(l, "security level"));
            let techniques = techniques.map(|t| parse_list::<Technique>(t, "technique"));

            config::merge_cli_args(
                &mut harness_config,
                target,
                username,
                password,
                timeout,
                delay_threshold,
                levels,
                techniques,
            );

            println!("  {} {}", "Target:".bold(), harness_config.target.green());
            println!(
                "  {} {}",
                "Levels:".bold(),
                harness_config
                    .levels
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
                    .cyan()
            );
            println!(
                "  {} {}\n",
                "Techniques:".bold(),
                harness_config
                    .techniques
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
                    .cyan()
            );

            let harness = Harness::new(harness_config);
            let summary = harness.run().await;

            print_results(&summary);

            if let Some(ref path) = output {
                report::export_json(&summary, path)?;
                println!(
                    "\n  {} {}",
                    "Results saved to:".bold(),
                    path.display().to_string().green()
                );
            }

            if !summary.all_passed() {
                std::process::exit(1);
            }
        }

        Commands::Techniques => {
            print_banner();
            println!("  {}\n", "Supported Techniques:".bold());
            for technique in Technique::ALL {
                println!(
                    "    {} {}",
                    format!("{:15}", technique.to_string()).cyan().bold(),
                    technique.description()
                );
            }
            println!();
        }
    }

    Ok(())
}
