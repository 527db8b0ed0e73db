//! Mortgage Engine CLI
//!
//! Evaluate lead records, preview amortization schedules and look up inferred rates

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mortgage_engine::amortization::infer_rate_from_label;
use mortgage_engine::{EngineConfig, MortgageEngine, ProductCategory};

#[derive(Debug, Parser)]
#[command(name = "mortgage-engine", version, about = "Mortgage eligibility and amortization engine")]
struct Cli {
    /// JSON config file (defaults to $MORTGAGE_ENGINE_CONFIG, then built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize, classify, gate and score a JSON lead record
    Evaluate {
        /// Path to a JSON record
        record: PathBuf,
        /// Also project the loan for this many months
        #[arg(long)]
        horizon: Option<u32>,
    },
    /// Project an amortization schedule
    Amortize {
        #[arg(long)]
        principal: f64,
        /// Annual rate in percent; inferred from --category when omitted
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long, default_value_t = 20)]
        years: u32,
        #[arg(long)]
        horizon: Option<u32>,
        /// Product category used when no rate is given
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the inferred rate range for a product category
    Rate {
        category: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = EngineConfig::resolve(cli.config.as_deref()).context("loading engine config")?;
    let engine = MortgageEngine::new(config);

    let output = match cli.command {
        Command::Evaluate { record, horizon } => {
            let contents = std::fs::read_to_string(&record)
                .with_context(|| format!("reading {}", record.display()))?;
            let value: serde_json::Value = serde_json::from_str(&contents)
                .with_context(|| format!("parsing {}", record.display()))?;

            let (normalized, evaluation) = engine.evaluate_value(value);
            let schedule = horizon.map(|months| engine.assess(&normalized.profile, Some(months)).schedule);

            serde_json::json!({
                "profile": normalized.profile,
                "evaluation": evaluation,
                "schedule": schedule,
            })
        }
        Command::Amortize {
            principal,
            rate,
            years,
            horizon,
            category,
        } => {
            let category = category.as_deref().and_then(ProductCategory::parse);
            let schedule = engine.project_amortization_for(category, principal, rate, years, horizon);
            serde_json::to_value(schedule)?
        }
        Command::Rate { category } => serde_json::to_value(infer_rate_from_label(&category))?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
