//! Evaluate a CSV batch of lead records
//!
//! Prints a per-category summary of eligibility and average score

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use mortgage_engine::profile::load_profiles;
use mortgage_engine::{EngineConfig, Evaluation, MortgageEngine, ProductCategory};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(about = "Evaluate every row of a CSV of lead records")]
struct Args {
    /// CSV file with one raw record per row
    input: PathBuf,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct CategorySummary {
    count: usize,
    eligible: usize,
    score_sum: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = EngineConfig::resolve(args.config.as_deref()).context("loading engine config")?;
    let engine = MortgageEngine::new(config);

    let start = Instant::now();
    let profiles = load_profiles(&args.input, engine.normalizer())
        .with_context(|| format!("loading {}", args.input.display()))?;
    log::info!("loaded {} records in {:?}", profiles.len(), start.elapsed());

    let eval_start = Instant::now();
    let evaluations: Vec<Evaluation> = profiles
        .par_iter()
        .map(|normalized| engine.evaluate_normalized(normalized))
        .collect();
    log::info!("evaluated {} records in {:?}", evaluations.len(), eval_start.elapsed());

    let mut summary: BTreeMap<&'static str, CategorySummary> = BTreeMap::new();
    for evaluation in &evaluations {
        let entry = summary
            .entry(evaluation.classification.category.as_str())
            .or_default();
        entry.count += 1;
        entry.score_sum += evaluation.score.score as u64;
        if evaluation.eligibility.eligible {
            entry.eligible += 1;
        }
    }

    println!("{:<16} {:>8} {:>10} {:>10}", "Category", "Count", "Eligible", "AvgScore");
    println!("{}", "-".repeat(47));
    for category in ProductCategory::ALL {
        let Some(s) = summary.get(category.as_str()) else {
            continue;
        };
        println!(
            "{:<16} {:>8} {:>10} {:>10.1}",
            category.as_str(),
            s.count,
            s.eligible,
            s.score_sum as f64 / s.count as f64
        );
    }
    println!("\nTotal records: {}", evaluations.len());

    Ok(())
}
