//! Evaluate every client present in the sales feed
//!
//! Outputs one summary row per client for portfolio review, flagging the
//! clients whose comodato burden makes them non-viable.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use comodato_engine::{ClientEvaluation, EvaluationParams, EvaluationRunner};
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "evaluate_block", about = "Batch comodato evaluation over all clients")]
struct Args {
    /// Sales feed CSV
    #[arg(long, default_value = "sales.csv")]
    sales: PathBuf,

    /// Comodato contracts CSV
    #[arg(long, default_value = "contracts.csv")]
    contracts: PathBuf,

    /// Product cost catalog CSV
    #[arg(long, default_value = "catalog.csv")]
    catalog: PathBuf,

    /// Evaluation date (defaults to today)
    #[arg(long)]
    eval_date: Option<NaiveDate>,

    /// Output CSV path
    #[arg(long, default_value = "block_evaluation_output.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let eval_date = args
        .eval_date
        .unwrap_or_else(|| Local::now().date_naive());

    let start = Instant::now();
    println!("Loading feeds...");

    let runner = EvaluationRunner::from_csv(&args.sales, &args.contracts, &args.catalog)
        .context("failed to load feeds")?
        .with_params(EvaluationParams::default());

    let clients = runner.client_keys();
    println!(
        "Loaded {} sales records, {} contracts, {} clients in {:?}",
        runner.sales_records().len(),
        runner.contracts().len(),
        clients.len(),
        start.elapsed()
    );

    println!("Evaluating at {eval_date}...");
    let eval_start = Instant::now();

    // One independent evaluation per client
    let evaluations: Vec<ClientEvaluation> = clients
        .par_iter()
        .map(|client| runner.evaluate(client, eval_date, &[]))
        .collect();

    println!("Evaluations complete in {:?}", eval_start.elapsed());

    let mut file = File::create(&args.output)
        .with_context(|| format!("unable to create {}", args.output.display()))?;
    writeln!(
        file,
        "Client,Lines,AvgMonthlyRevenue,MonthlyComodatoCost,ComodatoToRevenue,EffectiveCommission,ViabilityRatio,Viable,UsedFallback"
    )?;

    for evaluation in &evaluations {
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.6},{:.6},{:.6},{},{}",
            evaluation.client_key,
            evaluation.product_lines.len(),
            evaluation.avg_monthly_revenue,
            evaluation.total_monthly_comodato_cost,
            evaluation.comodato_to_revenue_ratio,
            evaluation.effective_commission_rate,
            evaluation.viability_ratio,
            evaluation.is_viable,
            evaluation.used_fallback,
        )?;
    }

    println!("Output written to {}", args.output.display());

    let viable = evaluations.iter().filter(|e| e.is_viable).count();
    let fallbacks = evaluations.iter().filter(|e| e.used_fallback).count();
    println!("\nBlock Summary:");
    println!("  Clients evaluated: {}", evaluations.len());
    println!("  Viable:            {viable}");
    println!("  Not viable:        {}", evaluations.len() - viable);
    println!("  Window fallbacks:  {fallbacks}");
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
