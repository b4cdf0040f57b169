//! Comodato Engine CLI
//!
//! Evaluates the comodato viability of a single client from the sales,
//! contract, and catalog feeds, printing the per-line margin cascade and
//! writing the full result to CSV.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use comodato_engine::evaluation::round_currency;
use comodato_engine::{EvaluationParams, EvaluationRunner};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "comodato_engine", about = "Comodato viability evaluation")]
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

    /// Client key to evaluate
    #[arg(long)]
    client: String,

    /// Evaluation date (defaults to today)
    #[arg(long)]
    eval_date: Option<NaiveDate>,

    /// Trailing window length in complete months
    #[arg(long, default_value_t = 6)]
    window_months: u32,

    /// Base commission rate before the comodato penalty
    #[arg(long, default_value_t = 0.02)]
    base_commission: f64,

    /// Viability threshold on the margin3-to-revenue ratio
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,

    /// Use the average list price as cost when the catalog has no entry
    #[arg(long)]
    use_list_price_as_cost: bool,

    /// Output CSV path for the per-line result
    #[arg(long, default_value = "evaluation_output.csv")]
    output: PathBuf,

    /// Print the full evaluation as JSON instead of the table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let eval_date = args
        .eval_date
        .unwrap_or_else(|| Local::now().date_naive());

    let params = EvaluationParams {
        window_months: args.window_months,
        base_commission_rate: args.base_commission,
        use_list_price_as_cost: args.use_list_price_as_cost,
        viability_threshold: args.threshold,
        ..Default::default()
    };

    let runner = EvaluationRunner::from_csv(&args.sales, &args.contracts, &args.catalog)
        .context("failed to load feeds")?
        .with_params(params);

    let evaluation = runner.evaluate(&args.client, eval_date, &[]);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    println!("Comodato Engine v0.1.0");
    println!("======================\n");
    println!("Client: {}", evaluation.client_key);
    println!(
        "Window: [{}, {}) ({} records feed){}",
        evaluation.window_start,
        evaluation.window_end,
        runner.sales_records().len(),
        if evaluation.used_fallback {
            " [fallback: full history]"
        } else {
            ""
        }
    );
    println!();

    println!(
        "{:<10} {:>12} {:>12} {:>10} {:>12} {:>12} {:>12} {:>12}",
        "Product", "Vol/Month", "Rev/Month", "DirMgn%", "Margin1", "Alloc", "Margin2", "Margin3"
    );
    println!("{}", "-".repeat(100));
    for line in &evaluation.product_lines {
        println!(
            "{:<10} {:>12.1} {:>12.2} {:>9.1}% {:>12.0} {:>12.0} {:>12.0} {:>12.0}",
            line.product_code,
            line.volume_month_avg,
            line.revenue_month_avg,
            line.direct_margin_pct * 100.0,
            round_currency(line.margin1),
            round_currency(line.allocated_cost),
            round_currency(line.margin2),
            round_currency(line.margin3),
        );
    }

    println!("\nSummary:");
    println!(
        "  Avg monthly revenue:   ${:.2}",
        evaluation.avg_monthly_revenue
    );
    println!(
        "  Monthly comodato cost: ${:.2}",
        evaluation.total_monthly_comodato_cost
    );
    println!(
        "  Comodato/revenue:      {:.4}",
        evaluation.comodato_to_revenue_ratio
    );
    println!(
        "  Effective commission:  {:.4}",
        evaluation.effective_commission_rate
    );
    println!("  Viability ratio:       {:.4}", evaluation.viability_ratio);
    println!(
        "  Verdict:               {}",
        if evaluation.is_viable { "VIABLE" } else { "NOT VIABLE" }
    );

    // Write full per-line results to CSV
    let mut file = File::create(&args.output)
        .with_context(|| format!("unable to create {}", args.output.display()))?;
    writeln!(
        file,
        "Product,Name,Volume6m,VolumeMonthAvg,Revenue6m,RevenueMonthAvg,UnitPriceAvg,DirectMarginPct,Margin1,AllocatedCost,Margin2,Margin2Pct,Margin3,Margin3Pct"
    )?;
    for line in &evaluation.product_lines {
        writeln!(
            file,
            "{},{},{:.3},{:.3},{:.2},{:.2},{:.4},{:.6},{:.2},{:.2},{:.2},{:.6},{:.2},{:.6}",
            line.product_code,
            line.product_name,
            line.volume_6m,
            line.volume_month_avg,
            line.revenue_6m,
            line.revenue_month_avg,
            line.unit_price_avg,
            line.direct_margin_pct,
            line.margin1,
            line.allocated_cost,
            line.margin2,
            line.margin2_pct,
            line.margin3,
            line.margin3_pct,
        )?;
    }

    println!("\nFull results written to: {}", args.output.display());

    Ok(())
}
