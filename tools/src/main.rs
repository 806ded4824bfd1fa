//! datagen-runner: headless synthetic dataset generator.
//!
//! Usage:
//!   datagen-runner --seed 42 --out data/raw
//!   datagen-runner --start 2023-01-01 --end 2023-12-31 --customers 10000
//!   datagen-runner --config run_config.json --json

use anyhow::Result;
use chrono::NaiveDate;
use ecomgen_core::{config::GenConfig, pipeline::GenPipeline};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let out_dir: PathBuf = args
        .windows(2)
        .find(|w| w[0] == "--out")
        .map(|w| w[1].as_str())
        .unwrap_or("data/raw")
        .into();
    let json_summary = args.iter().any(|a| a == "--json");

    let mut config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => GenConfig::from_json_file(&w[1])?,
        None => GenConfig::default_run(),
    };
    if let Some(start) = parse_opt_arg::<NaiveDate>(&args, "--start") {
        config.start_date = start;
    }
    if let Some(end) = parse_opt_arg::<NaiveDate>(&args, "--end") {
        config.end_date = end;
    }
    if let Some(customers) = parse_opt_arg::<u32>(&args, "--customers") {
        config.customer_count = customers;
    }

    if !json_summary {
        println!("ecomgen datagen-runner");
        println!("  seed:      {seed}");
        println!("  range:     {}..{}", config.start_date, config.end_date);
        println!("  customers: {}", config.customer_count);
        println!("  out:       {}", out_dir.display());
        println!();
    }

    let pipeline = GenPipeline::new(config, seed)?;
    let dataset = pipeline.run()?;
    dataset.write_csv(&out_dir)?;

    let summary = dataset.summary();
    if json_summary {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("=== RUN SUMMARY ===");
        println!("  customers:       {}", summary.customers);
        println!("  marketing rows:  {}", summary.marketing_rows);
        println!("  orders:          {}", summary.orders);
        println!("  returned orders: {}", summary.returned_orders);
        println!("  returns:         {}", summary.returns);
        println!("  total revenue:   {:.2}", summary.total_revenue);
        println!("  total refunds:   {:.2}", summary.total_refunds);
        println!();
        println!("Wrote: {}", out_dir.display());
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    parse_opt_arg(args, flag).unwrap_or(default)
}

fn parse_opt_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}
