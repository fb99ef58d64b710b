use std::{error::Error, path::PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{CategoryQuery, Engine, SeedLoader, TransactionRepository};

use generator::{DEFAULT_COUNT, DEFAULT_RNG_SEED, GeneratorConfig};

mod generator;

#[derive(Parser, Debug)]
#[command(name = "spendview_seed")]
#[command(about = "Seed utilities for Spendview (generate/check seed data)")]
struct Cli {
    /// Log filter (also read from `RUST_LOG`).
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a deterministic synthetic `transactions.json`.
    Generate(GenerateArgs),
    /// Load a seed directory the way the server does and summarize it.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    count: usize,
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    rng_seed: u64,
    /// First day, `YYYY-MM-DD`.
    #[arg(long, default_value = "2024-01-01")]
    from: NaiveDate,
    /// Last day (inclusive), `YYYY-MM-DD`.
    #[arg(long, default_value = "2024-09-16")]
    to: NaiveDate,
    #[arg(long, default_value = "seed/transactions.json")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[arg(long, env = "SPENDVIEW__SEED__DIR", default_value = "seed")]
    dir: PathBuf,
}

fn generate(args: GenerateArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = GeneratorConfig {
        count: args.count,
        rng_seed: args.rng_seed,
        from: args.from,
        to: args.to,
    };
    let transactions = generator::generate(&config)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.output, serde_json::to_string_pretty(&transactions)?)?;

    tracing::info!(
        "generated {} transactions -> {}",
        transactions.len(),
        args.output.display()
    );
    Ok(())
}

fn check(args: CheckArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let store = SeedLoader::new(&args.dir).load()?;
    let status = store.status();

    println!("seed directory: {}", args.dir.display());
    println!("transactions:   {}", status.transactions);

    let engine = Engine::builder().store(store.clone()).build();
    for customer_id in &status.customers {
        let all = store.all(customer_id)?;
        let (Some(newest), Some(oldest)) = (all.first(), all.last()) else {
            println!("customer {customer_id}: no transactions");
            continue;
        };

        let from = oldest.utc_date().format("%Y-%m-%d").to_string();
        let to = newest.utc_date().format("%Y-%m-%d").to_string();
        println!("customer {customer_id}: {} transactions, {from} .. {to}", all.len());

        let breakdown = engine.spending_categories(
            customer_id,
            &CategoryQuery {
                period: None,
                start_date: Some(from),
                end_date: Some(to),
            },
        )?;
        for category in breakdown.categories {
            println!(
                "  {:<16} {:>5} txns {:>12} ({}%)",
                category.name, category.transaction_count, category.amount, category.percentage
            );
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log.as_str())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Check(args) => check(args),
    }
}
