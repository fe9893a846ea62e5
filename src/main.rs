use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use swift_directory::{
    import_records, load_records, BankLookup, Config, Directory, RecordValidator, RequestContext,
};

#[derive(Parser)]
#[command(name = "swift-directory", version, about = "SWIFT/BIC bank directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a CSV or JSON directory file into the configured store
    Import {
        /// Source file (defaults to MIGRATION_FILE)
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Look up one SWIFT code (headquarters come with their branches)
    Lookup { swift_code: String },
    /// List every bank registered in a country
    Country { country_iso2: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("swift_directory=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Import { source } => run_import(&config, source).await,
        Command::Lookup { swift_code } => run_lookup(&config, &swift_code).await,
        Command::Country { country_iso2 } => run_country(&config, &country_iso2).await,
    }
}

async fn run_import(config: &Config, source: Option<PathBuf>) -> Result<()> {
    println!("🏦 SWIFT Directory - Data Import");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let source = source.unwrap_or_else(|| config.migration_file.clone());

    // 1. Parse source file
    println!("\n📂 Loading {}...", source.display());
    let batch = load_records(&source)?;
    println!("✓ Loaded {} records", batch.records.len());
    for skipped in &batch.skipped {
        println!("  ⚠️  line {}: {}", skipped.line, skipped.reason);
    }

    // 2. Open store
    println!("\n🔧 Opening store ({:?})...", config.store_backend);
    let store = config.open_store()?;
    println!("✓ Store ready: {}", config.db_path.display());

    // 3. Insert records
    println!("\n💾 Inserting records...");
    let loaded = batch.records.len();
    let report = import_records(store, batch.records).await;

    // 4. Summary
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Loaded:   {}", loaded);
    println!("✓ Inserted: {}", report.inserted);
    println!("✓ Skipped:  {}", batch.skipped.len());
    if !report.failed.is_empty() {
        for (code, reason) in &report.failed {
            eprintln!("❌ {}: {}", code, reason);
        }
        bail!("{} records could not be stored", report.failed.len());
    }
    println!("🎉 Import complete!");

    Ok(())
}

fn open_directory(config: &Config) -> Result<Directory> {
    Ok(Directory::new(config.open_store()?).with_fetch_timeout(config.fetch_timeout))
}

async fn run_lookup(config: &Config, swift_code: &str) -> Result<()> {
    let code = RecordValidator::new().validate_swift_code(swift_code)?;
    let directory = open_directory(config)?;
    let ctx = RequestContext::with_timeout(config.request_timeout);

    let Some(found) = directory.lookup(&ctx, &code).await? else {
        bail!("the SWIFT code {} was not found", code);
    };

    let record = found.record();
    println!("🏦 {} - {}", record.swift_code, record.bank_name);
    println!("   {}", record.address);
    println!("   {} ({})", record.country_name, record.country_iso2);

    if let BankLookup::Headquarters { branches, .. } = &found {
        let mut collected: Vec<_> = branches.collected.iter().collect();
        collected.sort_by(|a, b| a.swift_code.cmp(&b.swift_code));

        println!("\n📋 Branches: {}", collected.len());
        for branch in collected {
            println!("   {}  {}", branch.swift_code, branch.address);
        }
        for warning in branches.failure_descriptions() {
            println!("   ⚠️  {}", warning);
        }
    }

    Ok(())
}

async fn run_country(config: &Config, country_iso2: &str) -> Result<()> {
    let country_iso2 = RecordValidator::new().validate_country_code(country_iso2)?;
    let directory = open_directory(config)?;
    let ctx = RequestContext::with_timeout(config.request_timeout);

    let result = directory.resolve_country(&ctx, &country_iso2).await?;
    let mut collected: Vec<_> = result.collected.iter().collect();
    collected.sort_by(|a, b| a.swift_code.cmp(&b.swift_code));

    println!(
        "🌍 {} - {} banks",
        swift_directory::country::country_name(&country_iso2).unwrap_or_default(),
        collected.len()
    );
    for bank in collected {
        let marker = if bank.is_headquarter { "HQ" } else { "  " };
        println!("   {} {}  {}", marker, bank.swift_code, bank.bank_name);
    }
    for warning in result.failure_descriptions() {
        println!("   ⚠️  {}", warning);
    }

    Ok(())
}
