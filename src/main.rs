use std::path::PathBuf;

use clap::{Parser, Subcommand};

use roster_import::config::Config;
use roster_import::error::{ImportError, Result};
use roster_import::geocoding::GoogleGeocoder;
use roster_import::pipeline::ImportOutcome;
use roster_import::{logging, pipeline, source};

#[derive(Parser)]
#[command(name = "roster-import")]
#[command(about = "Doctors roster importer: Excel to geocoded JSON")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full import: read, normalize, validate, geocode, write JSON
    Import {
        /// Source workbook, overrides the configured path
        #[arg(long)]
        input: Option<PathBuf>,
        /// Primary JSON output, overrides the configured path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a workbook without geocoding or writing output
    Check {
        /// Source workbook, overrides the configured path
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Import { input, output } => {
            let input = input.unwrap_or_else(|| PathBuf::from(&config.source.path));
            let output = output.unwrap_or_else(|| PathBuf::from(&config.output.path));

            let api_key = std::env::var(&config.geocoding.api_key_env).map_err(|_| {
                ImportError::Config(format!(
                    "geocoding API key not set; export {} or point geocoding.api_key_env at another variable",
                    config.geocoding.api_key_env
                ))
            })?;
            let geocoder = GoogleGeocoder::new(
                api_key,
                config.geocoding.delay_ms,
                config.geocoding.timeout_seconds,
            )?;

            println!("🔄 Importing roster from '{}'...", input.display());
            let rows = source::read_rows(&input)?;
            let outcome = pipeline::process_rows(rows, &geocoder).await;
            let (primary, backup) = pipeline::write_outputs(&outcome.records, &output)?;

            print_summary(&outcome);
            println!("   Output file: {}", primary.display());
            println!("   Backup file: {}", backup.display());
            println!("✅ Import complete.");
        }
        Commands::Check { input } => {
            let input = input.unwrap_or_else(|| PathBuf::from(&config.source.path));

            println!("🔎 Checking roster '{}'...", input.display());
            let rows = source::read_rows(&input)?;
            let outcome = pipeline::check_rows(rows);

            print_summary(&outcome);
            if outcome.diagnostics.is_empty() {
                println!("✅ No issues found.");
            }
        }
    }

    Ok(())
}

fn print_summary(outcome: &ImportOutcome) {
    println!("\n📊 Import results:");
    println!("   Records: {}", outcome.records.len());
    println!("   Geocoded: {}", outcome.geocoded);
    println!("   Issues: {}", outcome.diagnostics.len());

    if !outcome.diagnostics.is_empty() {
        println!("\n⚠️  Issues encountered:");
        for diagnostic in &outcome.diagnostics {
            println!("   - {diagnostic}");
        }
    }
}
