use clap::{Parser, Subcommand};
use std::fs;
use tracing::error;

use exercise_scraper::config::PipelineConfig;
use exercise_scraper::logging;
use exercise_scraper::pipeline::Pipeline;
use exercise_scraper::types::ExerciseCollection;

#[derive(Parser)]
#[command(name = "exercise_scraper")]
#[command(about = "Instructional exercise content normalization pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean descriptions, merge tag overrides, and filter non-exercises
    Process {
        /// Path to the scraped collection JSON for one provider
        #[arg(long)]
        input: String,
        /// Where to write the transformed collection
        #[arg(long)]
        output: String,
        /// Pipeline configuration (skip-list, blocked tags, overrides)
        #[arg(long, default_value = "config.toml")]
        config: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            config,
        } => {
            println!("🔄 Running normalization pipeline...");

            let config = PipelineConfig::load(&config)?;
            let collection: ExerciseCollection = serde_json::from_str(&fs::read_to_string(&input)?)?;

            let pipeline = Pipeline::new(config);
            match pipeline.process(collection) {
                Ok((transformed, summary)) => {
                    fs::write(&output, serde_json::to_string_pretty(&transformed)?)?;

                    println!("\n📊 Pipeline Results:");
                    println!("   Cleaned: {}", summary.cleaned);
                    println!("   Tagged via overrides: {}", summary.merged);
                    println!("   Removed by filter: {}", summary.removed_by_filter);
                    println!("   Output file: {}", output);

                    if !summary.malformed.is_empty() {
                        println!("\n⚠️  Degraded to empty descriptions:");
                        for id in &summary.malformed {
                            println!("   - {}", id);
                        }
                    }
                    if !summary.orphaned_overrides.is_empty() {
                        println!("\n⚠️  Orphaned override entries:");
                        for id in &summary.orphaned_overrides {
                            println!("   - {}", id);
                        }
                    }
                    if !summary.skipped_invalid.is_empty() {
                        println!("\n⚠️  Records excluded for missing ids:");
                        for label in &summary.skipped_invalid {
                            println!("   - {}", label);
                        }
                    }
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    println!("❌ Pipeline failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
