//! Summary command - per-district figures of a preprocessed CSV.

use std::path::PathBuf;

use clap::Args;
use console::style;

use chintai_core::dataset::read_listings;
use chintai_core::models::listing::summarize_by_district;

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Preprocessed CSV file
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text table
    Text,
}

pub fn run(args: SummaryArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let listings = read_listings(&args.input)?;
    let summary = summarize_by_district(&listings);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in &summary {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            println!(
                "{} {} listings in {} districts",
                style("ℹ").blue(),
                listings.len(),
                summary.len()
            );
            println!();
            println!("{:<12} {:>8} {:>12} {:>10}", "district", "listings", "rent (k¥)", "area (m²)");
            for row in &summary {
                println!(
                    "{:<12} {:>8} {:>12.1} {:>10.1}",
                    row.district, row.listings, row.mean_rent, row.mean_area
                );
            }
        }
    }

    Ok(())
}
