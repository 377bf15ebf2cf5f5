//! Preprocess command - normalize a directory of raw district files.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use chintai_core::dataset::{district_from_path, find_raw_files, preprocess_files, write_table};
use chintai_core::Pipeline;

/// Arguments for the preprocess command.
#[derive(Args)]
pub struct PreprocessArgs {
    /// Load directory under <data_dir>/raw
    load_dir: String,

    /// Output file under <data_dir>/interim
    #[arg(default_value = "preprocessed.csv")]
    save_path: String,

    /// Override the data directory from the config
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Skip files that fail instead of aborting the run
    #[arg(long)]
    continue_on_error: bool,
}

pub fn run(args: PreprocessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(data_dir) = args.data_dir {
        config.data.data_dir = data_dir;
    }

    let load_dir = config.data.raw_path(&args.load_dir);
    if !load_dir.is_dir() {
        anyhow::bail!("Load directory not found: {}", load_dir.display());
    }

    let files = find_raw_files(&load_dir, &config.data.extension)?;
    println!(
        "{} Found {} files to preprocess",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let pipeline = Pipeline::new(config.pipeline.clone());
    let report = preprocess_files(
        &files,
        &config.data,
        &pipeline,
        args.continue_on_error,
        |path| {
            pb.set_message(district_from_path(path, &config.data.file_prefix));
            pb.inc(1);
        },
    );
    let report = match report {
        Ok(report) => report,
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };

    pb.finish_with_message("Complete");

    if report.processed == 0 {
        anyhow::bail!("No file could be preprocessed");
    }

    let table = &report.table;
    let save_path = config.data.interim_path(&args.save_path);
    write_table(&save_path, table)?;

    println!();
    println!(
        "{} Preprocessed {} listings from {} files in {:?}",
        style("✓").green(),
        table.len(),
        report.processed,
        start.elapsed()
    );
    println!("   Written to {}", save_path.display());

    if !report.skipped.is_empty() {
        println!();
        println!("{}", style("Skipped files:").red());
        for skipped in &report.skipped {
            println!("  - {}: {}", skipped.path.display(), skipped.error);
        }
    }

    Ok(())
}
