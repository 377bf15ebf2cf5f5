//! Raw and interim listing datasets on disk.
//!
//! A scrape produces one CSV per district (`suumo_港区.csv`) inside a load
//! directory. Preprocessing normalizes each file on its own and writes the
//! concatenation as a single interim CSV.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use tracing::{debug, error, info, warn};

use crate::error::{ChintaiError, Result};
use crate::models::config::DataConfig;
use crate::models::listing::{Listing, DISTRICT};
use crate::pipeline::Pipeline;
use crate::table::{Table, Value};

/// District name encoded in a raw file name.
pub fn district_from_path(path: &Path, prefix: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_prefix(prefix) {
        Some(district) => district.to_string(),
        None => stem,
    }
}

/// Raw files of one load directory, sorted by path.
pub fn find_raw_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );
    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry {}: {}", e.path().display(), e.error());
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(ChintaiError::NoInput(dir.display().to_string()));
    }

    debug!("Found {} raw files in {}", files.len(), dir.display());
    Ok(files)
}

/// Load one raw file and tag every row with its district.
pub fn load_district(path: &Path, config: &DataConfig) -> Result<Table> {
    let mut table = Table::from_csv_reader(File::open(path)?)?;
    let district = district_from_path(path, &config.file_prefix);

    let values = vec![Value::text(district.as_str()); table.len()];
    table.set_column(DISTRICT, values)?;

    debug!(rows = table.len(), district = district.as_str(), "loaded raw file");
    Ok(table)
}

/// Load and normalize one raw file. Any stage failure rejects the file.
pub fn preprocess_file(path: &Path, config: &DataConfig, pipeline: &Pipeline) -> Result<Table> {
    let table = load_district(path, config)?;
    pipeline.run(table)
}

/// A raw file rejected during a run that skips failures.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ChintaiError,
}

/// Outcome of preprocessing a list of raw files.
#[derive(Debug)]
pub struct PreprocessReport {
    /// Concatenation of every file that went through.
    pub table: Table,
    pub processed: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Normalize `files` one by one and concatenate the results.
///
/// A failing file aborts the run with [`ChintaiError::File`], unless
/// `skip_failures` is set, in which case it is recorded in the report.
/// `on_file` is called after each file, whatever the outcome.
pub fn preprocess_files<F>(
    files: &[PathBuf],
    config: &DataConfig,
    pipeline: &Pipeline,
    skip_failures: bool,
    mut on_file: F,
) -> Result<PreprocessReport>
where
    F: FnMut(&Path),
{
    let mut tables = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();

    for path in files {
        match preprocess_file(path, config, pipeline) {
            Ok(table) => {
                info!("{}: {} listings", path.display(), table.len());
                tables.push(table);
            }
            Err(e) if skip_failures => {
                warn!("Failed to preprocess {}: {}", path.display(), e);
                skipped.push(SkippedFile {
                    path: path.clone(),
                    error: e,
                });
            }
            Err(e) => {
                error!("Failed to preprocess {}: {}", path.display(), e);
                return Err(ChintaiError::File {
                    path: path.clone(),
                    source: Box::new(e),
                });
            }
        }
        on_file(path);
    }

    let processed = tables.len();
    let table = Table::concat(tables);
    info!("Preprocessed {} listings from {} files", table.len(), processed);

    Ok(PreprocessReport {
        table,
        processed,
        skipped,
    })
}

/// Normalize every raw file of `load_dir`. The first failing file aborts.
pub fn preprocess_dir(load_dir: &Path, config: &DataConfig, pipeline: &Pipeline) -> Result<Table> {
    let files = find_raw_files(load_dir, &config.extension)?;
    let report = preprocess_files(&files, config, pipeline, false, |_| {})?;
    Ok(report.table)
}

/// Write a table, creating the parent directory if needed.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    table.write_csv(File::create(path)?)?;
    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Read a preprocessed CSV back as a table, derived columns typed.
pub fn read_interim(path: &Path) -> Result<Table> {
    Table::from_interim_csv(File::open(path)?)
}

/// Read a preprocessed CSV back as typed listings.
pub fn read_listings(path: &Path) -> Result<Vec<Listing>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let listings = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<Listing>, _>>()?;
    Ok(listings)
}
