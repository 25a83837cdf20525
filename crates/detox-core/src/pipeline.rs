//! The preparation pipeline with explicit stages.
//!
//! Stages run strictly top-to-bottom, each consuming the previous stage's
//! table:
//! 1. **Load**: read the tab-separated corpus into a typed frame
//! 2. **Normalize**: rename the first source column to `id`
//! 3. **Sort**: ascending by reference toxicity
//! 4. **Band**: drop the uncertain middle rank-band
//! 5. **Swap**: exchange reference/translation roles for every row
//! 6. **Filter**: keep rows below the translation-toxicity threshold
//! 7. **Split**: seeded randomized train/validation/test partition
//! 8. **Write**: cleaned table plus the three splits as CSV
//!
//! The run is all-or-nothing: the first error aborts it, and no partial
//! outputs are cleaned up.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use detox_ingest::{build_data_frame, read_tsv, write_csv};
use detox_model::{ID, PrepareOptions, REF_TOX};

use crate::split::{SplitFrames, split_frames};
use crate::transforms::{
    drop_uncertain_band, filter_by_translation_toxicity, rename_column, sort_by_score,
    swap_orientation,
};

pub const CLEANED_FILE: &str = "cleaned.csv";
pub const TRAIN_FILE: &str = "train.csv";
pub const VALIDATION_FILE: &str = "validation.csv";
pub const TEST_FILE: &str = "test.csv";

/// Input for a preparation run.
pub struct PrepareInput<'a> {
    /// Tab-separated source corpus.
    pub input: &'a Path,
    /// Directory receiving the cleaned table and the splits.
    pub output_dir: &'a Path,
    pub options: &'a PrepareOptions,
    /// Run every stage but write nothing.
    pub dry_run: bool,
}

/// Result of the cleaning stage (stages 2-6).
struct CleanResult {
    frame: DataFrame,
    band_removed: usize,
}

/// Files written by a run; all `None` under `dry_run`.
#[derive(Debug, Default)]
pub struct PrepareOutputs {
    pub cleaned: Option<PathBuf>,
    pub train: Option<PathBuf>,
    pub validation: Option<PathBuf>,
    pub test: Option<PathBuf>,
}

/// Row counts and written paths for the whole run.
#[derive(Debug)]
pub struct PrepareSummary {
    pub loaded_rows: usize,
    pub band_removed_rows: usize,
    pub cleaned_rows: usize,
    pub train_rows: usize,
    pub valid_rows: usize,
    pub test_rows: usize,
    pub outputs: PrepareOutputs,
}

/// Run the full preparation pipeline.
pub fn run_prepare(input: PrepareInput<'_>) -> Result<PrepareSummary> {
    input.options.validate()?;

    let df = load_stage(input.input)?;
    let loaded_rows = df.height();

    let CleanResult {
        frame: cleaned,
        band_removed,
    } = clean_stage(df, input.options)?;
    let cleaned_rows = cleaned.height();

    let splits = split_stage(&cleaned, input.options)?;

    let outputs = if input.dry_run {
        info!("dry run, skipping output stage");
        PrepareOutputs::default()
    } else {
        write_stage(&cleaned, &splits, input.output_dir)?
    };

    Ok(PrepareSummary {
        loaded_rows,
        band_removed_rows: band_removed,
        cleaned_rows,
        train_rows: splits.train.height(),
        valid_rows: splits.valid.height(),
        test_rows: splits.test.height(),
        outputs,
    })
}

fn load_stage(path: &Path) -> Result<DataFrame> {
    let span = info_span!("load", input = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let table = read_tsv(path)?;
    let df = build_data_frame(&table).with_context(|| format!("type {}", path.display()))?;

    info!(
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "corpus loaded"
    );
    Ok(df)
}

/// Stages 2-6: normalize, sort, band removal, swap, toxicity filter.
fn clean_stage(mut df: DataFrame, options: &PrepareOptions) -> Result<CleanResult> {
    let span = info_span!("clean");
    let _guard = span.enter();
    let start = Instant::now();
    let input_rows = df.height();

    let first_column = df
        .get_column_names()
        .first()
        .map(|name| name.to_string())
        .unwrap_or_default();
    rename_column(&mut df, &first_column, ID).context("normalize identifier column")?;

    let sorted = sort_by_score(&df, REF_TOX).context("sort by reference toxicity")?;
    let trimmed = drop_uncertain_band(&sorted, options.lower_bound, options.upper_bound)
        .context("drop uncertain band")?;
    let band_removed = sorted.height() - trimmed.height();

    let swapped = swap_orientation(&trimmed).context("swap orientation")?;
    let filtered = filter_by_translation_toxicity(&swapped, options.toxicity_threshold)
        .context("filter by translation toxicity")?;

    info!(
        input_rows,
        band_removed,
        swapped_rows = swapped.height(),
        output_rows = filtered.height(),
        threshold = options.toxicity_threshold,
        duration_ms = start.elapsed().as_millis(),
        "cleaning complete"
    );
    Ok(CleanResult {
        frame: filtered,
        band_removed,
    })
}

fn split_stage(cleaned: &DataFrame, options: &PrepareOptions) -> Result<SplitFrames> {
    let span = info_span!("split");
    let _guard = span.enter();
    let start = Instant::now();

    let splits = split_frames(cleaned, options.split, options.seed).context("split dataset")?;

    info!(
        train_rows = splits.train.height(),
        valid_rows = splits.valid.height(),
        test_rows = splits.test.height(),
        seed = options.seed,
        duration_ms = start.elapsed().as_millis(),
        "split complete"
    );
    Ok(splits)
}

fn write_stage(
    cleaned: &DataFrame,
    splits: &SplitFrames,
    output_dir: &Path,
) -> Result<PrepareOutputs> {
    let span = info_span!("write", output_dir = %output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let mut outputs = PrepareOutputs::default();
    for (frame, file, slot) in [
        (cleaned, CLEANED_FILE, &mut outputs.cleaned),
        (&splits.train, TRAIN_FILE, &mut outputs.train),
        (&splits.valid, VALIDATION_FILE, &mut outputs.validation),
        (&splits.test, TEST_FILE, &mut outputs.test),
    ] {
        let path = output_dir.join(file);
        write_csv(frame, &path)?;
        *slot = Some(path);
    }

    info!(
        files = 4,
        duration_ms = start.elapsed().as_millis(),
        "outputs written"
    );
    Ok(outputs)
}
