use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use polars::prelude::AnyValue;
use tracing::{debug, info, warn};

use detox_core::{PrepareInput, run_prepare};
use detox_ingest::{any_to_string, read_data_frame};
use detox_model::{PrepareOptions, REQUIRED_COLUMNS};

use crate::cli::{InspectArgs, PrepareArgs};
use crate::summary::apply_table_style;
use crate::types::PrepareResult;

pub fn run_prepare_command(args: &PrepareArgs) -> Result<PrepareResult> {
    let options = resolve_options(args)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));

    info!(
        input = %args.input.display(),
        output_dir = %output_dir.display(),
        dry_run = args.dry_run,
        "starting preparation run"
    );
    let summary = run_prepare(PrepareInput {
        input: &args.input,
        output_dir: &output_dir,
        options: &options,
        dry_run: args.dry_run,
    })?;

    Ok(PrepareResult {
        input: args.input.clone(),
        output_dir,
        dry_run: args.dry_run,
        summary,
    })
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("prepared")
}

/// Resolve run options: defaults, then the JSON config file, then explicit
/// flags, later sources winning.
fn resolve_options(args: &PrepareArgs) -> Result<PrepareOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("read config: {}", path.display()))?;
            let parsed: PrepareOptions = serde_json::from_str(&contents)
                .with_context(|| format!("parse config: {}", path.display()))?;
            debug!(config = %path.display(), "options loaded from config file");
            parsed
        }
        None => PrepareOptions::default(),
    };
    if let Some(value) = args.threshold {
        options.toxicity_threshold = value;
    }
    if let Some(value) = args.lower_bound {
        options.lower_bound = value;
    }
    if let Some(value) = args.upper_bound {
        options.upper_bound = value;
    }
    if let Some(value) = args.test_size {
        options.split.test_size = value;
    }
    if let Some(value) = args.valid_size {
        options.split.valid_size = value;
    }
    if let Some(value) = args.seed {
        options.seed = value;
    }
    Ok(options)
}

/// Print a per-column profile of the corpus without transforming it.
pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let df = read_data_frame(&args.input, b'\t')
        .with_context(|| format!("load {}", args.input.display()))?;

    for name in REQUIRED_COLUMNS {
        if df.column(name).is_err() {
            warn!(column = name, "required corpus column missing");
        }
    }

    println!("Corpus: {}", args.input.display());
    println!("Rows: {}", df.height());
    let mut table = Table::new();
    table.set_header(vec!["Column", "Type", "Non-empty", "Distinct"]);
    apply_table_style(&mut table);
    for column in df.get_columns() {
        let mut non_empty = 0usize;
        let mut distinct: BTreeSet<String> = BTreeSet::new();
        for idx in 0..df.height() {
            let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if value.trim().is_empty() {
                continue;
            }
            non_empty += 1;
            distinct.insert(value);
        }
        table.add_row(vec![
            column.name().to_string(),
            column.dtype().to_string(),
            non_empty.to_string(),
            distinct.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
