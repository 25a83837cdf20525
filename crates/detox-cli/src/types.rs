use std::path::PathBuf;

use detox_core::PrepareSummary;

#[derive(Debug)]
pub struct PrepareResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub summary: PrepareSummary,
}
