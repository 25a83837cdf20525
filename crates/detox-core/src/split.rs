//! Randomized train/validation/test partitioning.
//!
//! Two-stage split: the test set is sampled first as a fraction of the whole
//! table, then the validation set is sampled from the remainder at
//! `valid_size / (1 - test_size)` so its share of the original table equals
//! `valid_size`. Both stages reseed from the same value, so a run is fully
//! reproducible from (input, seed).

use anyhow::Result;
use polars::prelude::DataFrame;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use detox_model::SplitFractions;

use crate::frame_utils::take_indices;

/// The three disjoint frames produced by [`split_frames`].
#[derive(Debug, Clone)]
pub struct SplitFrames {
    pub train: DataFrame,
    pub valid: DataFrame,
    pub test: DataFrame,
}

impl SplitFrames {
    pub fn total_rows(&self) -> usize {
        self.train.height() + self.valid.height() + self.test.height()
    }
}

/// Shuffle `indices` with a seeded generator and carve off the first
/// `count` entries.
fn sample_split(mut indices: Vec<u32>, count: usize, seed: u64) -> (Vec<u32>, Vec<u32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let rest = indices.split_off(count.min(indices.len()));
    (indices, rest)
}

/// Partition `df` into train/validation/test.
///
/// Guarantees: the three frames are pairwise disjoint by row, their heights
/// sum to the input height, and identical (input, seed) pairs reproduce the
/// partition exactly.
pub fn split_frames(df: &DataFrame, fractions: SplitFractions, seed: u64) -> Result<SplitFrames> {
    fractions.validate()?;
    let height = df.height();

    let test_count = ((height as f64) * fractions.test_size).round() as usize;
    let all_indices: Vec<u32> = (0..height as u32).collect();
    let (test_idx, rest_idx) = sample_split(all_indices, test_count, seed);

    let valid_count = ((rest_idx.len() as f64) * fractions.valid_of_remainder()).round() as usize;
    let (valid_idx, train_idx) = sample_split(rest_idx, valid_count, seed);

    debug!(
        input_rows = height,
        train_rows = train_idx.len(),
        valid_rows = valid_idx.len(),
        test_rows = test_idx.len(),
        seed,
        "split sampled"
    );

    Ok(SplitFrames {
        train: take_indices(df, train_idx)?,
        valid: take_indices(df, valid_idx)?,
        test: take_indices(df, test_idx)?,
    })
}
