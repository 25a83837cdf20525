//! Run configuration for a preparation pass.

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

pub const DEFAULT_TOXICITY_THRESHOLD: f64 = 0.3;
pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_VALID_SIZE: f64 = 0.1;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_LOWER_BOUND: usize = 200_000;
pub const DEFAULT_UPPER_BOUND: usize = 400_000;

/// Fractions consumed by the randomized train/validation/test split.
///
/// Both fractions are relative to the table entering the splitter; the
/// validation set is carved out of the post-test remainder so that its share
/// of the original table equals `valid_size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitFractions {
    pub test_size: f64,
    pub valid_size: f64,
}

impl Default for SplitFractions {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            valid_size: DEFAULT_VALID_SIZE,
        }
    }
}

impl SplitFractions {
    pub fn new(test_size: f64, valid_size: f64) -> Self {
        Self {
            test_size,
            valid_size,
        }
    }

    /// Check the constraints `0 < test_size < 1` and
    /// `0 < valid_size < 1 - test_size`.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PrepError::InvalidOption(format!(
                "test_size must lie in (0, 1), got {}",
                self.test_size
            )));
        }
        if !(self.valid_size > 0.0 && self.valid_size < 1.0 - self.test_size) {
            return Err(PrepError::InvalidOption(format!(
                "valid_size must lie in (0, {}), got {}",
                1.0 - self.test_size,
                self.valid_size
            )));
        }
        Ok(())
    }

    /// Validation share of the remainder left after the test split.
    pub fn valid_of_remainder(&self) -> f64 {
        self.valid_size / (1.0 - self.test_size)
    }
}

/// Options for a full preparation run.
///
/// `lower_bound`/`upper_bound` are zero-based row ranks into the
/// toxicity-sorted table, not score values: the rows in `[lower, upper)` are
/// the uncertain band removed by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    /// Rows whose post-swap translation toxicity reaches this value are
    /// discarded (strict `<` comparison).
    pub toxicity_threshold: f64,
    /// First row rank of the uncertain band.
    pub lower_bound: usize,
    /// One past the last row rank of the uncertain band.
    pub upper_bound: usize,
    pub split: SplitFractions,
    /// Seed shared by both stages of the randomized split.
    pub seed: u64,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            toxicity_threshold: DEFAULT_TOXICITY_THRESHOLD,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            split: SplitFractions::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl PrepareOptions {
    pub fn validate(&self) -> Result<()> {
        if self.lower_bound > self.upper_bound {
            return Err(PrepError::InvalidOption(format!(
                "lower_bound {} exceeds upper_bound {}",
                self.lower_bound, self.upper_bound
            )));
        }
        if !self.toxicity_threshold.is_finite() {
            return Err(PrepError::InvalidOption(format!(
                "toxicity_threshold must be finite, got {}",
                self.toxicity_threshold
            )));
        }
        self.split.validate()
    }
}
