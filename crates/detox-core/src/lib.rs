pub mod frame_utils;
pub mod pipeline;
pub mod split;
pub mod transforms;

pub use pipeline::{PrepareInput, PrepareOutputs, PrepareSummary, run_prepare};
pub use split::{SplitFrames, split_frames};
pub use transforms::{
    drop_uncertain_band, filter_by_translation_toxicity, rename_column, sort_by_score,
    swap_orientation,
};
