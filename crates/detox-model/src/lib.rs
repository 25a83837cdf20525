pub mod columns;
pub mod error;
pub mod options;

pub use columns::{ID, REF_TOX, REFERENCE, REQUIRED_COLUMNS, TRANSLATION, TRN_TOX};
pub use error::{PrepError, Result};
pub use options::{PrepareOptions, SplitFractions};
