//! Canonical column names for the parallel detoxification corpus.
//!
//! By corpus convention `reference` holds the toxic form of a sentence pair
//! and `translation` the detoxified form; `ref_tox`/`trn_tox` carry the
//! classifier scores for the respective side.

/// Identifier column, assigned to the first column of the source file.
pub const ID: &str = "id";

/// Text intended to be the toxic side of the pair.
pub const REFERENCE: &str = "reference";

/// Text intended to be the detoxified side of the pair.
pub const TRANSLATION: &str = "translation";

/// Toxicity score of `reference`.
pub const REF_TOX: &str = "ref_tox";

/// Toxicity score of `translation`.
pub const TRN_TOX: &str = "trn_tox";

/// Columns every input corpus must carry in addition to the identifier.
pub const REQUIRED_COLUMNS: [&str; 4] = [REFERENCE, TRANSLATION, REF_TOX, TRN_TOX];
