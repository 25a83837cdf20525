//! The stage transformations of the preparation pipeline.
//!
//! Every function either leaves its input untouched and returns a new frame,
//! or (for the one in-place rename) documents the mutation. Stages compose
//! strictly top-to-bottom; none of them is revisited within a run.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::debug;

use detox_model::{PrepError, REF_TOX, REFERENCE, TRANSLATION, TRN_TOX};

use crate::frame_utils::{filter_rows, numeric_column_f64, require_column, take_indices};

/// Rename `from` to `to` in place. A no-op when the column already carries
/// the target name.
pub fn rename_column(df: &mut DataFrame, from: &str, to: &str) -> Result<()> {
    if from == to {
        return Ok(());
    }
    require_column(df, from)?;
    df.rename(from, to.into())?;
    Ok(())
}

/// Stable ascending sort by a numeric column.
///
/// Rows whose cell is null or fails numeric parsing order before every
/// scored row (the `Option<f64>` comparison); ties keep their input order.
pub fn sort_by_score(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let values = numeric_column_f64(df, column)?;
    let mut indices: Vec<u32> = (0..df.height() as u32).collect();
    indices.sort_by(|a, b| {
        let left = values[*a as usize];
        let right = values[*b as usize];
        left.partial_cmp(&right).unwrap_or(std::cmp::Ordering::Equal)
    });
    take_indices(df, indices)
}

/// Drop the uncertain band: keep rows `[0, lower)` and `[upper, end)` of a
/// rank-sorted table, in that order.
///
/// Bounds saturate at the row count, so a band past the end removes nothing;
/// `lower > upper` is rejected.
pub fn drop_uncertain_band(df: &DataFrame, lower: usize, upper: usize) -> Result<DataFrame> {
    if lower > upper {
        return Err(PrepError::InvalidOption(format!(
            "lower_bound {lower} exceeds upper_bound {upper}"
        ))
        .into());
    }
    let height = df.height();
    let mut out = df.slice(0, lower.min(height));
    if upper < height {
        let tail = df.slice(upper as i64, height - upper);
        out.vstack_mut(&tail)?;
    }
    debug!(
        input_rows = height,
        output_rows = out.height(),
        lower,
        upper,
        "uncertain band removed"
    );
    Ok(out)
}

/// Exchange `reference`/`translation` and `ref_tox`/`trn_tox` for every row.
///
/// The swap is unconditional by design of the source pipeline: callers pass
/// in the slice-recombined table as a whole, and no per-row toxicity
/// comparison happens here. Column order and passthrough columns are
/// untouched. Applying the swap twice restores the input.
pub fn swap_orientation(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    for (left, right) in [(REFERENCE, TRANSLATION), (REF_TOX, TRN_TOX)] {
        let left_col = require_column(&out, left)?.clone();
        let right_col = require_column(&out, right)?.clone();
        out.with_column(left_col.with_name(right.into()))?;
        out.with_column(right_col.with_name(left.into()))?;
    }
    Ok(out)
}

/// Keep rows whose `trn_tox` lies strictly below `threshold`. Rows at the
/// threshold, and rows with a missing score, are dropped.
pub fn filter_by_translation_toxicity(df: &DataFrame, threshold: f64) -> Result<DataFrame> {
    let scores = numeric_column_f64(df, TRN_TOX)?;
    let keep: Vec<bool> = scores
        .iter()
        .map(|score| score.is_some_and(|value| value < threshold))
        .collect();
    filter_rows(df, &keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use detox_model::ID;
    use polars::prelude::{NamedFrom, Series};

    fn pair_frame(rows: &[(i64, &str, &str, f64, f64)]) -> DataFrame {
        DataFrame::new(vec![
            Series::new(ID.into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()).into(),
            Series::new(
                REFERENCE.into(),
                rows.iter().map(|r| r.1.to_string()).collect::<Vec<_>>(),
            )
            .into(),
            Series::new(
                TRANSLATION.into(),
                rows.iter().map(|r| r.2.to_string()).collect::<Vec<_>>(),
            )
            .into(),
            Series::new(REF_TOX.into(), rows.iter().map(|r| r.3).collect::<Vec<_>>()).into(),
            Series::new(TRN_TOX.into(), rows.iter().map(|r| r.4).collect::<Vec<_>>()).into(),
        ])
        .expect("frame")
    }

    fn id_values(df: &DataFrame) -> Vec<i64> {
        let column = df.column(ID).expect("id column");
        (0..df.height())
            .filter_map(|idx| match column.get(idx).expect("cell") {
                polars::prelude::AnyValue::Int64(value) => Some(value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rename_there_and_back_restores_the_frame() {
        let original = pair_frame(&[(0, "a", "b", 0.9, 0.1)]);
        let mut df = original.clone();

        rename_column(&mut df, ID, "row_key").expect("rename");
        assert!(df.column(ID).is_err());
        rename_column(&mut df, "row_key", ID).expect("rename back");

        assert!(df.equals(&original));
        assert_eq!(df.get_column_names(), original.get_column_names());
    }

    #[test]
    fn rename_missing_column_fails() {
        let mut df = pair_frame(&[(0, "a", "b", 0.9, 0.1)]);

        let error = rename_column(&mut df, "absent", ID).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<PrepError>(),
            Some(PrepError::MissingColumn(_))
        ));
    }

    #[test]
    fn sort_orders_ascending_and_is_stable() {
        let df = pair_frame(&[
            (0, "a", "b", 0.5, 0.0),
            (1, "c", "d", 0.2, 0.0),
            (2, "e", "f", 0.5, 0.0),
            (3, "g", "h", 0.1, 0.0),
        ]);

        let sorted = sort_by_score(&df, REF_TOX).expect("sort");

        // 0.1, 0.2, then the two 0.5 rows in input order
        assert_eq!(id_values(&sorted), vec![3, 1, 0, 2]);
    }

    #[test]
    fn sort_places_missing_scores_first() {
        let df = DataFrame::new(vec![
            Series::new(ID.into(), vec![0i64, 1, 2]).into(),
            Series::new(REF_TOX.into(), vec![Some(0.5f64), None, Some(0.2)]).into(),
        ])
        .expect("frame");

        let sorted = sort_by_score(&df, REF_TOX).expect("sort");

        assert_eq!(id_values(&sorted), vec![1, 2, 0]);
    }

    #[test]
    fn band_removal_keeps_head_and_tail_in_order() {
        // 10 rows, strictly increasing ref_tox, already sorted
        let rows: Vec<(i64, String, String, f64, f64)> = (0..10)
            .map(|i| {
                (
                    i as i64,
                    format!("r{i}"),
                    format!("t{i}"),
                    0.1 * i as f64,
                    0.0,
                )
            })
            .collect();
        let borrowed: Vec<(i64, &str, &str, f64, f64)> = rows
            .iter()
            .map(|r| (r.0, r.1.as_str(), r.2.as_str(), r.3, r.4))
            .collect();
        let df = pair_frame(&borrowed);

        let out = drop_uncertain_band(&df, 3, 7).expect("band");

        assert_eq!(out.height(), 6);
        assert_eq!(id_values(&out), vec![0, 1, 2, 7, 8, 9]);
    }

    #[test]
    fn band_past_the_end_removes_nothing() {
        let df = pair_frame(&[(0, "a", "b", 0.1, 0.0), (1, "c", "d", 0.2, 0.0)]);

        let out = drop_uncertain_band(&df, 5, 9).expect("band");

        assert_eq!(id_values(&out), vec![0, 1]);
    }

    #[test]
    fn zero_width_band_removes_nothing() {
        let df = pair_frame(&[(0, "a", "b", 0.1, 0.0), (1, "c", "d", 0.2, 0.0)]);

        let out = drop_uncertain_band(&df, 1, 1).expect("band");

        assert_eq!(id_values(&out), vec![0, 1]);
    }

    #[test]
    fn inverted_band_bounds_fail() {
        let df = pair_frame(&[(0, "a", "b", 0.1, 0.0)]);

        assert!(drop_uncertain_band(&df, 3, 1).is_err());
    }

    #[test]
    fn swap_exchanges_texts_and_scores() {
        let df = pair_frame(&[(0, "A", "B", 0.1, 0.9)]);

        let swapped = swap_orientation(&df).expect("swap");

        let reference = swapped.column(REFERENCE).expect("reference");
        let translation = swapped.column(TRANSLATION).expect("translation");
        assert_eq!(reference.str().unwrap().get(0), Some("B"));
        assert_eq!(translation.str().unwrap().get(0), Some("A"));
        let ref_tox = swapped.column(REF_TOX).expect("ref_tox");
        let trn_tox = swapped.column(TRN_TOX).expect("trn_tox");
        assert_eq!(ref_tox.f64().unwrap().get(0), Some(0.9));
        assert_eq!(trn_tox.f64().unwrap().get(0), Some(0.1));
    }

    #[test]
    fn swap_twice_is_identity() {
        let df = pair_frame(&[(0, "A", "B", 0.1, 0.9), (1, "C", "D", 0.7, 0.3)]);

        let back = swap_orientation(&swap_orientation(&df).expect("swap")).expect("swap again");

        assert!(back.equals(&df));
        assert_eq!(back.get_column_names(), df.get_column_names());
    }

    #[test]
    fn swap_leaves_passthrough_columns_alone() {
        let mut df = pair_frame(&[(0, "A", "B", 0.1, 0.9)]);
        df.with_column(Series::new("similarity".into(), vec![0.8f64]))
            .expect("extra column");

        let swapped = swap_orientation(&df).expect("swap");

        let extra = swapped.column("similarity").expect("passthrough");
        assert_eq!(extra.f64().unwrap().get(0), Some(0.8));
    }

    #[test]
    fn filter_is_strict_at_the_threshold() {
        let df = pair_frame(&[
            (0, "a", "b", 0.9, 0.1),
            (1, "c", "d", 0.9, 0.3),
            (2, "e", "f", 0.9, 0.299),
            (3, "g", "h", 0.9, 0.5),
        ]);

        let out = filter_by_translation_toxicity(&df, 0.3).expect("filter");

        assert_eq!(id_values(&out), vec![0, 2]);
    }

    #[test]
    fn filter_drops_rows_with_missing_scores() {
        let df = DataFrame::new(vec![
            Series::new(ID.into(), vec![0i64, 1]).into(),
            Series::new(TRN_TOX.into(), vec![Some(0.1f64), None]).into(),
        ])
        .expect("frame");

        let out = filter_by_translation_toxicity(&df, 0.3).expect("filter");

        assert_eq!(id_values(&out), vec![0]);
    }
}
