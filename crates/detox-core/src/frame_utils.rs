use anyhow::Result;
use polars::prelude::{
    AnyValue, BooleanChunked, Column, DataFrame, NewChunkedArray, UInt32Chunked,
};

use detox_ingest::any_to_f64;
use detox_model::PrepError;

/// Resolve a column or fail with the typed missing-column error.
pub fn require_column<'a>(
    df: &'a DataFrame,
    name: &str,
) -> std::result::Result<&'a Column, PrepError> {
    df.column(name)
        .map_err(|_| PrepError::MissingColumn(name.to_string()))
}

/// Per-row numeric view of a column; cells that are null or fail to parse
/// come back as `None`.
pub fn numeric_column_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        values.push(any_to_f64(value));
    }
    Ok(values)
}

pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

pub fn take_indices(df: &DataFrame, indices: Vec<u32>) -> Result<DataFrame> {
    let idx = UInt32Chunked::from_vec("idx".into(), indices);
    Ok(df.take(&idx)?)
}
