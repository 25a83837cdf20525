//! Typed DataFrame construction from a raw delimited table.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::table::{RawTable, read_delimited};
use crate::values::{parse_f64, parse_i64};

/// Inferred storage type for a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

/// A column is numeric only when every non-empty cell parses; a single
/// stray value demotes the whole column to text.
fn infer_column_kind(table: &RawTable, col_idx: usize) -> ColumnKind {
    let mut non_empty = 0usize;
    let mut all_int = true;
    let mut all_float = true;
    for row in &table.rows {
        let value = row.get(col_idx).map(String::as_str).unwrap_or("");
        if value.trim().is_empty() {
            continue;
        }
        non_empty += 1;
        if all_int && parse_i64(value).is_none() {
            all_int = false;
        }
        if all_float && parse_f64(value).is_none() {
            all_float = false;
        }
        if !all_int && !all_float {
            break;
        }
    }
    if non_empty == 0 {
        return ColumnKind::Text;
    }
    if all_int {
        ColumnKind::Int
    } else if all_float {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    }
}

/// Build a DataFrame from a [`RawTable`], inferring Int64/Float64/String per
/// column. Empty cells become null in numeric columns and stay empty strings
/// in text columns.
pub fn build_data_frame(table: &RawTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.headers.len());
    for (col_idx, header) in table.headers.iter().enumerate() {
        let column = match infer_column_kind(table, col_idx) {
            ColumnKind::Int => {
                let values: Vec<Option<i64>> = table
                    .rows
                    .iter()
                    .map(|row| parse_i64(row.get(col_idx).map(String::as_str).unwrap_or("")))
                    .collect();
                Series::new(header.as_str().into(), values).into()
            }
            ColumnKind::Float => {
                let values: Vec<Option<f64>> = table
                    .rows
                    .iter()
                    .map(|row| parse_f64(row.get(col_idx).map(String::as_str).unwrap_or("")))
                    .collect();
                Series::new(header.as_str().into(), values).into()
            }
            ColumnKind::Text => {
                let values: Vec<String> = table
                    .rows
                    .iter()
                    .map(|row| row.get(col_idx).cloned().unwrap_or_default())
                    .collect();
                Series::new(header.as_str().into(), values).into()
            }
        };
        columns.push(column);
    }
    DataFrame::new(columns).context("build dataframe from raw table")
}

/// Read a delimited file straight into a typed DataFrame.
pub fn read_data_frame(path: &Path, delimiter: u8) -> Result<DataFrame> {
    let table = read_delimited(path, delimiter)?;
    build_data_frame(&table)
}
