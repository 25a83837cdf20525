//! CSV serialization of a DataFrame.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use tracing::debug;

use detox_model::PrepError;

use crate::values::any_to_string_for_output;

/// Write a DataFrame as a comma-delimited UTF-8 file: header row from the
/// column names, one line per row, row order preserved, no index column.
///
/// An existing file at `path` is overwritten without warning; a missing
/// destination directory is an error.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(PrepError::Io)
        .with_context(|| format!("create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(df.get_column_names().iter().map(|name| name.as_str()))
        .with_context(|| format!("write header: {}", path.display()))?;

    let columns = df.get_columns();
    let mut record: Vec<String> = Vec::with_capacity(columns.len());
    for idx in 0..df.height() {
        record.clear();
        for column in columns {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            record.push(any_to_string_for_output(value));
        }
        writer
            .write_record(&record)
            .with_context(|| format!("write row {idx}: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;

    debug!(path = %path.display(), rows = df.height(), "csv written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::read_delimited;
    use crate::typed::build_data_frame;
    use polars::prelude::{NamedFrom, Series};

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("id".into(), vec![1i64, 2]).into(),
            Series::new("text".into(), vec!["hello", "world"]).into(),
            Series::new("score".into(), vec![0.5f64, 1.0]).into(),
        ])
        .expect("frame")
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.csv");

        write_csv(&sample_frame(), &path).expect("write");

        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "id,text,score\n1,hello,0.5\n2,world,1\n");
    }

    #[test]
    fn round_trips_through_the_reader() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.csv");
        let df = sample_frame();

        write_csv(&df, &path).expect("write");
        let raw = read_delimited(&path, b',').expect("read");
        let back = build_data_frame(&raw).expect("build");

        assert_eq!(back.get_column_names(), df.get_column_names());
        assert_eq!(back.height(), df.height());
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents").expect("seed file");

        write_csv(&sample_frame(), &path).expect("write");

        let contents = std::fs::read_to_string(&path).expect("read back");
        assert!(contents.starts_with("id,text,score\n"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent").join("out.csv");

        assert!(write_csv(&sample_frame(), &path).is_err());
    }
}
