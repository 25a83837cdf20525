use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use detox_model::PrepError;

/// An untyped delimited file held in memory: one header row plus data rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Headers get trimmed and stripped of a leading BOM; cell payloads are the
/// sentence text itself and pass through untouched.
fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a delimited file with a header line into a [`RawTable`].
///
/// The parser runs at its default strictness: a row whose field count
/// disagrees with the header is a [`PrepError::Parse`], not a padded or
/// truncated row. A missing or unreadable path is a [`PrepError::Io`].
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let file = File::open(path)
        .map_err(PrepError::Io)
        .with_context(|| format!("open {}", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| PrepError::Parse(format!("{}: {error}", path.display())))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|error| PrepError::Parse(format!("{}: {error}", path.display())))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = headers.len(),
        "delimited file loaded"
    );
    Ok(RawTable { headers, rows })
}

/// Read a tab-separated file, the corpus source format.
pub fn read_tsv(path: &Path) -> Result<RawTable> {
    read_delimited(path, b'\t')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn reads_headers_and_rows() {
        let file = write_temp("a\tb\n1\tx\n2\ty\n");

        let table = read_tsv(file.path()).expect("read");

        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "x"], vec!["2", "y"]]);
    }

    #[test]
    fn strips_bom_from_first_header() {
        let file = write_temp("\u{feff}a\tb\n1\tx\n");

        let table = read_tsv(file.path()).expect("read");

        assert_eq!(table.headers[0], "a");
    }

    #[test]
    fn preserves_cell_whitespace() {
        let file = write_temp("a\tb\n one \ttwo\n");

        let table = read_tsv(file.path()).expect("read");

        assert_eq!(table.rows[0][0], " one ");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");

        let error = read_tsv(&dir.path().join("absent.tsv")).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<PrepError>(),
            Some(PrepError::Io(_))
        ));
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let file = write_temp("a\tb\n1\tx\ty\n");

        let error = read_tsv(file.path()).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<PrepError>(),
            Some(PrepError::Parse(_))
        ));
    }
}
