pub mod table;
pub mod typed;
pub mod values;
pub mod writer;

pub use table::{RawTable, read_delimited, read_tsv};
pub use typed::{build_data_frame, read_data_frame};
pub use values::{
    any_to_f64, any_to_string, any_to_string_for_output, format_numeric, parse_f64, parse_i64,
};
pub use writer::write_csv;
