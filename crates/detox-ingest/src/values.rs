//! Conversions between polars `AnyValue` cells and plain Rust values.
//!
//! Frames built by this crate only carry String, Int64, and Float64 columns,
//! so the matches below stay narrow and fall back to `to_string` for anything
//! exotic.

use polars::prelude::AnyValue;

pub fn any_to_string(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(value) => value.to_string(),
        AnyValue::StringOwned(value) => value.to_string(),
        _ => value.to_string(),
    }
}

/// Render a cell for CSV output. Integral floats print without the trailing
/// `.0` so identifier-like scores survive a round trip unchanged.
pub fn any_to_string_for_output(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(value) => value.to_string(),
        AnyValue::StringOwned(value) => value.to_string(),
        AnyValue::Int64(value) => value.to_string(),
        AnyValue::Float64(value) => format_numeric(value),
        value => value.to_string(),
    }
}

pub fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

pub fn any_to_f64(value: AnyValue) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float64(value) => Some(value),
        AnyValue::Int64(value) => Some(value as f64),
        AnyValue::String(value) => parse_f64(value),
        AnyValue::StringOwned(value) => parse_f64(&value),
        _ => None,
    }
}

pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_drop_the_point() {
        assert_eq!(format_numeric(3.0), "3");
        assert_eq!(format_numeric(0.35), "0.35");
        assert_eq!(format_numeric(-2.0), "-2");
    }

    #[test]
    fn numeric_parsing_rejects_blank_and_junk() {
        assert_eq!(parse_f64("0.7"), Some(0.7));
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("n/a"), None);
        assert_eq!(parse_i64("12"), Some(12));
        assert_eq!(parse_i64("12.5"), None);
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(any_to_string_for_output(AnyValue::Null), "");
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }
}
