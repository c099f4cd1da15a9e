//! Plain-text measurement fixtures.
//!
//! Two line-oriented formats are supported:
//!
//! - decimal series: one `f64` per line, e.g. a ground-truth trajectory or
//!   filter output;
//! - Q8.8 hex words: one 16-bit hexadecimal word per line (`"019A"`),
//!   holding a fixed-point value with 8 fractional bits, as produced for
//!   fixed-point hardware filters;
//! - Q8.8 counts: the same words written as signed decimal integers
//!   (`"410"`, `"-26"`), the form fixed-point filter output is dumped in.
//!
//! Blank lines and surrounding whitespace are ignored in both formats.
//!
//! ```
//! use linkalman::fixture::{from_q8, parse_q8_hex, to_q8};
//!
//! assert_eq!(to_q8(1.5), 0x0180);
//! assert_eq!(from_q8(0x0180), 1.5);
//! assert_eq!(parse_q8_hex("0100\n0280\n").unwrap(), vec![1.0, 2.5]);
//! ```

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Scale factor of the Q8.8 format.
const Q8_SCALE: f64 = 256.0;

/// Errors from reading or parsing a fixture file.
#[derive(Debug)]
pub enum FixtureError {
    /// The file could not be read or written.
    Io(io::Error),
    /// A line could not be parsed. `line` is 1-based.
    Parse { line: usize, text: String },
}

impl From<io::Error> for FixtureError {
    fn from(e: io::Error) -> Self {
        FixtureError::Io(e)
    }
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::Io(e) => write!(f, "fixture i/o error: {}", e),
            FixtureError::Parse { line, text } => {
                write!(f, "cannot parse line {}: {:?}", line, text)
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FixtureError::Io(e) => Some(e),
            FixtureError::Parse { .. } => None,
        }
    }
}

/// Parse non-blank lines with `parse`, reporting the first failure.
fn parse_lines<F>(text: &str, parse: F) -> Result<Vec<f64>, FixtureError>
where
    F: Fn(&str) -> Option<f64>,
{
    let mut values = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse(trimmed) {
            Some(v) => values.push(v),
            None => {
                return Err(FixtureError::Parse {
                    line: i + 1,
                    text: trimmed.to_string(),
                })
            }
        }
    }
    Ok(values)
}

/// Parse a decimal series, one value per line.
pub fn parse_series(text: &str) -> Result<Vec<f64>, FixtureError> {
    parse_lines(text, |s| s.parse::<f64>().ok())
}

/// Read a decimal series from `path`.
pub fn read_series(path: impl AsRef<Path>) -> Result<Vec<f64>, FixtureError> {
    parse_series(&fs::read_to_string(path)?)
}

/// Write `values` to `path`, one per line.
///
/// Uses the shortest representation that parses back to the same `f64`.
pub fn write_series(path: impl AsRef<Path>, values: &[f64]) -> Result<(), FixtureError> {
    let mut out = String::with_capacity(values.len() * 20);
    for v in values {
        // writing into a String cannot fail
        let _ = writeln!(out, "{}", v);
    }
    fs::write(path, out)?;
    Ok(())
}

/// Parse Q8.8 hex words, one per line, into values.
pub fn parse_q8_hex(text: &str) -> Result<Vec<f64>, FixtureError> {
    parse_lines(text, |s| {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        u16::from_str_radix(digits, 16).ok().map(from_q8)
    })
}

/// Read Q8.8 hex words from `path`.
pub fn read_q8_hex(path: impl AsRef<Path>) -> Result<Vec<f64>, FixtureError> {
    parse_q8_hex(&fs::read_to_string(path)?)
}

/// Parse Q8.8 counts, one decimal number per line, dividing each by 256.
pub fn parse_q8_series(text: &str) -> Result<Vec<f64>, FixtureError> {
    parse_lines(text, |s| s.parse::<f64>().ok().map(|c| c / Q8_SCALE))
}

/// Read Q8.8 counts from `path`.
pub fn read_q8_series(path: impl AsRef<Path>) -> Result<Vec<f64>, FixtureError> {
    parse_q8_series(&fs::read_to_string(path)?)
}

/// Write `values` to `path` as Q8.8 counts, one signed integer per line.
///
/// Each value goes through [`to_q8`] and is printed as a two's-complement
/// `i16`, so reading the file back divides out to the quantized values.
pub fn write_q8_series(path: impl AsRef<Path>, values: &[f64]) -> Result<(), FixtureError> {
    let mut out = String::with_capacity(values.len() * 7);
    for v in values {
        let _ = writeln!(out, "{}", to_q8(*v) as i16);
    }
    fs::write(path, out)?;
    Ok(())
}

/// Encode `value` as a Q8.8 word.
///
/// Scales by 256, truncates toward zero and keeps the low 16 bits, so
/// values outside `[0, 256)` wrap.
pub fn to_q8(value: f64) -> u16 {
    ((value * Q8_SCALE) as i64 & 0xffff) as u16
}

/// Decode a Q8.8 word.
pub fn from_q8(word: u16) -> f64 {
    word as f64 / Q8_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_series_skips_blank_lines() {
        let values = parse_series("0.0\n  1.0\n\n2.2\r\n-2.9e0\n").unwrap();
        assert_eq!(values, vec![0.0, 1.0, 2.2, -2.9]);
    }

    #[test]
    fn parse_error_reports_line_number() {
        match parse_series("1.0\n\nabc\n").unwrap_err() {
            FixtureError::Parse { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "abc");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn q8_encoding() {
        assert_eq!(to_q8(0.0), 0x0000);
        assert_eq!(to_q8(1.0), 0x0100);
        // truncation, not rounding
        assert_eq!(to_q8(0.1), 0x0019);
        assert_eq!(to_q8(4.9), 0x04E6);
        // wraps at 16 bits
        assert_eq!(to_q8(256.0), 0x0000);
        assert_eq!(to_q8(-1.0 / 256.0), 0xFFFF);
    }

    #[test]
    fn q8_hex_lines() {
        let values = parse_q8_hex("0000\n0019\n00ff\n0x0180\n").unwrap();
        assert_eq!(values, vec![0.0, 25.0 / 256.0, 255.0 / 256.0, 1.5]);
        assert_eq!(format!("{:04X}", to_q8(values[3])), "0180");

        let err = parse_q8_hex("0100\n12345\n").unwrap_err();
        assert!(matches!(err, FixtureError::Parse { line: 2, .. }));
        assert!(parse_q8_hex("zz").is_err());
    }

    #[test]
    fn q8_counts_are_signed_decimals() {
        let path = std::env::temp_dir().join(format!("linkalman-q8-{}.txt", std::process::id()));
        write_q8_series(&path, &[0.0, 1.6, 3.5713, -0.1]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "0\n409\n914\n-25\n");

        let back = read_q8_series(&path).unwrap();
        assert_eq!(back, vec![0.0, 409.0 / 256.0, 914.0 / 256.0, -25.0 / 256.0]);
        for (v, q) in [0.0, 1.6, 3.5713, -0.1].iter().zip(&back) {
            assert!((v - q).abs() < 1.0 / 256.0);
        }
        let _ = fs::remove_file(path);

        assert_eq!(parse_q8_series(" 256\n\n-512\n").unwrap(), vec![1.0, -2.0]);
        assert!(matches!(
            parse_q8_series("1\n0x10\n").unwrap_err(),
            FixtureError::Parse { line: 2, .. }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("linkalman-fixture-does-not-exist.txt");
        let err = read_series(&path).unwrap_err();
        assert!(matches!(err, FixtureError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
