//! Parsing helpers for command-line and configuration values

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{ExportError, ExportResult};

lazy_static! {
    // "a,b" with optional whitespace around either value
    static ref PAIR_PATTERN: Regex = Regex::new(r"^\s*([^,\s]+)\s*,\s*([^,\s]+)\s*$")
        .expect("pair pattern is a valid regex");
}

fn split_pair<'t>(text: &'t str, what: &str) -> ExportResult<(&'t str, &'t str)> {
    let captures = PAIR_PATTERN.captures(text)
        .ok_or_else(|| ExportError::InvalidInput(format!("{} must be given as 'a,b', got '{}'", what, text)))?;
    match (captures.get(1), captures.get(2)) {
        (Some(a), Some(b)) => Ok((a.as_str(), b.as_str())),
        _ => Err(ExportError::InvalidInput(format!("{} must be given as 'a,b', got '{}'", what, text))),
    }
}

/// Parse "x,y" into two floating point values
pub fn parse_f64_pair(text: &str, what: &str) -> ExportResult<(f64, f64)> {
    let (a, b) = split_pair(text, what)?;
    let parse = |s: &str| s.parse::<f64>()
        .map_err(|_| ExportError::InvalidInput(format!("Invalid number '{}' in {}", s, what)));
    Ok((parse(a)?, parse(b)?))
}

/// Parse "columns,rows" into two non-negative integers
pub fn parse_u32_pair(text: &str, what: &str) -> ExportResult<(u32, u32)> {
    let (a, b) = split_pair(text, what)?;
    let parse = |s: &str| s.parse::<u32>()
        .map_err(|_| ExportError::InvalidInput(format!("Invalid count '{}' in {}", s, what)));
    Ok((parse(a)?, parse(b)?))
}

/// Parse a whitespace or comma separated list of overview levels
pub fn parse_levels(text: &str) -> ExportResult<Vec<u32>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>()
            .map_err(|_| ExportError::InvalidInput(format!("Invalid overview level: {}", s))))
        .collect()
}
