//! Counts and data sizes as operators type them.
//!
//! Both parsers accept a bare decimal or a decimal followed by a single
//! case-insensitive suffix. Multiples are decimal (`K` is 1,000, not 1,024).
//!
//! | suffix | [`parse_number`] | [`parse_data_size`] |
//! |--------|------------------|---------------------|
//! | `B`    | -                | ×1                  |
//! | `K`    | ×1,000           | ×1,000              |
//! | `M`    | ×1,000,000       | ×1,000,000          |
//! | `G`    | ×1,000,000,000   | -                   |

pub mod error;

use error::Error;
use regex::Regex;

const NUMBER_SUFFIXES: &[(&str, u64)] = &[("K", 1_000), ("M", 1_000_000), ("G", 1_000_000_000)];

// No G: data sizes stop at megabytes.
const DATA_SIZE_SUFFIXES: &[(&str, u64)] = &[("B", 1), ("K", 1_000), ("M", 1_000_000)];

/// Parses a count such as `250`, `5K` or `1G`. The empty string is `0`.
pub fn parse_number(s: &str) -> Result<u64, Error> {
    let n = scaled(s, NUMBER_SUFFIXES).ok_or_else(|| Error::InvalidNumberSyntax(s.to_string()))?;
    tracing::debug!(input = s, value = n, "parsed number");
    Ok(n)
}

/// Parses a data size in bytes such as `512`, `10B` or `5M`. The empty
/// string is `0`.
pub fn parse_data_size(s: &str) -> Result<u64, Error> {
    let n =
        scaled(s, DATA_SIZE_SUFFIXES).ok_or_else(|| Error::InvalidDataSizeSyntax(s.to_string()))?;
    tracing::debug!(input = s, bytes = n, "parsed data size");
    Ok(n)
}

fn scaled(s: &str, suffixes: &[(&str, u64)]) -> Option<u64> {
    if s.is_empty() {
        return Some(0);
    }
    let upper = s.to_uppercase();
    let re = Regex::new(r"^(?P<digits>[0-9]+)(?P<suffix>[[:alpha:]])?$").ok()?;
    let captured = re.captures(&upper)?;
    let value: u64 = captured.name("digits")?.as_str().parse().ok()?;

    match captured.name("suffix") {
        None => Some(value),
        Some(suffix) => {
            let (_, multiplier) = suffixes.iter().find(|(name, _)| *name == suffix.as_str())?;
            value.checked_mul(*multiplier)
        }
    }
}
