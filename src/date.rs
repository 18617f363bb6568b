use chrono::NaiveDate;

use crate::error::{AppError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// chrono on its own accepts single-digit months and days, so the shape is
/// checked before parsing.
pub fn validate_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(AppError::InvalidDate(trimmed.to_string()));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| AppError::InvalidDate(trimmed.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
