use chrono::NaiveDate;

use crate::error::{PlannerError, PlannerResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> PlannerResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(PlannerError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Coerces form input to a number the way an HTML number box does:
/// blank input is 0, anything else must parse as a finite number.
pub fn coerce_number(value: &str, field: &str) -> PlannerResult<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(PlannerError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Validates that a number is not negative.
pub fn non_negative(value: f64, field: &str) -> PlannerResult<f64> {
    if value < 0.0 {
        Err(PlannerError::Negative {
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Validates that a number is a whole number within `min..=max`.
pub fn whole_in_range(value: f64, field: &str, min: u32, max: u32) -> PlannerResult<u32> {
    if value.fract() != 0.0 {
        return Err(PlannerError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    if value < f64::from(min) || value > f64::from(max) {
        return Err(PlannerError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(value as u32)
}

/// Parses an optional `YYYY-MM-DD` date. Blank input means no date.
pub fn optional_date(value: &str, field: &str) -> PlannerResult<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| PlannerError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
