use crate::utils::error::{RosterError, Result};
use chrono::{NaiveTime, Weekday};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RosterError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_negative(field_name: &str, value: i32) -> Result<()> {
    if value < 0 {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be at least 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_fee(field_name: &str, fee: f64) -> Result<()> {
    if !fee.is_finite() || fee < 0.0 {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: fee.to_string(),
            reason: "Fee must be a finite, non-negative amount".to_string(),
        });
    }
    Ok(())
}

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(field_name: &str, value: &str) -> Result<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|e| RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected HH:MM or HH:MM:SS ({})", e),
        })
}

pub fn validate_weekday(field_name: &str, day: &str) -> Result<Weekday> {
    day.trim()
        .parse::<Weekday>()
        .map_err(|_| RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: day.to_string(),
            reason: "Expected a weekday name such as Monday or Mon".to_string(),
        })
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a full or abbreviated day name and returns the full name, e.g. `"tue"` -> `"Tuesday"`.
pub fn canonical_weekday(field_name: &str, day: &str) -> Result<&'static str> {
    validate_weekday(field_name, day).map(weekday_name)
}

pub fn validate_unique_ids<'a, I>(field_name: &str, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RosterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.to_string(),
                reason: "Doctor ids must be unique".to_string(),
            });
        }
    }
    Ok(())
}
