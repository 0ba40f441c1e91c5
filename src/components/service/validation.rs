use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::components::model::teacher::{Department, Gender, Position, Teacher};

/// Field-level validation failures. Each variant carries the exact message
/// shown to the user; none of these ever reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Name must only contain alphabets")]
    NameNotAlphabetic,

    #[error("Age must be a number")]
    AgeNotNumeric,

    #[error("Age must be between 20 and 100")]
    AgeOutOfRange,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Username must be alphanumeric")]
    UsernameNotAlphanumeric,

    #[error("Username must be the same!")]
    UsernameChanged,

    #[error("Please input a valid department")]
    InvalidDepartment,

    #[error("Please select a valid gender")]
    InvalidGender,

    #[error("Please select a valid position")]
    InvalidPosition,
}

lazy_static! {
    static ref NAME_RE: Regex = Regex::new("^[a-zA-Z]*$").unwrap();
    static ref USERNAME_RE: Regex = Regex::new("^[a-zA-Z0-9]*$").unwrap();
}

/// Letters only. The empty string passes here; the all-fields-filled gate in
/// the form pipeline runs first and rejects it with its own message.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::NameNotAlphabetic)
    }
}

/// Parses the raw age field and bounds it to [20, 100].
pub fn validate_age(age: &str) -> Result<u32, ValidationError> {
    let age: u32 = age
        .trim()
        .parse()
        .map_err(|_| ValidationError::AgeNotNumeric)?;

    if !(20..=100).contains(&age) {
        return Err(ValidationError::AgeOutOfRange);
    }
    Ok(age)
}

/// Uniqueness against the current record set, then the alphanumeric rule,
/// in that order.
pub fn validate_username(username: &str, existing: &[Teacher]) -> Result<(), ValidationError> {
    if existing.iter().any(|t| t.username == username) {
        return Err(ValidationError::UsernameTaken);
    }

    if !USERNAME_RE.is_match(username) {
        return Err(ValidationError::UsernameNotAlphanumeric);
    }
    Ok(())
}

/// Canonicalizes (uppercases) and checks membership in the department set.
pub fn validate_department(department: &str) -> Result<Department, ValidationError> {
    Department::from_str(department).map_err(|_| ValidationError::InvalidDepartment)
}

pub fn validate_gender(gender: &str) -> Result<Gender, ValidationError> {
    Gender::from_str(gender).map_err(|_| ValidationError::InvalidGender)
}

pub fn validate_position(position: &str) -> Result<Position, ValidationError> {
    Position::from_str(position).map_err(|_| ValidationError::InvalidPosition)
}
