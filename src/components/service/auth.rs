use thiserror::Error;

use crate::components::model::teacher::Teacher;
use crate::components::store::error::StoreError;

use super::filter::TeacherFilter;
use super::form::TeacherManager;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter both username and password.")]
    MissingCredentials,

    #[error("Login failed, please try again")]
    BadCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Credential check against the current record set: both fields must be
/// filled, then a linear scan for an exact username/password match.
pub fn login(manager: &TeacherManager, username: &str, password: &str) -> Result<Teacher, AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    manager
        .list(&TeacherFilter::default())?
        .into_iter()
        .find(|t| t.username == username && t.password == password)
        .ok_or(AuthError::BadCredentials)
}
