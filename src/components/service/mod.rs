#[path = "validation.rs"]
pub mod validation;

#[path = "form.rs"]
pub mod form;

#[path = "filter.rs"]
pub mod filter;

#[path = "auth.rs"]
pub mod auth;
