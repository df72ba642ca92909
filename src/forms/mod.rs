//! Form definitions backing the listing routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod clients;
pub mod preferences;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid page: {0}")]
    InvalidPage(String),

    #[error("invalid page size: {0}")]
    InvalidPageSize(String),

    #[error("invalid sort: {0}")]
    InvalidSort(String),

    #[error("invalid theme: {0}")]
    InvalidTheme(String),
}
