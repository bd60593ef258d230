pub mod friend_request;
pub mod message;
pub mod page;
pub mod post;
pub mod user;

pub use friend_request::*;
pub use message::*;
pub use page::*;
pub use post::*;
pub use user::*;

use crate::error::AppError;

/// Rejects blank values and values shorter than `min` characters.
pub(crate) fn require_min_chars(field: &str, value: &str, min: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} should not be empty", field)));
    }
    if value.chars().count() < min {
        return Err(AppError::validation(format!(
            "{} should not be less than {} characters",
            field, min
        )));
    }
    Ok(())
}
