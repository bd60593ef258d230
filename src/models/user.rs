use super::require_min_chars;
use crate::entities::user;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 6;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Proxy")]
    pub username: String,
    #[schema(example = "test@gmail.com")]
    pub email: String,
    #[schema(example = "123tst345")]
    pub password: String,
    /// `"admin"`, `"mod"`; anything else maps to the plain user role.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_identity(&self.username, &self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    /// Left unchanged when absent.
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_identity(&self.username, &self.email)?;
        match &self.password {
            Some(password) => validate_password(password),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

fn validate_identity(username: &str, email: &str) -> Result<(), AppError> {
    require_min_chars("Username", username, USERNAME_MIN)?;
    if username.chars().count() > USERNAME_MAX {
        return Err(AppError::validation(format!(
            "Username should be between {} and {} characters",
            USERNAME_MIN, USERNAME_MAX
        )));
    }
    if !is_valid_email(email) {
        return Err(AppError::validation("Email should be valid"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    require_min_chars("Password", password, PASSWORD_MIN)
}

/// `local@domain.tld`, no whitespace, exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
