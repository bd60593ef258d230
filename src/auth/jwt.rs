use crate::config::JwtConfig;
use crate::entities::user;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub username: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: &user::Model, roles: Vec<String>, expiration_hours: i64) -> Self {
        let now = Utc::now();
        Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            roles,
            exp: (now + Duration::hours(expiration_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

pub fn create_token(claims: &Claims, secret: &str) -> Result<String, anyhow::Error> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, anyhow::Error> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Issues a token for `user` with the configured lifetime.
pub fn issue_token(
    user: &user::Model,
    roles: Vec<String>,
    jwt: &JwtConfig,
) -> Result<String, anyhow::Error> {
    let claims = Claims::new(user, roles, jwt.expiration_hours);
    create_token(&claims, &jwt.secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valera() -> user::Model {
        user::Model {
            id: 2,
            username: "valera".to_string(),
            email: "valera@mail.ru".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_carries_identity_and_roles() {
        let claims = Claims::new(&valera(), vec!["ROLE_USER".to_string()], 1);
        let token = create_token(&claims, "secret").unwrap();

        let decoded = verify_token(&token, "secret").unwrap();
        assert_eq!(decoded.user_id(), Some(2));
        assert_eq!(decoded.username, "valera");
        assert_eq!(decoded.roles, vec!["ROLE_USER".to_string()]);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let claims = Claims::new(&valera(), Vec::new(), 1);
        let token = create_token(&claims, "secret").unwrap();
        assert!(verify_token(&token, "another-secret").is_err());
    }
}
