use crate::auth::verify_token;
use crate::config::Config;
use crate::error::AppError;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Caller identity taken from a `Bearer` token.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized(
            "Missing or invalid authorization header",
        ))?;

    let config = req.app_data::<web::Data<Config>>().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Config is not registered as app data"))
    })?;

    let claims = verify_token(token, &config.jwt.secret).map_err(|e| {
        log::debug!("Rejected token: {:?}", e);
        AppError::Unauthorized("Invalid token")
    })?;
    let user_id = claims
        .user_id()
        .ok_or(AppError::Unauthorized("Invalid token"))?;

    Ok(AuthenticatedUser { user_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{create_token, issue_token, Claims};
    use crate::config::{DatabaseConfig, JwtConfig, ServerConfig};
    use crate::entities::user;
    use actix_web::test::TestRequest;
    use chrono::Utc;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            jwt: JwtConfig {
                secret: "secret".to_string(),
                expiration_hours: 1,
            },
            database: DatabaseConfig {
                url: None,
                host: String::new(),
                port: 0,
                user: String::new(),
                password: String::new(),
                database: String::new(),
            },
        }
    }

    fn ira() -> user::Model {
        user::Model {
            id: 1,
            username: "ira".to_string(),
            email: "ira@mail.ru".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn request_with(header: Option<String>) -> HttpRequest {
        let mut req = TestRequest::default().app_data(web::Data::new(config()));
        if let Some(value) = header {
            req = req.insert_header(("Authorization", value));
        }
        req.to_http_request()
    }

    #[test]
    fn bearer_token_yields_user_id() {
        let token = issue_token(&ira(), Vec::new(), &config().jwt).unwrap();
        let user = authenticate(&request_with(Some(format!("Bearer {}", token)))).unwrap();
        assert_eq!(user.user_id, 1);
    }

    #[test]
    fn missing_or_foreign_token_is_unauthorized() {
        assert!(matches!(
            authenticate(&request_with(None)),
            Err(AppError::Unauthorized(_))
        ));

        let foreign = create_token(&Claims::new(&ira(), Vec::new(), 1), "other").unwrap();
        assert!(matches!(
            authenticate(&request_with(Some(format!("Bearer {}", foreign)))),
            Err(AppError::Unauthorized(_))
        ));
    }
}
