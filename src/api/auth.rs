use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{AuthResponse, LoginRequest, SignupRequest};
use crate::services::UserService;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Bad request"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "auth"
)]
pub async fn signup(
    req: web::Json<SignupRequest>,
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let auth = UserService::signup(pool.get_ref(), &config.jwt, &req).await?;
    Ok(HttpResponse::Created().json(auth))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Unknown username or wrong password")
    ),
    tag = "auth"
)]
pub async fn login(
    req: web::Json<LoginRequest>,
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let auth = UserService::login(pool.get_ref(), &config.jwt, &req).await?;
    Ok(HttpResponse::Ok().json(auth))
}
