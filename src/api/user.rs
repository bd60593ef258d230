use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::entities::user;
use crate::error::AppError;
use crate::models::{UpdateUserRequest, UserResponse};
use crate::services::{SocialGraphService, UserService};
use actix_web::{web, HttpResponse};

fn to_responses(users: Vec<user::Model>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

/// Users may only change or remove their own account.
fn ensure_self(user: &AuthenticatedUser, user_id: i32) -> Result<(), AppError> {
    if user.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "All users", body = Vec<UserResponse>)),
    tag = "users"
)]
pub async fn get_users(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let users = UserService::find_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(to_responses(users)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let user = UserService::find_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid user data"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    path: web::Path<i32>,
    req: web::Json<UpdateUserRequest>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    ensure_self(&user, user_id)?;
    let updated = UserService::update(pool.get_ref(), user_id, &req).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User and everything they own deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    ensure_self(&user, user_id)?;
    UserService::delete(pool.get_ref(), user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/friends",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Mutual friends of the user", body = Vec<UserResponse>),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_friends(
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let friends = SocialGraphService::find_all_friends(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_responses(friends)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/followers",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Users following without reciprocation", body = Vec<UserResponse>),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_followers(
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let followers =
        SocialGraphService::find_all_subscribers(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_responses(followers)))
}
