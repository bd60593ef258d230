use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{
    CreateMessageRequest, MessagePage, MessageResponse, PageQuery, UpdateMessageRequest,
};
use crate::services::MessageService;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    get,
    path = "/api/messages/{message_id}",
    params(("message_id" = i32, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message found", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn get_message(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let message =
        MessageService::find_by_id(pool.get_ref(), path.into_inner(), user.user_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::from(message)))
}

#[utoipa::path(
    get,
    path = "/api/messages/user/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("size" = Option<u64>, Query, description = "Messages per page (default: 20, max: 100)")
    ),
    responses(
        (status = 200, description = "Messages sent or received by the user, newest first", body = MessagePage),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn get_user_messages(
    path: web::Path<i32>,
    query: web::Query<PageQuery>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    if user.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    let (page, size) = query.resolve();
    let messages = MessageService::find_all_for_user(pool.get_ref(), user_id, page, size).await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = MessageResponse),
        (status = 400, description = "Invalid message"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Receiver not found")
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn create_message(
    req: web::Json<CreateMessageRequest>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let message =
        MessageService::create(pool.get_ref(), user.user_id, req.receiver_id, &req.text).await?;
    Ok(HttpResponse::Created().json(MessageResponse::from(message)))
}

#[utoipa::path(
    put,
    path = "/api/messages/{message_id}",
    params(("message_id" = i32, Path, description = "Message ID")),
    request_body = UpdateMessageRequest,
    responses(
        (status = 200, description = "Message updated", body = MessageResponse),
        (status = 400, description = "Invalid message"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn update_message(
    path: web::Path<i32>,
    req: web::Json<UpdateMessageRequest>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let message =
        MessageService::update(pool.get_ref(), path.into_inner(), user.user_id, &req.text).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::from(message)))
}

#[utoipa::path(
    delete,
    path = "/api/messages/{message_id}",
    params(("message_id" = i32, Path, description = "Message ID")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn delete_message(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    MessageService::delete(pool.get_ref(), path.into_inner(), user.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
