use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{FriendRequestResponse, SendFriendRequest};
use crate::services::{FriendRequestService, SendOutcome};
use actix_web::{http::header, web, HttpResponse};

#[utoipa::path(
    get,
    path = "/api/requests/{request_id}",
    params(("request_id" = i32, Path, description = "Friend request ID")),
    responses(
        (status = 200, description = "Friend request found", body = FriendRequestResponse),
        (status = 404, description = "Friend request not found")
    ),
    tag = "requests"
)]
pub async fn get_request(
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let request = FriendRequestService::find_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(FriendRequestResponse::from(request)))
}

#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = SendFriendRequest,
    responses(
        (status = 201, description = "Friend request sent", body = FriendRequestResponse),
        (status = 200, description = "Receiver had already asked the sender; request accepted", body = FriendRequestResponse),
        (status = 400, description = "Sender and receiver are the same user"),
        (status = 404, description = "Sender or receiver not found"),
        (status = 409, description = "Request already exists or users are already friends")
    ),
    tag = "requests"
)]
pub async fn send_request(
    req: web::Json<SendFriendRequest>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let outcome =
        FriendRequestService::send_request(pool.get_ref(), req.sender_id, req.receiver_id).await?;

    match outcome {
        SendOutcome::Created(request) => Ok(HttpResponse::Created()
            .append_header((header::LOCATION, format!("/api/requests/{}", request.id)))
            .json(FriendRequestResponse::from(request))),
        SendOutcome::AcceptedCrossed(request) => {
            Ok(HttpResponse::Ok().json(FriendRequestResponse::from(request)))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/requests/accept/{request_id}/{user_id}",
    params(
        ("request_id" = i32, Path, description = "Friend request ID"),
        ("user_id" = i32, Path, description = "Receiver accepting the request")
    ),
    responses(
        (status = 200, description = "Friend request accepted", body = FriendRequestResponse),
        (status = 404, description = "Friend request not found for this user"),
        (status = 409, description = "Friend request is already accepted")
    ),
    tag = "requests"
)]
pub async fn accept_request(
    path: web::Path<(i32, i32)>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let (request_id, user_id) = path.into_inner();
    let request = FriendRequestService::accept_request(pool.get_ref(), request_id, user_id).await?;
    Ok(HttpResponse::Ok().json(FriendRequestResponse::from(request)))
}

#[utoipa::path(
    delete,
    path = "/api/requests/{request_id}/{user_id}",
    params(
        ("request_id" = i32, Path, description = "Friend request ID"),
        ("user_id" = i32, Path, description = "Sender withdrawing the request")
    ),
    responses(
        (status = 204, description = "Friend request withdrawn"),
        (status = 404, description = "Friend request not found for this user"),
        (status = 409, description = "Friend request was already accepted")
    ),
    tag = "requests"
)]
pub async fn delete_request(
    path: web::Path<(i32, i32)>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let (request_id, user_id) = path.into_inner();
    FriendRequestService::delete_request(pool.get_ref(), request_id, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    put,
    path = "/api/requests/{request_id}/{user_id}",
    params(
        ("request_id" = i32, Path, description = "Friend request ID"),
        ("user_id" = i32, Path, description = "Friend ending the friendship")
    ),
    responses(
        (status = 200, description = "Friendship ended; the other user keeps following", body = FriendRequestResponse),
        (status = 404, description = "Friend request not found for this user"),
        (status = 409, description = "Users are not friends")
    ),
    tag = "requests"
)]
pub async fn delete_friend_and_keep_follower(
    path: web::Path<(i32, i32)>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let (request_id, user_id) = path.into_inner();
    let request =
        FriendRequestService::delete_friend_and_keep_follower(pool.get_ref(), request_id, user_id)
            .await?;
    Ok(HttpResponse::Ok().json(FriendRequestResponse::from(request)))
}
