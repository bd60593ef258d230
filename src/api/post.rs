use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{
    AttachImagesRequest, DeleteImagesRequest, ImageResponse, PageQuery, PostPage, PostRequest,
    PostResponse,
};
use crate::services::{FeedService, ImageService, PostService};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DateRangeQuery {
    /// Inclusive lower bound (RFC 3339)
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub start: DateTime<Utc>,
    /// Inclusive upper bound (RFC 3339)
    #[schema(example = "2024-12-31T23:59:59Z")]
    pub finish: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/posts",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("size" = Option<u64>, Query, description = "Posts per page (default: 20, max: 100)")
    ),
    responses((status = 200, description = "Posts, newest first", body = PostPage)),
    tag = "posts"
)]
pub async fn get_posts(
    query: web::Query<PageQuery>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let (page, size) = query.resolve();
    let posts = PostService::find_all(pool.get_ref(), page, size).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid post"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn create_post(
    req: web::Json<PostRequest>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let post = PostService::create(pool.get_ref(), user.user_id, &req).await?;
    Ok(HttpResponse::Created().json(post))
}

#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    params(("post_id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
pub async fn get_post(
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let post = PostService::find_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    put,
    path = "/api/posts/{post_id}",
    params(("post_id" = i32, Path, description = "Post ID")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Invalid post"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn update_post(
    path: web::Path<i32>,
    req: web::Json<PostRequest>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let post = PostService::update(pool.get_ref(), path.into_inner(), user.user_id, &req).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    params(("post_id" = i32, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post and its images deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn delete_post(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    PostService::delete(pool.get_ref(), path.into_inner(), user.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/images",
    params(("post_id" = i32, Path, description = "Post ID")),
    request_body = AttachImagesRequest,
    responses(
        (status = 201, description = "Images attached", body = Vec<ImageResponse>),
        (status = 400, description = "No images or invalid image data"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn attach_images(
    path: web::Path<i32>,
    req: web::Json<AttachImagesRequest>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let images = req
        .images
        .iter()
        .map(|payload| payload.decode_image())
        .collect::<Result<Vec<_>, _>>()?;
    let stored =
        ImageService::attach(pool.get_ref(), path.into_inner(), user.user_id, images).await?;
    Ok(HttpResponse::Created().json(stored))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/images",
    params(("post_id" = i32, Path, description = "Post ID")),
    request_body = DeleteImagesRequest,
    responses(
        (status = 200, description = "Images removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post or images not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn delete_images(
    path: web::Path<i32>,
    req: web::Json<DeleteImagesRequest>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let deleted = PostService::delete_images(
        pool.get_ref(),
        path.into_inner(),
        user.user_id,
        req.into_inner().image_ids,
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": deleted })))
}

#[utoipa::path(
    get,
    path = "/api/posts/user/{user_id}",
    params(("user_id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Posts by the user, newest first", body = Vec<PostResponse>),
        (status = 404, description = "User not found")
    ),
    tag = "posts"
)]
pub async fn get_user_posts(
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let posts = PostService::find_all_by_user(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    get,
    path = "/api/posts/date",
    params(
        ("start" = String, Query, description = "Inclusive lower bound (RFC 3339)"),
        ("finish" = String, Query, description = "Inclusive upper bound (RFC 3339)")
    ),
    responses(
        (status = 200, description = "Posts created in the range, newest first", body = Vec<PostResponse>),
        (status = 400, description = "Start is after finish")
    ),
    tag = "posts"
)]
pub async fn get_posts_between(
    query: web::Query<DateRangeQuery>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let posts =
        PostService::find_all_created_between(pool.get_ref(), query.start, query.finish).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    get,
    path = "/api/posts/subscriptions/{user_id}",
    params(
        ("user_id" = i32, Path, description = "Viewer ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("size" = Option<u64>, Query, description = "Posts per page (default: 20, max: 100)")
    ),
    responses(
        (status = 200, description = "Posts by friends and followed users, newest first", body = PostPage)
    ),
    tag = "posts"
)]
pub async fn get_subscription_feed(
    path: web::Path<i32>,
    query: web::Query<PageQuery>,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let (page, size) = query.resolve();
    let feed = FeedService::find_all_posts_from_user_subscriptions(
        pool.get_ref(),
        path.into_inner(),
        page,
        size,
    )
    .await?;
    Ok(HttpResponse::Ok().json(feed))
}
