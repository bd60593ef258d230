pub mod auth;
pub mod friend_request;
pub mod message;
pub mod post;
pub mod user;

use crate::models::{
    AttachImagesRequest, AuthResponse, CreateMessageRequest, DeleteImagesRequest,
    FriendRequestResponse, ImagePayload, ImageResponse, LoginRequest, MessagePage,
    MessageResponse, PageQuery, PostPage, PostRequest, PostResponse, SendFriendRequest,
    SignupRequest, UpdateMessageRequest, UpdateUserRequest, UserResponse,
};
use actix_web::web;
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth endpoints
        auth::signup,
        auth::login,
        // Friend request endpoints
        friend_request::get_request,
        friend_request::send_request,
        friend_request::accept_request,
        friend_request::delete_request,
        friend_request::delete_friend_and_keep_follower,
        // User endpoints
        user::get_users,
        user::get_user,
        user::update_user,
        user::delete_user,
        user::get_friends,
        user::get_followers,
        // Post endpoints
        post::get_posts,
        post::create_post,
        post::get_post,
        post::update_post,
        post::delete_post,
        post::attach_images,
        post::delete_images,
        post::get_user_posts,
        post::get_posts_between,
        post::get_subscription_feed,
        // Message endpoints
        message::get_message,
        message::get_user_messages,
        message::create_message,
        message::update_message,
        message::delete_message,
    ),
    components(schemas(
        // Auth schemas
        SignupRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        UpdateUserRequest,
        // Friend request schemas
        SendFriendRequest,
        FriendRequestResponse,
        // Post schemas
        PostRequest,
        PostResponse,
        ImagePayload,
        ImageResponse,
        AttachImagesRequest,
        DeleteImagesRequest,
        PostPage,
        // Message schemas
        CreateMessageRequest,
        UpdateMessageRequest,
        MessageResponse,
        MessagePage,
        // Query schemas
        PageQuery,
        post::DateRangeQuery,
    )),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "requests", description = "Friend request lifecycle"),
        (name = "users", description = "User accounts and social graph"),
        (name = "posts", description = "Posts, images and subscription feed"),
        (name = "messages", description = "Direct messages"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

/// Registers every `/api` route. Shared by the server and the HTTP tests.
///
/// Literal post paths (`user`, `date`, `subscriptions`) go before
/// `/posts/{post_id}` so they are not captured as ids.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(auth::signup))
                    .route("/login", web::post().to(auth::login)),
            )
            .service(
                web::scope("/requests")
                    .route("", web::post().to(friend_request::send_request))
                    .route(
                        "/accept/{request_id}/{user_id}",
                        web::get().to(friend_request::accept_request),
                    )
                    .route("/{request_id}", web::get().to(friend_request::get_request))
                    .route(
                        "/{request_id}/{user_id}",
                        web::delete().to(friend_request::delete_request),
                    )
                    .route(
                        "/{request_id}/{user_id}",
                        web::put().to(friend_request::delete_friend_and_keep_follower),
                    ),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(user::get_users))
                    .route("/{user_id}", web::get().to(user::get_user))
                    .route("/{user_id}", web::put().to(user::update_user))
                    .route("/{user_id}", web::delete().to(user::delete_user))
                    .route("/{user_id}/friends", web::get().to(user::get_friends))
                    .route("/{user_id}/followers", web::get().to(user::get_followers)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(post::get_posts))
                    .route("", web::post().to(post::create_post))
                    .route("/user/{user_id}", web::get().to(post::get_user_posts))
                    .route("/date", web::get().to(post::get_posts_between))
                    .route(
                        "/subscriptions/{user_id}",
                        web::get().to(post::get_subscription_feed),
                    )
                    .route("/{post_id}", web::get().to(post::get_post))
                    .route("/{post_id}", web::put().to(post::update_post))
                    .route("/{post_id}", web::delete().to(post::delete_post))
                    .route("/{post_id}/images", web::post().to(post::attach_images))
                    .route("/{post_id}/images", web::delete().to(post::delete_images)),
            )
            .service(
                web::scope("/messages")
                    .route("", web::post().to(message::create_message))
                    .route("/user/{user_id}", web::get().to(message::get_user_messages))
                    .route("/{message_id}", web::get().to(message::get_message))
                    .route("/{message_id}", web::put().to(message::update_message))
                    .route("/{message_id}", web::delete().to(message::delete_message)),
            ),
    );
}
