pub mod friend_request;
pub mod image;
pub mod message;
pub mod post;
pub mod role;
pub mod user;
pub mod user_role;
