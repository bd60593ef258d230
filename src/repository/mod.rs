//! Query and mutation helpers over the sea-orm entities.
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`], so the same
//! code runs against the pool or inside a transaction opened by a service.

pub mod friend_request;
pub mod image;
pub mod message;
pub mod post;
pub mod user;

pub use friend_request::FriendRequestRepository;
pub use image::ImageRepository;
pub use message::MessageRepository;
pub use post::PostRepository;
pub use user::UserRepository;

/// One slice of an ordered result set plus the size of the whole set.
#[derive(Debug, Clone)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u64,
}
