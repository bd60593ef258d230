pub mod feed;
pub mod friend_request;
pub mod image;
pub mod message;
pub mod post;
pub mod social_graph;
pub mod user;

pub use feed::FeedService;
pub use friend_request::{FriendRequestService, SendOutcome};
pub use image::ImageService;
pub use message::MessageService;
pub use post::PostService;
pub use social_graph::SocialGraphService;
pub use user::UserService;
