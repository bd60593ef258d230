use crate::entities::friend_request;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequest {
    #[schema(example = 1)]
    pub sender_id: i32,
    #[schema(example = 2)]
    pub receiver_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestResponse {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    /// `true` once accepted (friends), `false` while pending (follower).
    pub status: bool,
}

impl From<friend_request::Model> for FriendRequestResponse {
    fn from(request: friend_request::Model) -> Self {
        FriendRequestResponse {
            id: request.id,
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            status: request.status,
        }
    }
}
