use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One edge of the social graph.
///
/// `status == false` means the sender follows the receiver without
/// reciprocation; `status == true` means both users are friends, whichever
/// of them sent the original request.
///
/// `pair_key` names the unordered pair of users and is unique, so the store
/// itself refuses a second record between the same two users.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "friend_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub status: bool,
    #[sea_orm(unique)]
    pub pair_key: String,
}

/// `"<lower id>:<higher id>"`, the same for both directions.
pub fn pair_key(first: i32, second: i32) -> String {
    format!("{}:{}", first.min(second), first.max(second))
}

impl Model {
    /// The other party of the request, if `user_id` is one of them.
    pub fn counterpart_of(&self, user_id: i32) -> Option<i32> {
        if self.sender_id == user_id {
            Some(self.receiver_id)
        } else if self.receiver_id == user_id {
            Some(self.sender_id)
        } else {
            None
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SenderId",
        to = "super::user::Column::Id"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReceiverId",
        to = "super::user::Column::Id"
    )]
    Receiver,
}

impl ActiveModelBehavior for ActiveModel {}
