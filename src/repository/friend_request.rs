use crate::entities::friend_request;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct FriendRequestRepository;

impl FriendRequestRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<friend_request::Model>, DbErr> {
        friend_request::Entity::find_by_id(id).one(db).await
    }

    /// The record sent by `sender_id` to `receiver_id`, in that direction only.
    pub async fn find_directed<C: ConnectionTrait>(
        db: &C,
        sender_id: i32,
        receiver_id: i32,
    ) -> Result<Option<friend_request::Model>, DbErr> {
        friend_request::Entity::find()
            .filter(friend_request::Column::SenderId.eq(sender_id))
            .filter(friend_request::Column::ReceiverId.eq(receiver_id))
            .order_by_asc(friend_request::Column::Id)
            .one(db)
            .await
    }

    /// Fails with a unique-constraint violation when the two users already
    /// have a record, in either direction.
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        sender_id: i32,
        receiver_id: i32,
    ) -> Result<friend_request::Model, DbErr> {
        friend_request::ActiveModel {
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            status: Set(false),
            pair_key: Set(friend_request::pair_key(sender_id, receiver_id)),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Rewrites the edge only if its status is still `expected_status`.
    ///
    /// Returns the number of rows touched; zero means the record changed (or
    /// vanished) since it was read.
    pub async fn compare_and_set<C: ConnectionTrait>(
        db: &C,
        id: i32,
        expected_status: bool,
        sender_id: i32,
        receiver_id: i32,
        status: bool,
    ) -> Result<u64, DbErr> {
        let result = friend_request::Entity::update_many()
            .col_expr(friend_request::Column::SenderId, Expr::value(sender_id))
            .col_expr(friend_request::Column::ReceiverId, Expr::value(receiver_id))
            .col_expr(friend_request::Column::Status, Expr::value(status))
            .filter(friend_request::Column::Id.eq(id))
            .filter(friend_request::Column::Status.eq(expected_status))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes the record only while it is still pending.
    pub async fn delete_pending<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
        let result = friend_request::Entity::delete_many()
            .filter(friend_request::Column::Id.eq(id))
            .filter(friend_request::Column::Status.eq(false))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_involving<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, DbErr> {
        let result = friend_request::Entity::delete_many()
            .filter(involving(user_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}

fn involving(user_id: i32) -> Condition {
    Condition::any()
        .add(friend_request::Column::SenderId.eq(user_id))
        .add(friend_request::Column::ReceiverId.eq(user_id))
}
