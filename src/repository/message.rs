use super::PageSlice;
use crate::entities::message;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

pub struct MessageRepository;

impl MessageRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<message::Model>, DbErr> {
        message::Entity::find_by_id(id).one(db).await
    }

    /// Messages the user sent or received, newest first.
    pub async fn find_page_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        page: u64,
        size: u64,
    ) -> Result<PageSlice<message::Model>, DbErr> {
        let paginator = message::Entity::find()
            .filter(involving(user_id))
            .order_by_desc(message::Column::CreatedAt)
            .order_by_desc(message::Column::Id)
            .paginate(db, size);
        let totals = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok(PageSlice {
            items,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        sender_id: i32,
        receiver_id: i32,
        text: &str,
    ) -> Result<message::Model, DbErr> {
        message::ActiveModel {
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            text: Set(text.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn update_text<C: ConnectionTrait>(
        db: &C,
        existing: message::Model,
        text: &str,
    ) -> Result<message::Model, DbErr> {
        let mut active: message::ActiveModel = existing.into();
        active.text = Set(text.to_string());
        active.update(db).await
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
        let result = message::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_involving<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, DbErr> {
        let result = message::Entity::delete_many()
            .filter(involving(user_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}

fn involving(user_id: i32) -> Condition {
    Condition::any()
        .add(message::Column::SenderId.eq(user_id))
        .add(message::Column::ReceiverId.eq(user_id))
}
