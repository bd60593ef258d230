use crate::db::DbPool;
use crate::entities::message;
use crate::error::{AppError, AppResult};
use crate::models::{validate_message_text, MessageResponse, PagedResponse};
use crate::repository::{MessageRepository, UserRepository};
use sea_orm::TransactionTrait;

pub struct MessageService;

impl MessageService {
    /// Only the sender and the receiver can read a message.
    pub async fn find_by_id(
        db: &DbPool,
        message_id: i32,
        acting_user_id: i32,
    ) -> AppResult<message::Model> {
        let message = MessageRepository::find_by_id(db, message_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if message.sender_id != acting_user_id && message.receiver_id != acting_user_id {
            return Err(AppError::Forbidden);
        }
        Ok(message)
    }

    /// Everything the user sent or received, newest first.
    pub async fn find_all_for_user(
        db: &DbPool,
        user_id: i32,
        page: u64,
        size: u64,
    ) -> AppResult<PagedResponse<MessageResponse>> {
        let slice = MessageRepository::find_page_for_user(db, user_id, page, size).await?;
        Ok(PagedResponse {
            content: slice.items.into_iter().map(MessageResponse::from).collect(),
            page,
            size,
            total_elements: slice.total_items,
            total_pages: slice.total_pages,
        })
    }

    pub async fn create(
        db: &DbPool,
        sender_id: i32,
        receiver_id: i32,
        text: &str,
    ) -> AppResult<message::Model> {
        validate_message_text(text)?;
        for user_id in [sender_id, receiver_id] {
            if UserRepository::find_by_id(db, user_id).await?.is_none() {
                return Err(AppError::NotFound);
            }
        }

        let message = MessageRepository::insert(db, sender_id, receiver_id, text).await?;
        log::info!(
            "Message {} sent from user {} to user {}",
            message.id,
            sender_id,
            receiver_id
        );
        Ok(message)
    }

    /// Only the sender may edit a message.
    pub async fn update(
        db: &DbPool,
        message_id: i32,
        acting_user_id: i32,
        text: &str,
    ) -> AppResult<message::Model> {
        validate_message_text(text)?;

        let txn = db.begin().await?;
        let existing = load_sent(&txn, message_id, acting_user_id).await?;
        let updated = MessageRepository::update_text(&txn, existing, text).await?;
        txn.commit().await?;
        Ok(updated)
    }

    pub async fn delete(db: &DbPool, message_id: i32, acting_user_id: i32) -> AppResult<()> {
        let txn = db.begin().await?;
        load_sent(&txn, message_id, acting_user_id).await?;
        MessageRepository::delete(&txn, message_id).await?;
        txn.commit().await?;

        log::info!("Message {} deleted by user {}", message_id, acting_user_id);
        Ok(())
    }
}

async fn load_sent<C: sea_orm::ConnectionTrait>(
    db: &C,
    message_id: i32,
    acting_user_id: i32,
) -> AppResult<message::Model> {
    let message = MessageRepository::find_by_id(db, message_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if message.sender_id != acting_user_id {
        return Err(AppError::Forbidden);
    }
    Ok(message)
}
