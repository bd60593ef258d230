//! Friends and followers, derived from the friend request ledger.

use crate::db::DbPool;
use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::repository::UserRepository;

pub struct SocialGraphService;

impl SocialGraphService {
    /// Users with an accepted request to or from `user_id`, by ascending id.
    pub async fn find_all_friends(db: &DbPool, user_id: i32) -> AppResult<Vec<user::Model>> {
        ensure_user(db, user_id).await?;
        Ok(UserRepository::find_friends(db, user_id).await?)
    }

    /// Users following `user_id` without being followed back, by ascending id.
    pub async fn find_all_subscribers(db: &DbPool, user_id: i32) -> AppResult<Vec<user::Model>> {
        ensure_user(db, user_id).await?;
        Ok(UserRepository::find_subscribers(db, user_id).await?)
    }
}

async fn ensure_user(db: &DbPool, user_id: i32) -> AppResult<()> {
    match UserRepository::find_by_id(db, user_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound),
    }
}
