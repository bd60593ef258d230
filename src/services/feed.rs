use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{PagedResponse, PostResponse};
use crate::repository::{PostRepository, UserRepository};
use crate::services::post::assemble_posts;

pub struct FeedService;

impl FeedService {
    /// Newest-first posts by everyone the viewer follows or is friends with.
    ///
    /// An unknown viewer simply has no subscriptions and gets an empty page.
    pub async fn find_all_posts_from_user_subscriptions(
        db: &DbPool,
        viewer_id: i32,
        page: u64,
        size: u64,
    ) -> AppResult<PagedResponse<PostResponse>> {
        if UserRepository::find_by_id(db, viewer_id).await?.is_none() {
            log::debug!("Feed requested for unknown user {}", viewer_id);
            return Ok(PagedResponse::empty(page, size));
        }

        let slice = PostRepository::find_subscription_page(db, viewer_id, page, size).await?;
        Ok(PagedResponse {
            content: assemble_posts(db, slice.items).await?,
            page,
            size,
            total_elements: slice.total_items,
            total_pages: slice.total_pages,
        })
    }
}
