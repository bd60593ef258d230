use crate::db::DbPool;
use crate::entities::post;
use crate::error::{AppError, AppResult};
use crate::models::{
    DecodedImage, ImageResponse, PagedResponse, PostRequest, PostResponse, UserResponse,
};
use crate::repository::{ImageRepository, PostRepository, UserRepository};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, TransactionTrait};
use std::collections::HashMap;

pub struct PostService;

impl PostService {
    /// Stores a post and its images in one transaction.
    pub async fn create(
        db: &DbPool,
        author_id: i32,
        req: &PostRequest,
    ) -> AppResult<PostResponse> {
        req.validate()?;
        let images = req.decoded_images()?;

        let txn = db.begin().await?;
        if UserRepository::find_by_id(&txn, author_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let post = PostRepository::insert(&txn, author_id, &req.title, &req.description).await?;
        for image in images {
            ImageRepository::insert(&txn, post.id, &image.name, image.data).await?;
        }
        txn.commit().await?;

        log::info!("Post {} created by user {}", post.id, author_id);
        single(db, post).await
    }

    pub async fn find_by_id(db: &DbPool, post_id: i32) -> AppResult<PostResponse> {
        let post = PostRepository::find_by_id(db, post_id)
            .await?
            .ok_or(AppError::NotFound)?;
        single(db, post).await
    }

    pub async fn find_all(
        db: &DbPool,
        page: u64,
        size: u64,
    ) -> AppResult<PagedResponse<PostResponse>> {
        let slice = PostRepository::find_page(db, page, size).await?;
        Ok(PagedResponse {
            content: assemble_posts(db, slice.items).await?,
            page,
            size,
            total_elements: slice.total_items,
            total_pages: slice.total_pages,
        })
    }

    pub async fn find_all_by_user(db: &DbPool, user_id: i32) -> AppResult<Vec<PostResponse>> {
        if UserRepository::find_by_id(db, user_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let posts = PostRepository::find_by_user(db, user_id).await?;
        assemble_posts(db, posts).await
    }

    pub async fn find_all_created_between(
        db: &DbPool,
        start: DateTime<Utc>,
        finish: DateTime<Utc>,
    ) -> AppResult<Vec<PostResponse>> {
        if start > finish {
            return Err(AppError::validation("Start date must not be after finish date"));
        }
        let posts = PostRepository::find_created_between(db, start, finish).await?;
        assemble_posts(db, posts).await
    }

    /// Rewrites title and description, and replaces the content of the listed
    /// images that belong to the post. Images without a known id are ignored.
    pub async fn update(
        db: &DbPool,
        post_id: i32,
        acting_user_id: i32,
        req: &PostRequest,
    ) -> AppResult<PostResponse> {
        req.validate()?;
        let images = req.decoded_images()?;

        let txn = db.begin().await?;
        let post = load_owned(&txn, post_id, acting_user_id).await?;
        let post = PostRepository::update_text(&txn, post, &req.title, &req.description).await?;

        let mut existing: HashMap<i32, _> = ImageRepository::find_by_post(&txn, post_id)
            .await?
            .into_iter()
            .map(|image| (image.id, image))
            .collect();
        for DecodedImage { id, name, data } in images {
            if let Some(current) = id.and_then(|id| existing.remove(&id)) {
                ImageRepository::replace_content(&txn, current, &name, data).await?;
            }
        }
        txn.commit().await?;

        log::info!("Post {} updated by user {}", post_id, acting_user_id);
        single(db, post).await
    }

    pub async fn delete(db: &DbPool, post_id: i32, acting_user_id: i32) -> AppResult<()> {
        let txn = db.begin().await?;
        load_owned(&txn, post_id, acting_user_id).await?;
        let images = ImageRepository::delete_by_post(&txn, post_id).await?;
        PostRepository::delete(&txn, post_id).await?;
        txn.commit().await?;

        log::info!("Post {} deleted with {} image(s)", post_id, images);
        Ok(())
    }

    /// Removes the listed images from the post. Fails when nothing could match:
    /// an empty id list or a post without images.
    pub async fn delete_images(
        db: &DbPool,
        post_id: i32,
        acting_user_id: i32,
        image_ids: Vec<i32>,
    ) -> AppResult<u64> {
        let txn = db.begin().await?;
        load_owned(&txn, post_id, acting_user_id).await?;
        if image_ids.is_empty() || ImageRepository::find_by_post(&txn, post_id).await?.is_empty() {
            return Err(AppError::NotFound);
        }
        let deleted = ImageRepository::delete_from_post(&txn, post_id, image_ids).await?;
        txn.commit().await?;

        log::info!("Deleted {} image(s) from post {}", deleted, post_id);
        Ok(deleted)
    }
}

/// Loads a post the acting user authored.
pub(crate) async fn load_owned<C: ConnectionTrait>(
    db: &C,
    post_id: i32,
    acting_user_id: i32,
) -> AppResult<post::Model> {
    let post = PostRepository::find_by_id(db, post_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if post.user_id != acting_user_id {
        return Err(AppError::Forbidden);
    }
    Ok(post)
}

async fn single(db: &DbPool, post: post::Model) -> AppResult<PostResponse> {
    assemble_posts(db, vec![post])
        .await?
        .pop()
        .ok_or(AppError::NotFound)
}

/// Attaches authors and images to posts, keeping the input order.
///
/// Authors and images are each fetched with one query for the whole batch.
pub(crate) async fn assemble_posts<C: ConnectionTrait>(
    db: &C,
    posts: Vec<post::Model>,
) -> AppResult<Vec<PostResponse>> {
    let mut author_ids: Vec<i32> = posts.iter().map(|post| post.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let post_ids: Vec<i32> = posts.iter().map(|post| post.id).collect();

    let authors: HashMap<i32, UserResponse> = UserRepository::find_by_ids(db, author_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, UserResponse::from(user)))
        .collect();

    let mut images: HashMap<i32, Vec<ImageResponse>> = HashMap::new();
    for image in ImageRepository::find_by_posts(db, post_ids).await? {
        images
            .entry(image.post_id)
            .or_default()
            .push(ImageResponse::from(image));
    }

    posts
        .into_iter()
        .map(|post| -> AppResult<PostResponse> {
            let author = authors.get(&post.user_id).cloned().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "post {} references missing user {}",
                    post.id,
                    post.user_id
                ))
            })?;
            Ok(PostResponse {
                id: post.id,
                title: post.title,
                description: post.description,
                author,
                created_at: post.created_at,
                images: images.remove(&post.id).unwrap_or_default(),
            })
        })
        .collect()
}
