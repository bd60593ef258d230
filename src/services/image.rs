use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{DecodedImage, ImageResponse};
use crate::repository::ImageRepository;
use crate::services::post::load_owned;
use sea_orm::TransactionTrait;

pub struct ImageService;

impl ImageService {
    /// Adds images to a post the acting user authored.
    pub async fn attach(
        db: &DbPool,
        post_id: i32,
        acting_user_id: i32,
        images: Vec<DecodedImage>,
    ) -> AppResult<Vec<ImageResponse>> {
        if images.is_empty() {
            return Err(AppError::validation("At least one image is required"));
        }

        let txn = db.begin().await?;
        load_owned(&txn, post_id, acting_user_id).await?;
        let mut stored = Vec::with_capacity(images.len());
        for image in images {
            let saved = ImageRepository::insert(&txn, post_id, &image.name, image.data).await?;
            stored.push(ImageResponse::from(saved));
        }
        txn.commit().await?;

        log::info!("Attached {} image(s) to post {}", stored.len(), post_id);
        Ok(stored)
    }
}
