use crate::entities::{image, post};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

pub struct ImageRepository;

impl ImageRepository {
    pub async fn find_by_post<C: ConnectionTrait>(
        db: &C,
        post_id: i32,
    ) -> Result<Vec<image::Model>, DbErr> {
        image::Entity::find()
            .filter(image::Column::PostId.eq(post_id))
            .order_by_asc(image::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_posts<C: ConnectionTrait>(
        db: &C,
        post_ids: Vec<i32>,
    ) -> Result<Vec<image::Model>, DbErr> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        image::Entity::find()
            .filter(image::Column::PostId.is_in(post_ids))
            .order_by_asc(image::Column::Id)
            .all(db)
            .await
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        post_id: i32,
        name: &str,
        data: Vec<u8>,
    ) -> Result<image::Model, DbErr> {
        image::ActiveModel {
            name: Set(name.to_string()),
            data: Set(data),
            post_id: Set(post_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn replace_content<C: ConnectionTrait>(
        db: &C,
        existing: image::Model,
        name: &str,
        data: Vec<u8>,
    ) -> Result<image::Model, DbErr> {
        let mut active: image::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.data = Set(data);
        active.update(db).await
    }

    /// Deletes the listed images, restricted to those attached to `post_id`.
    pub async fn delete_from_post<C: ConnectionTrait>(
        db: &C,
        post_id: i32,
        image_ids: Vec<i32>,
    ) -> Result<u64, DbErr> {
        let result = image::Entity::delete_many()
            .filter(image::Column::PostId.eq(post_id))
            .filter(image::Column::Id.is_in(image_ids))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_post<C: ConnectionTrait>(db: &C, post_id: i32) -> Result<u64, DbErr> {
        let result = image::Entity::delete_many()
            .filter(image::Column::PostId.eq(post_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_author<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, DbErr> {
        let authored = Query::select()
            .column(post::Column::Id)
            .from(post::Entity)
            .and_where(post::Column::UserId.eq(user_id))
            .to_owned();
        let result = image::Entity::delete_many()
            .filter(image::Column::PostId.in_subquery(authored))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
