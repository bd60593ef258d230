use super::PageSlice;
use crate::entities::{friend_request, post};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

pub struct PostRepository;

impl PostRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<post::Model>, DbErr> {
        post::Entity::find_by_id(id).one(db).await
    }

    pub async fn find_page<C: ConnectionTrait>(
        db: &C,
        page: u64,
        size: u64,
    ) -> Result<PageSlice<post::Model>, DbErr> {
        fetch_page(db, newest_first(post::Entity::find()), page, size).await
    }

    pub async fn find_by_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<post::Model>, DbErr> {
        newest_first(post::Entity::find().filter(post::Column::UserId.eq(user_id)))
            .all(db)
            .await
    }

    pub async fn find_created_between<C: ConnectionTrait>(
        db: &C,
        start: DateTime<Utc>,
        finish: DateTime<Utc>,
    ) -> Result<Vec<post::Model>, DbErr> {
        newest_first(post::Entity::find().filter(post::Column::CreatedAt.between(start, finish)))
            .all(db)
            .await
    }

    /// Posts by authors the viewer follows or is friends with.
    ///
    /// An author qualifies through any record `viewer -> author` (pending or
    /// accepted) or an accepted record `author -> viewer`. A pending
    /// `author -> viewer` record only makes the author a follower and does not
    /// qualify.
    pub async fn find_subscription_page<C: ConnectionTrait>(
        db: &C,
        viewer_id: i32,
        page: u64,
        size: u64,
    ) -> Result<PageSlice<post::Model>, DbErr> {
        let followed = Query::select()
            .column(friend_request::Column::ReceiverId)
            .from(friend_request::Entity)
            .and_where(friend_request::Column::SenderId.eq(viewer_id))
            .to_owned();
        let befriended = Query::select()
            .column(friend_request::Column::SenderId)
            .from(friend_request::Entity)
            .and_where(friend_request::Column::ReceiverId.eq(viewer_id))
            .and_where(friend_request::Column::Status.eq(true))
            .to_owned();

        let select = post::Entity::find()
            .filter(
                Condition::any()
                    .add(post::Column::UserId.in_subquery(followed))
                    .add(post::Column::UserId.in_subquery(befriended)),
            )
            .filter(post::Column::UserId.ne(viewer_id));

        fetch_page(db, newest_first(select), page, size).await
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        title: &str,
        description: &str,
    ) -> Result<post::Model, DbErr> {
        post::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn update_text<C: ConnectionTrait>(
        db: &C,
        existing: post::Model,
        title: &str,
        description: &str,
    ) -> Result<post::Model, DbErr> {
        let mut active: post::ActiveModel = existing.into();
        active.title = Set(title.to_string());
        active.description = Set(description.to_string());
        active.update(db).await
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
        let result = post::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, DbErr> {
        let result = post::Entity::delete_many()
            .filter(post::Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}

fn newest_first(select: Select<post::Entity>) -> Select<post::Entity> {
    select
        .order_by_desc(post::Column::CreatedAt)
        .order_by_desc(post::Column::Id)
}

async fn fetch_page<C: ConnectionTrait>(
    db: &C,
    select: Select<post::Entity>,
    page: u64,
    size: u64,
) -> Result<PageSlice<post::Model>, DbErr> {
    let paginator = select.paginate(db, size);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok(PageSlice {
        items,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}
