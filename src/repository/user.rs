use crate::entities::{friend_request, role, user, user_role};
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<user::Model>, DbErr> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_ids<C: ConnectionTrait>(
        db: &C,
        ids: Vec<i32>,
    ) -> Result<Vec<user::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(db)
            .await
    }

    pub async fn find_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
    }

    /// Whether another user already holds `username` or `email`.
    pub async fn identity_taken<C: ConnectionTrait>(
        db: &C,
        username: &str,
        email: &str,
        except_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = user::Entity::find().filter(
            Condition::any()
                .add(user::Column::Username.eq(username))
                .add(user::Column::Email.eq(email)),
        );
        if let Some(id) = except_id {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.one(db).await?.is_some())
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        username: &str,
        email: &str,
        password_hash: String,
    ) -> Result<user::Model, DbErr> {
        user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        existing: user::Model,
        username: &str,
        email: &str,
        password_hash: Option<String>,
    ) -> Result<user::Model, DbErr> {
        let mut active: user::ActiveModel = existing.into();
        active.username = Set(username.to_string());
        active.email = Set(email.to_string());
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }
        active.update(db).await
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
        let result = user::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }

    /// Users with an accepted request to or from `user_id`.
    pub async fn find_friends<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<user::Model>, DbErr> {
        let sent = Query::select()
            .column(friend_request::Column::ReceiverId)
            .from(friend_request::Entity)
            .and_where(friend_request::Column::SenderId.eq(user_id))
            .and_where(friend_request::Column::Status.eq(true))
            .to_owned();
        let received = Query::select()
            .column(friend_request::Column::SenderId)
            .from(friend_request::Entity)
            .and_where(friend_request::Column::ReceiverId.eq(user_id))
            .and_where(friend_request::Column::Status.eq(true))
            .to_owned();

        user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Id.in_subquery(sent))
                    .add(user::Column::Id.in_subquery(received)),
            )
            .filter(user::Column::Id.ne(user_id))
            .order_by_asc(user::Column::Id)
            .all(db)
            .await
    }

    /// Users following `user_id` without reciprocation.
    pub async fn find_subscribers<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<user::Model>, DbErr> {
        let followers = Query::select()
            .column(friend_request::Column::SenderId)
            .from(friend_request::Entity)
            .and_where(friend_request::Column::ReceiverId.eq(user_id))
            .and_where(friend_request::Column::Status.eq(false))
            .to_owned();

        user::Entity::find()
            .filter(user::Column::Id.in_subquery(followers))
            .filter(user::Column::Id.ne(user_id))
            .order_by_asc(user::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_roles<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<String>, DbErr> {
        let role_ids: Vec<i32> = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.role_id)
            .collect();
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(role::Entity::find()
            .filter(role::Column::Id.is_in(role_ids))
            .order_by_asc(role::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(|role| role.name)
            .collect())
    }

    /// Links the user to every named role that exists; unknown names are skipped.
    pub async fn link_roles<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        role_names: &[&str],
    ) -> Result<(), DbErr> {
        let roles = role::Entity::find()
            .filter(role::Column::Name.is_in(role_names.iter().copied()))
            .all(db)
            .await?;
        for role in roles {
            user_role::ActiveModel {
                user_id: Set(user_id),
                role_id: Set(role.id),
            }
            .insert(db)
            .await?;
        }
        Ok(())
    }

    pub async fn unlink_roles<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, DbErr> {
        let result = user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
