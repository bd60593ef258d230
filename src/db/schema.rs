use crate::entities::{friend_request, image, message, post, role, user, user_role};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Schema, Set,
};

/// Creates missing tables from the entity definitions and seeds the roles.
///
/// Tables are created parents first so MySQL can resolve the foreign keys.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = vec![
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(role::Entity),
        schema.create_table_from_entity(user_role::Entity),
        schema.create_table_from_entity(post::Entity),
        schema.create_table_from_entity(image::Entity),
        schema.create_table_from_entity(friend_request::Entity),
        schema.create_table_from_entity(message::Entity),
    ];
    for table in tables.iter_mut() {
        db.execute(backend.build(table.if_not_exists())).await?;
    }

    seed_roles(db).await
}

async fn seed_roles<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    for name in role::ALL_ROLES {
        let existing = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(db)
            .await?;
        if existing.is_none() {
            role::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}
