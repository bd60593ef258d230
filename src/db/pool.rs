use crate::config::Config;
use crate::db::create_schema;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub type DbPool = DatabaseConnection;

pub async fn create_pool(config: &Config) -> Result<DbPool, anyhow::Error> {
    connect(&config.database_url()).await
}

/// Opens a connection pool and makes sure every table exists.
pub async fn connect(url: &str) -> Result<DbPool, anyhow::Error> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging_level(log::LevelFilter::Debug);
    if url.starts_with("sqlite") {
        // An in-memory SQLite database lives and dies with its connection.
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;
    create_schema(&db).await?;

    log::debug!("Database schema ready");
    Ok(db)
}
