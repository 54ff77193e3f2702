use crate::api_error::ApiError;
use crate::config::Settings;
use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

embed_migrations!();

/// Builds the pool for `database_url` and brings the schema up to date.
pub fn init(settings: &Settings, database_url: &str) -> Result<DbPool, ApiError> {
    info!("Initializing DB pool (max {} connections)", settings.database_pool_size);

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(settings.database_pool_size)
        .build(manager)?;

    let conn = pool.get()?;
    embedded_migrations::run(&conn)
        .map_err(|e| ApiError::internal(format!("Failed to run migrations: {}", e)))?;
    info!("Database migrations up to date");

    Ok(pool)
}
