//! Database connection pool and schema bootstrap.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Create the `orders` table if it does not exist.
///
/// The schema is bootstrapped on startup and never migrated. `created_at`
/// and `pre_order_date` are stored as the raw text the CSV carries; only
/// the stats queries interpret them.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id              BIGSERIAL PRIMARY KEY,
            order_id        TEXT NOT NULL,
            status          TEXT NOT NULL,
            created_at      TEXT NOT NULL,
            user_id         TEXT NOT NULL,
            yandex_order_id TEXT NOT NULL,
            app_type        TEXT NOT NULL,
            tariff          TEXT NOT NULL,
            price           DOUBLE PRECISION NOT NULL,
            fb_token        TEXT NOT NULL,
            driver_id       TEXT NOT NULL,
            is_share_trip   TEXT NOT NULL,
            passenger_count BIGINT NOT NULL,
            alem_order_id   TEXT NOT NULL,
            bonus_count     BIGINT NOT NULL,
            admin_login     TEXT NOT NULL,
            pre_order_date  TEXT NOT NULL,
            platform        TEXT NOT NULL,
            bonus_for_order DOUBLE PRECISION NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
