//! CSV ingestion: parse uploaded bytes and persist orders atomically.
//!
//! The whole payload is parsed before anything touches the database; the
//! insert runs in a single transaction, so a failure at any point leaves
//! zero rows persisted.

use sqlx::{PgPool, Postgres, Transaction};

use crate::errors::AppError;
use crate::models::order::NewOrder;
use crate::parsers::orders_csv;

/// Parse and persist an uploaded CSV payload, returning the number of
/// orders inserted.
pub async fn ingest_csv(pool: &PgPool, data: &[u8]) -> Result<usize, AppError> {
    let orders = orders_csv::parse(data)
        .map_err(|e| AppError::Validation(format!("Failed to parse CSV: {e}")))?;

    let mut tx = pool.begin().await?;
    for order in &orders {
        insert_order(&mut tx, order).await?;
    }
    tx.commit().await?;

    tracing::info!(rows = orders.len(), "CSV upload persisted");
    Ok(orders.len())
}

async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    order: &NewOrder,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO orders (
            order_id, status, created_at, user_id, yandex_order_id,
            app_type, tariff, price, fb_token, driver_id,
            is_share_trip, passenger_count, alem_order_id, bonus_count,
            admin_login, pre_order_date, platform, bonus_for_order
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        "#,
    )
    .bind(&order.order_id)
    .bind(&order.status)
    .bind(&order.created_at)
    .bind(&order.user_id)
    .bind(&order.yandex_order_id)
    .bind(&order.app_type)
    .bind(&order.tariff)
    .bind(order.price)
    .bind(&order.fb_token)
    .bind(&order.driver_id)
    .bind(&order.is_share_trip)
    .bind(order.passenger_count)
    .bind(&order.alem_order_id)
    .bind(order.bonus_count)
    .bind(&order.admin_login)
    .bind(&order.pre_order_date)
    .bind(&order.platform)
    .bind(order.bonus_for_order)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
