//! Order record model matching the `orders` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One persisted ride order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub order_id: String,
    pub status: String,
    /// Raw timezone-suffixed timestamp, e.g. `2023-11-20 00:52:28.647910+06`.
    pub created_at: String,
    pub user_id: String,
    pub yandex_order_id: String,
    pub app_type: String,
    pub tariff: String,
    pub price: f64,
    pub fb_token: String,
    pub driver_id: String,
    pub is_share_trip: String,
    pub passenger_count: i64,
    pub alem_order_id: String,
    pub bonus_count: i64,
    pub admin_login: String,
    pub pre_order_date: String,
    pub platform: String,
    pub bonus_for_order: f64,
}

/// A parsed order not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_id: String,
    pub status: String,
    pub created_at: String,
    pub user_id: String,
    pub yandex_order_id: String,
    pub app_type: String,
    pub tariff: String,
    pub price: f64,
    pub fb_token: String,
    pub driver_id: String,
    pub is_share_trip: String,
    pub passenger_count: i64,
    pub alem_order_id: String,
    pub bonus_count: i64,
    pub admin_login: String,
    pub pre_order_date: String,
    pub platform: String,
    pub bonus_for_order: f64,
}
