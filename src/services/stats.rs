//! Order statistics aggregation over the full `orders` table.
//!
//! Every stats call rescans the table and groups in memory. `created_at`
//! is stored as opaque text of the form
//! `YYYY-MM-DD HH:MM:SS.ffffff±HH` (fractional seconds, whole-hour UTC
//! offset); the date part of that local timestamp is the grouping key.
//! Two orders on the same calendar date with different offsets land in
//! the same bucket.
//!
//! A single unparseable `created_at` aborts the whole aggregation; there
//! are no partial stats.

use std::collections::BTreeMap;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::order::Order;

/// Count and price sum for one aggregation bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bucket {
    pub total_orders: u64,
    pub total_amount: f64,
}

/// Day- and month-grouped statistics. Map keys serialize as ISO dates
/// (`by_month` keys are always the first of the month).
#[derive(Debug, Serialize)]
pub struct GroupedStats {
    pub by_day: BTreeMap<NaiveDate, Bucket>,
    pub by_month: BTreeMap<NaiveDate, Bucket>,
}

/// Compute day- and month-grouped stats over every persisted order.
pub async fn grouped_stats(pool: &PgPool) -> Result<GroupedStats, AppError> {
    let orders = fetch_all(pool).await?;
    compute_grouped(&orders).map_err(AppError::Validation)
}

/// Compute all-time totals over every persisted order.
pub async fn overall_stats(pool: &PgPool) -> Result<Bucket, AppError> {
    let orders = fetch_all(pool).await?;
    Ok(compute_overall(&orders))
}

async fn fetch_all(pool: &PgPool) -> Result<Vec<Order>, AppError> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

fn compute_grouped(orders: &[Order]) -> Result<GroupedStats, String> {
    let mut by_day: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();
    let mut by_month: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();

    for order in orders {
        let date = local_order_date(&order.created_at)?;
        let month = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .ok_or_else(|| format!("invalid month for date {date}"))?;
        accumulate(&mut by_day, date, order.price);
        accumulate(&mut by_month, month, order.price);
    }

    Ok(GroupedStats { by_day, by_month })
}

fn compute_overall(orders: &[Order]) -> Bucket {
    Bucket {
        total_orders: orders.len() as u64,
        total_amount: orders.iter().map(|o| o.price).sum(),
    }
}

fn accumulate(buckets: &mut BTreeMap<NaiveDate, Bucket>, key: NaiveDate, price: f64) {
    let bucket = buckets.entry(key).or_default();
    bucket.total_orders += 1;
    bucket.total_amount += price;
}

/// Calendar date of an order in its embedded timezone.
///
/// The stored value is local time plus an offset suffix, so the date is
/// read straight off the timestamp part; the offset is still validated
/// as a signed whole-hour UTC offset so malformed data fails loudly
/// instead of mis-grouping.
fn local_order_date(created_at: &str) -> Result<NaiveDate, String> {
    let (timestamp, offset_hours) = split_offset(created_at)?;

    offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            format!("created_at '{created_at}' offset is not a valid whole-hour UTC offset")
        })?;

    let naive = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| format!("created_at '{created_at}' is not a valid timestamp: {e}"))?;

    Ok(naive.date())
}

/// Split `created_at` into its timestamp part and signed hour offset.
///
/// The sign is searched after the seconds field so date dashes are not
/// mistaken for an offset. Sub-hour offsets like `+0630` parse as an
/// out-of-range hour count and are rejected by the caller.
fn split_offset(value: &str) -> Result<(&str, i32), String> {
    let sign_pos = value
        .rfind(['+', '-'])
        .filter(|&pos| pos >= 19)
        .ok_or_else(|| format!("created_at '{value}' has no UTC offset suffix"))?;

    let (timestamp, offset) = value.split_at(sign_pos);
    let hours: i32 = offset
        .parse()
        .map_err(|_| format!("created_at '{value}' has a malformed UTC offset '{offset}'"))?;

    Ok((timestamp, hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(created_at: &str, price: f64) -> Order {
        Order {
            id: 0,
            order_id: "ORD-1".to_string(),
            status: "finished".to_string(),
            created_at: created_at.to_string(),
            user_id: "U1".to_string(),
            yandex_order_id: "Y1".to_string(),
            app_type: "android".to_string(),
            tariff: "econom".to_string(),
            price,
            fb_token: String::new(),
            driver_id: "D1".to_string(),
            is_share_trip: "false".to_string(),
            passenger_count: 1,
            alem_order_id: String::new(),
            bonus_count: 0,
            admin_login: "admin".to_string(),
            pre_order_date: String::new(),
            platform: "ios".to_string(),
            bonus_for_order: 0.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn groups_same_month_into_one_bucket() {
        let orders = vec![
            order("2023-11-20 00:52:28.647910+06", 100.0),
            order("2023-11-20 10:00:00.000000+06", 50.0),
        ];
        let stats = compute_grouped(&orders).unwrap();

        let month = stats.by_month.get(&date(2023, 11, 1)).unwrap();
        assert_eq!(month.total_orders, 2);
        assert_eq!(month.total_amount, 150.0);

        let day = stats.by_day.get(&date(2023, 11, 20)).unwrap();
        assert_eq!(day.total_orders, 2);
        assert_eq!(day.total_amount, 150.0);
    }

    #[test]
    fn same_date_different_offsets_share_a_bucket() {
        let orders = vec![
            order("2023-11-20 00:52:28.647910+06", 100.0),
            order("2023-11-20 23:59:59.000000-05", 50.0),
        ];
        let stats = compute_grouped(&orders).unwrap();
        assert_eq!(stats.by_day.len(), 1);
        assert_eq!(stats.by_day[&date(2023, 11, 20)].total_orders, 2);
    }

    #[test]
    fn day_and_month_sums_match_overall() {
        let orders = vec![
            order("2023-11-20 00:52:28.647910+06", 100.0),
            order("2023-11-21 10:00:00.000000+06", 50.0),
            order("2023-12-01 08:30:00.123456+06", 25.5),
            order("2023-12-15 18:00:00.000000-05", 10.0),
        ];
        let stats = compute_grouped(&orders).unwrap();
        let overall = compute_overall(&orders);

        let day_count: u64 = stats.by_day.values().map(|b| b.total_orders).sum();
        let month_count: u64 = stats.by_month.values().map(|b| b.total_orders).sum();
        assert_eq!(day_count, overall.total_orders);
        assert_eq!(month_count, overall.total_orders);

        let day_amount: f64 = stats.by_day.values().map(|b| b.total_amount).sum();
        assert!((day_amount - overall.total_amount).abs() < 1e-9);
        assert_eq!(overall.total_orders, 4);
        assert!((overall.total_amount - 185.5).abs() < 1e-9);
    }

    #[test]
    fn overall_stats_on_empty_table() {
        let overall = compute_overall(&[]);
        assert_eq!(overall.total_orders, 0);
        assert_eq!(overall.total_amount, 0.0);
    }

    #[test]
    fn missing_offset_fails_whole_aggregation() {
        let orders = vec![
            order("2023-11-20 00:52:28.647910+06", 100.0),
            order("2023-11-20 10:00:00.000000", 50.0),
        ];
        let err = compute_grouped(&orders).unwrap_err();
        assert!(err.contains("no UTC offset suffix"));
    }

    #[test]
    fn sub_hour_offset_rejected() {
        let orders = vec![order("2023-11-20 00:52:28.647910+0630", 100.0)];
        let err = compute_grouped(&orders).unwrap_err();
        assert!(err.contains("whole-hour"));
    }

    #[test]
    fn malformed_timestamp_rejected() {
        let orders = vec![order("20-11-2023 00:52:28.647910+06", 100.0)];
        assert!(compute_grouped(&orders).is_err());
    }

    #[test]
    fn negative_offset_accepted() {
        let d = local_order_date("2023-11-20 22:00:00.000000-05").unwrap();
        assert_eq!(d, date(2023, 11, 20));
    }

    #[test]
    fn seconds_without_fraction_accepted() {
        let d = local_order_date("2023-11-20 22:00:00+06").unwrap();
        assert_eq!(d, date(2023, 11, 20));
    }

    #[test]
    fn month_keys_serialize_as_iso_dates() {
        let orders = vec![order("2023-11-20 00:52:28.647910+06", 100.0)];
        let stats = compute_grouped(&orders).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["by_month"]["2023-11-01"]["total_orders"], 1);
        assert_eq!(json["by_day"]["2023-11-20"]["total_amount"], 100.0);
    }
}
