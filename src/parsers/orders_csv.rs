//! Ride-order CSV parser with strict per-field numeric coercion.
//!
//! Every row is first deserialized into an all-string record (a missing
//! column fails the row), then the numeric fields are coerced explicitly.
//! The first offending row aborts the whole parse; callers never see a
//! partial result.

use serde::Deserialize;

use crate::models::order::NewOrder;
use crate::parsers::ParseError;

/// Raw CSV row before numeric coercion. Field names must match the
/// header row exactly.
#[derive(Debug, Deserialize)]
struct RawOrderRow {
    order_id: String,
    status: String,
    created_at: String,
    user_id: String,
    yandex_order_id: String,
    app_type: String,
    tariff: String,
    price: String,
    fb_token: String,
    driver_id: String,
    is_share_trip: String,
    passenger_count: String,
    alem_order_id: String,
    bonus_count: String,
    admin_login: String,
    pre_order_date: String,
    platform: String,
    bonus_for_order: String,
}

/// Parse uploaded CSV bytes into order records.
///
/// A header-only payload yields an empty vec. Any malformed row aborts
/// the parse with the 1-based data row number and the offending field.
pub fn parse(data: &[u8]) -> Result<Vec<NewOrder>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let mut orders = Vec::new();
    for (i, result) in reader.deserialize::<RawOrderRow>().enumerate() {
        let row = i + 1;
        let raw = result.map_err(|e| ParseError {
            row,
            field: "csv_row".to_string(),
            message: format!("CSV parse error: {e}"),
        })?;
        orders.push(coerce_row(raw, row)?);
    }
    Ok(orders)
}

fn coerce_row(raw: RawOrderRow, row: usize) -> Result<NewOrder, ParseError> {
    Ok(NewOrder {
        price: non_negative_f64(&raw.price, "price", row)?,
        passenger_count: non_negative_i64(&raw.passenger_count, "passenger_count", row)?,
        bonus_count: non_negative_i64(&raw.bonus_count, "bonus_count", row)?,
        bonus_for_order: non_negative_f64(&raw.bonus_for_order, "bonus_for_order", row)?,
        order_id: raw.order_id,
        status: raw.status,
        created_at: raw.created_at,
        user_id: raw.user_id,
        yandex_order_id: raw.yandex_order_id,
        app_type: raw.app_type,
        tariff: raw.tariff,
        fb_token: raw.fb_token,
        driver_id: raw.driver_id,
        is_share_trip: raw.is_share_trip,
        alem_order_id: raw.alem_order_id,
        admin_login: raw.admin_login,
        pre_order_date: raw.pre_order_date,
        platform: raw.platform,
    })
}

fn non_negative_f64(value: &str, field: &str, row: usize) -> Result<f64, ParseError> {
    let parsed: f64 = value.trim().parse().map_err(|_| ParseError {
        row,
        field: field.to_string(),
        message: format!("'{value}' is not a number"),
    })?;
    // `>=` also rejects NaN
    if parsed >= 0.0 {
        Ok(parsed)
    } else {
        Err(ParseError {
            row,
            field: field.to_string(),
            message: format!("'{value}' must be non-negative"),
        })
    }
}

fn non_negative_i64(value: &str, field: &str, row: usize) -> Result<i64, ParseError> {
    let parsed: i64 = value.trim().parse().map_err(|_| ParseError {
        row,
        field: field.to_string(),
        message: format!("'{value}' is not an integer"),
    })?;
    if parsed >= 0 {
        Ok(parsed)
    } else {
        Err(ParseError {
            row,
            field: field.to_string(),
            message: format!("'{value}' must be non-negative"),
        })
    }
}
