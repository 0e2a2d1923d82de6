//! Order routes: CSV upload and aggregate statistics.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::services::stats::{Bucket, GroupedStats};
use crate::services::{ingestion, stats};
use crate::AppState;

/// Response body for a successful CSV upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
}

/// Envelope wrapping every statistics response.
#[derive(Debug, Serialize)]
pub struct StatsResponse<T: Serialize> {
    pub order_stats: T,
}

/// POST /upload-csv — upload ride orders as a multipart CSV file.
pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?
                    .to_vec(),
            );
        }
    }

    let data = file_data.ok_or_else(|| {
        AppError::Validation("Missing 'file' field in multipart request".to_string())
    })?;

    let inserted = ingestion::ingest_csv(&state.db, &data).await?;

    Ok(Json(UploadResponse {
        message: format!("CSV data successfully uploaded: {inserted} orders"),
    }))
}

/// GET /order-stats — day- and month-grouped order statistics.
pub async fn order_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse<GroupedStats>>, AppError> {
    let grouped = stats::grouped_stats(&state.db).await?;
    Ok(Json(StatsResponse {
        order_stats: grouped,
    }))
}

/// GET /order-stats-all — all-time totals over every persisted order.
pub async fn order_stats_all(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse<Bucket>>, AppError> {
    let overall = stats::overall_stats(&state.db).await?;
    Ok(Json(StatsResponse {
        order_stats: overall,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_shape() {
        let body = UploadResponse {
            message: "CSV data successfully uploaded: 4 orders".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["message"],
            "CSV data successfully uploaded: 4 orders"
        );
    }

    #[test]
    fn stats_response_wraps_order_stats() {
        let body = StatsResponse {
            order_stats: Bucket {
                total_orders: 2,
                total_amount: 150.0,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["order_stats"]["total_orders"], 2);
        assert_eq!(json["order_stats"]["total_amount"], 150.0);
    }
}
