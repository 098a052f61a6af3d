//! Metrics Routes
//!
//! - GET /api/v1/metrics - Nightly metrics for a given or random seed

use axum::{extract::Query, Json};

use crate::api::dto::MetricsQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::metrics::{draw_metrics, generate, NightlyMetrics, MAX_SEED};

/// GET /api/v1/metrics?seed=N
pub async fn get_metrics(Query(query): Query<MetricsQuery>) -> ApiResult<Json<NightlyMetrics>> {
    let metrics = match query.seed {
        Some(seed) if seed > MAX_SEED => {
            return Err(ApiError::Validation(format!(
                "Seed must be between 0 and {}",
                MAX_SEED
            )));
        }
        Some(seed) => generate(seed),
        None => draw_metrics(),
    };

    Ok(Json(metrics))
}
