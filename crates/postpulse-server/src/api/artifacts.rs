use axum::{extract::State, Extension, Json};
use postpulse_store::{DailyActivity, DailyEngagement, StoreError, TermFrequencies};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// Returns daily post activity counts.
pub(super) async fn get_daily_activity(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<DailyActivity>, ApiError> {
    let activity = state
        .store
        .read_activity()
        .map_err(|e| map_store_error(&req_id, "Could not load daily activity data", &e))?;
    Ok(Json(activity))
}

/// Returns daily engagement means.
pub(super) async fn get_daily_engagement(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<DailyEngagement>, ApiError> {
    let engagement = state
        .store
        .read_engagement()
        .map_err(|e| map_store_error(&req_id, "Could not load daily engagement data", &e))?;
    Ok(Json(engagement))
}

/// Returns the most common terms with their counts.
pub(super) async fn get_most_common_terms(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<TermFrequencies>, ApiError> {
    let terms = state
        .store
        .read_terms()
        .map_err(|e| map_store_error(&req_id, "Could not load most common terms data", &e))?;
    Ok(Json(terms))
}

fn map_store_error(req_id: &RequestId, message: &str, error: &StoreError) -> ApiError {
    tracing::error!(request_id = %req_id.0, error = %error, "artifact read failed");
    ApiError::new(message)
}
