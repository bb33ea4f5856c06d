use mongodb::bson::{oid::ObjectId, DateTime};
use serde_json::Value;

use crate::database::{ReviewStore, StoreError};
use crate::models::{ReviewListResponse, ReviewResponse};
use crate::services::review_query::ReviewQuery;
use crate::services::review_validation::{validate_review, wants_debug_echo};
use crate::utils::{AppError, AppResult};

/// Result of a POST that passed validation (or was echoed)
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Debug echo: nothing validated, nothing stored
    Echo(Value),
    Created(ObjectId),
}

pub async fn list_reviews(store: &dyn ReviewStore, query: &ReviewQuery) -> AppResult<ReviewListResponse> {
    let total = store
        .count(&query.filter)
        .await
        .map_err(|e| AppError::persistence("Failed to fetch reviews", e))?;

    let reviews = store
        .find_page(&query.filter, query.window)
        .await
        .map_err(|e| AppError::persistence("Failed to fetch reviews", e))?;

    Ok(ReviewListResponse {
        reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
        total_pages: query.window.total_pages(total),
    })
}

pub async fn submit_review(
    store: &dyn ReviewStore,
    payload: Value,
    debug_echo_enabled: bool,
) -> AppResult<SubmitOutcome> {
    if debug_echo_enabled && wants_debug_echo(&payload) {
        log::warn!("🐛 Debug echo requested, review not stored");
        return Ok(SubmitOutcome::Echo(payload));
    }

    let review = validate_review(&payload)?.into_review(DateTime::now());

    match store.insert(&review).await {
        Ok(id) => Ok(SubmitOutcome::Created(id)),
        Err(StoreError::MissingId) => Err(AppError::persistence("Failed to submit", StoreError::MissingId)),
        Err(e) => Err(AppError::persistence("Failed to submit review", e)),
    }
}
