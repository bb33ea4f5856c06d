use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::config::AppConfig;
use crate::database::ReviewStore;
use crate::models::CreateReviewResponse;
use crate::services::review_query::{ReviewListQuery, ReviewQuery};
use crate::services::{self, SubmitOutcome};
use crate::utils::{AppError, AppResult};

fn warn_client_error(e: &AppError) {
    if matches!(e, AppError::InvalidParameter(_) | AppError::Validation(_)) {
        log::warn!("⚠️ {}", e);
    }
}

/// GET /api/reviews - Lista reviews paginadas, com busca e filtro de status
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    params(ReviewListQuery),
    responses(
        (status = 200, description = "Page of reviews, newest first", body = crate::models::ReviewListResponse),
        (status = 400, description = "Invalid page or limit"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_reviews(
    store: web::Data<dyn ReviewStore>,
    query: web::Query<ReviewListQuery>,
) -> AppResult<HttpResponse> {
    log::info!(
        "📝 GET /api/reviews - page: {:?}, limit: {:?}, search: {:?}, status: {:?}",
        query.page,
        query.limit,
        query.search,
        query.status
    );

    let query = ReviewQuery::parse(&query).inspect_err(warn_client_error)?;
    let response = services::list_reviews(store.get_ref(), &query).await?;

    log::info!(
        "✅ Returned {} reviews (page {} of {})",
        response.reviews.len(),
        query.window.page,
        response.total_pages
    );
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/reviews - Valida e grava uma nova review
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    request_body(content = serde_json::Value, description = "Review write payload (name, email, phone, subject, message, rating, termsAccepted, image, publicId, userType, userId, rankAndPosition, debug)", content_type = "application/json"),
    responses(
        (status = 201, description = "Review stored", body = CreateReviewResponse),
        (status = 200, description = "Debug echo (only when REVIEWS_DEBUG_ECHO is enabled)"),
        (status = 400, description = "First validation failure"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_review(
    store: web::Data<dyn ReviewStore>,
    config: web::Data<AppConfig>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    log::info!("📝 POST /api/reviews");

    let outcome = services::submit_review(store.get_ref(), body.into_inner(), config.reviews_debug_echo)
        .await
        .inspect_err(warn_client_error)?;

    match outcome {
        SubmitOutcome::Echo(received) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "debug": true,
            "received": received
        }))),
        SubmitOutcome::Created(id) => {
            log::info!("✅ Review {} stored", id);
            Ok(HttpResponse::Created().json(CreateReviewResponse {
                success: true,
                message: "Review submitted successfully".to_string(),
                id: id.to_hex(),
            }))
        }
    }
}
