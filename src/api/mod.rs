pub mod health;
pub mod metrics;
pub mod reviews;
pub mod swagger;

use actix_web::{
    error::{InternalError, JsonPayloadError},
    web, HttpResponse,
};

/// Maior corpo aceito no POST (mensagem de até 5000 caracteres multibyte)
const JSON_LIMIT: usize = 64 * 1024;

/// Registers every route and the extractor error handlers.
///
/// Shared by `main` and the handler tests so both see the same app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(|err, _req| {
                log::warn!("⚠️ Rejected request body: {}", err);
                let response = json_error_response(&err);
                InternalError::from_response(err, response).into()
            }),
    )
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid query string"
        }));
        InternalError::from_response(err, response).into()
    }))
    .route("/health", web::get().to(health::health_check))
    .route("/metrics", web::get().to(metrics::get_metrics))
    .service(
        web::scope("/api/reviews")
            .route("", web::get().to(reviews::get_reviews))
            .route("", web::post().to(reviews::create_review)),
    );
}

fn json_error_response(err: &JsonPayloadError) -> HttpResponse {
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            HttpResponse::PayloadTooLarge().json(serde_json::json!({
                "error": "Request body is too large"
            }))
        }
        _ => HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Request body must be valid JSON"
        })),
    }
}
