use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reviews Service API",
        version = "1.0.0",
        description = "Reviews resource of the admin dashboard.\n\n**Features:**\n- Paginated listing with free-text search and status filter\n- Validated review submission\n- Health monitoring and metrics"
    ),
    paths(
        // Reviews
        crate::api::reviews::get_reviews,
        crate::api::reviews::create_review,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::UserType,
            crate::models::ReviewResponse,
            crate::models::ReviewListResponse,
            crate::models::CreateReviewResponse,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Reviews", description = "List and submit reviews."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
