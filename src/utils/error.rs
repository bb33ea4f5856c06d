use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Erros retornados pelos handlers HTTP.
///
/// Todo erro vira um corpo `{ "error": "..." }`; detalhes de banco nunca
/// chegam ao cliente.
#[derive(Debug, Error)]
pub enum AppError {
    /// Parâmetro de query inválido (page, limit)
    #[error("{0}")]
    InvalidParameter(String),

    /// Payload viola uma regra de campo (primeira falha encontrada)
    #[error("{0}")]
    Validation(String),

    /// Falha na camada de persistência; a mensagem é a genérica do handler
    #[error("{message}")]
    Persistence { message: String, detail: String },
}

impl AppError {
    pub fn persistence(message: &str, detail: impl std::fmt::Display) -> Self {
        AppError::Persistence {
            message: message.to_string(),
            detail: detail.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidParameter(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Persistence { message, detail } = self {
            log::error!("❌ {}: {}", message, detail);
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

pub type AppResult<T> = Result<T, AppError>;
