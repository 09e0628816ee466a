use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

/// Every failure a request or startup step can end in.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("store file {path} is corrupt: {source}")]
    CorruptStore {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    /// A malformed multipart body. Kept as text: `MultipartError` wraps an
    /// `actix_web::Error`, which cannot cross into the blocking pool.
    #[error("Upload error: {0}")]
    Multipart(String),

    #[error("login required")]
    Unauthorized,

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Blocking task failed: {0}")]
    Blocking(#[from] actix_web::error::BlockingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn multipart(err: actix_multipart::MultipartError) -> Self {
        AppError::Multipart(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::SEE_OTHER,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized => HttpResponse::SeeOther()
                .insert_header((LOCATION, "/login"))
                .finish(),
            AppError::NotFound(_) | AppError::Validation(_) | AppError::Multipart(_) => {
                HttpResponse::build(self.status_code()).body(self.to_string())
            }
            other => {
                error!("request failed: {}", other);
                HttpResponse::InternalServerError().body("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_redirects_to_login() {
        let response = AppError::Unauthorized.error_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }

    #[test]
    fn lookup_failures_are_404() {
        assert_eq!(
            AppError::not_found("sheet abc").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::validation("name is required").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn errors_can_cross_into_the_blocking_pool() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<AppError>();
        assert_send::<Result<()>>();
    }

    #[test]
    fn malformed_uploads_are_400() {
        let err = AppError::Multipart("incomplete body".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Upload error: incomplete body");
    }

    #[test]
    fn io_failures_hide_details_from_the_client() {
        let err = AppError::from(std::io::Error::other("disk full"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
