use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    InvalidPassword,
    EmailAlreadyTaken,
    UnprocessableEntity,
    InternalServerError,
}

impl ErrorCategory {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCategory::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Error rendered to clients as `{category, message}`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub category: ErrorCategory,
    pub message: String,
}

impl ApiError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn invalid_password(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InvalidPassword, message)
    }

    pub fn email_already_taken() -> Self {
        Self::new(ErrorCategory::EmailAlreadyTaken, "Email already taken")
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::UnprocessableEntity, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InternalServerError, message)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    category: ErrorCategory,
    message: &'a str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.category.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            category: self.category,
            message: &self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn domain_categories_render_as_422() {
        let err = ApiError::email_already_taken();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["category"], "EMAIL_ALREADY_TAKEN");
        assert_eq!(value["message"], "Email already taken");
    }

    #[test]
    fn internal_errors_render_as_500() {
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::invalid_password("x").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
