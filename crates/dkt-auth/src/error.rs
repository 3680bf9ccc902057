use super::*;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use dkt_pg::StoreError;

/// One failed input field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Request-level failure taxonomy.
///
/// Token problems never reach this type as anything more specific than
/// `Unauthenticated`. `Internal` carries its cause for the server log only.
#[derive(Debug)]
pub enum ApiError {
    Unauthenticated,
    InvalidCredentials,
    Forbidden,
    BadRequest(&'static str),
    Validation(Vec<FieldError>),
    NotFound(&'static str),
    Conflict(&'static str),
    RateLimited(Decision),
    Internal(String),
}

impl ApiError {
    pub fn internal(e: impl std::fmt::Display) -> Self {
        Self::Internal(e.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Unauthorized"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::BadRequest(msg) => write!(f, "{}", msg),
            Self::Validation(_) => write!(f, "Validation failed"),
            Self::NotFound(what) => write!(f, "{} not found", what),
            Self::Conflict(msg) => write!(f, "{}", msg),
            Self::RateLimited(_) => write!(f, "Too many requests"),
            Self::Internal(_) => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            Self::Internal(cause) => {
                log::error!("internal error: {}", cause);
                response.json(serde_json::json!({ "error": self.to_string() }))
            }
            Self::Validation(details) => response.json(serde_json::json!({
                "error": self.to_string(),
                "details": details,
            })),
            Self::RateLimited(decision) => response
                .insert_header(("Retry-After", decision.reset.as_secs().max(1).to_string()))
                .insert_header(("X-RateLimit-Limit", decision.limit.to_string()))
                .insert_header(("X-RateLimit-Remaining", decision.remaining.to_string()))
                .json(serde_json::json!({
                    "error": self.to_string(),
                    "message": "Please try again later",
                })),
            _ => response.json(serde_json::json!({ "error": self.to_string() })),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => Self::Conflict("Resource already exists"),
            StoreError::Database(e) => Self::internal(e),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::internal(e)
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self::internal(e)
    }
}
