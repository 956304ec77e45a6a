use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failure of an outbound call to the weather provider.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl FetchError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }

    /// True only when the provider answered 429 Too Many Requests.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Http { status: 429, .. })
    }
}

/// Errors surfaced to API callers. Each variant maps to a stable code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("{0}")]
    NotFound(String),

    #[error("city search failed: {0}")]
    SearchFailed(String),

    #[error("{0}")]
    NoForecast(String),

    #[error("weather forecast failed: {0}")]
    ForecastFailed(String),

    #[error("activity ranking failed: {0}")]
    RankingFailed(String),

    #[error("query complexity {complexity} exceeds the maximum of {max}")]
    ComplexityExceeded { complexity: u64, max: u64 },
}

/// Error body returned to callers; code and message are passed through as-is.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl QueryError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn no_forecast(message: impl Into<String>) -> Self {
        Self::NoForecast(message.into())
    }

    pub fn search_failed(reason: impl ToString) -> Self {
        Self::SearchFailed(reason.to_string())
    }

    pub fn forecast_failed(reason: impl ToString) -> Self {
        Self::ForecastFailed(reason.to_string())
    }

    pub fn ranking_failed(reason: impl ToString) -> Self {
        Self::RankingFailed(reason.to_string())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::SearchFailed(_) => "SEARCH_FAILED",
            Self::NoForecast(_) => "NO_FORECAST",
            Self::ForecastFailed(_) => "FORECAST_FAILED",
            Self::RankingFailed(_) => "RANKING_FAILED",
            Self::ComplexityExceeded { .. } => "COMPLEXITY_EXCEEDED",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::NoForecast(_) => StatusCode::NOT_FOUND,
            Self::ComplexityExceeded { .. } => StatusCode::BAD_REQUEST,
            Self::SearchFailed(_) | Self::ForecastFailed(_) | Self::RankingFailed(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_response_body())).into_response()
    }
}
