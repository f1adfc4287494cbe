use axum::{
    Json,
    body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::fmt;
use std::sync::Arc;

use super::observability::RequestId;
use super::{AppState, ErrorBody};
use crate::services::{AnimeError, AuthError};

/// Largest framework error body read back when reformatting it.
const MAX_REJECTION_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    BadRequest(String),

    Unauthorized(String),

    Forbidden(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Attached to responses built from an [`ApiError`] so the formatter can
/// tell application failures from framework rejections.
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub developer_message: String,
    pub trace: String,
}

impl ApiError {
    const fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::ValidationError(_) => "ValidationError",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::Unauthorized(_) => "AuthenticationFailure",
            ApiError::Forbidden(_) => "AuthorizationFailure",
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => "UnhandledFailure",
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationError(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::NotFound(msg)
            | ApiError::ValidationError(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg) => msg.clone(),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                "A database error occurred".to_string()
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        };

        let details = ErrorDetails {
            message: message.clone(),
            developer_message: format!("A {} Happened", self.kind()),
            trace: self.to_string(),
        };

        let mut response = (status, message).into_response();
        if matches!(self, ApiError::Unauthorized(_)) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"anime-api\""),
            );
        }
        response.extensions_mut().insert(details);
        response
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(format!("{err:#}"))
    }
}

impl From<AnimeError> for ApiError {
    fn from(err: AnimeError) -> Self {
        match err {
            AnimeError::NotFound(id) => ApiError::anime_not_found(id),
            AnimeError::InvalidName => ApiError::BadRequest("Invalid name".to_string()),
            AnimeError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => ApiError::ValidationError(msg),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
            AuthError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn anime_not_found(id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("Anime {} not found", id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}

/// Rewrites every 4xx/5xx response into an [`ErrorBody`].
///
/// Handles both [`ApiError`] responses and framework rejections (bad JSON,
/// unknown route, wrong method, caught panics).
pub async fn format_errors(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let include_trace =
        state.config().server.expose_error_traces && trace_requested(request.uri().query());
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone());

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let details = parts.extensions.remove::<ErrorDetails>();

    let (message, developer_message, trace) = match details {
        Some(details) => (
            details.message,
            Some(details.developer_message),
            Some(details.trace),
        ),
        None => {
            let text = body::to_bytes(body, MAX_REJECTION_BODY_BYTES)
                .await
                .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
                .unwrap_or_default();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or("Error").to_string()
            } else {
                text
            };
            let trace = message.clone();
            (message, None, Some(trace))
        }
    };

    let error_body = ErrorBody {
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Unknown").to_string(),
        message,
        developer_message,
        timestamp: chrono::Utc::now().to_rfc3339(),
        path,
        request_id,
        trace: trace.filter(|_| include_trace),
    };

    json_error_response(status, error_body, parts.headers)
}

/// Renders `error_body`, keeping every original header value except the
/// body framing ones.
fn json_error_response(
    status: StatusCode,
    error_body: ErrorBody,
    mut headers: HeaderMap,
) -> Response {
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::CONTENT_TYPE);

    let mut formatted = (status, Json(error_body)).into_response();
    formatted.headers_mut().extend(headers);
    formatted
}

/// True when the query string carries `trace=true`.
fn trace_requested(query: Option<&str>) -> bool {
    query.is_some_and(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .any(|(key, value)| key == "trace" && (value == "true" || value == "1"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::validation("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::DatabaseError("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_anime_error_conversion() {
        let err = ApiError::from(AnimeError::NotFound(crate::domain::AnimeId::new(999)));
        assert!(matches!(&err, ApiError::NotFound(msg) if msg == "Anime 999 not found"));

        let err = ApiError::from(AnimeError::InvalidName);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_attaches_details() {
        let response = ApiError::Unauthorized("no credentials".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));

        let details = response.extensions().get::<ErrorDetails>().unwrap();
        assert_eq!(details.message, "no credentials");
        assert_eq!(details.developer_message, "A AuthenticationFailure Happened");
    }

    #[test]
    fn test_internal_errors_hide_details_from_message() {
        let response = ApiError::DatabaseError("disk I/O error".into()).into_response();
        let details = response.extensions().get::<ErrorDetails>().unwrap();
        assert_eq!(details.message, "A database error occurred");
        assert!(details.trace.contains("disk I/O error"));
    }

    #[test]
    fn test_error_response_keeps_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::VARY, HeaderValue::from_static("origin"));
        headers.append(header::VARY, HeaderValue::from_static("authorization"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));

        let body = ErrorBody {
            status: 404,
            error: "Not Found".to_string(),
            message: "Anime 1 not found".to_string(),
            developer_message: None,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            path: "/anime/1".to_string(),
            request_id: None,
            trace: None,
        };
        let response = json_error_response(StatusCode::NOT_FOUND, body, headers);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let vary: Vec<&str> = response
            .headers()
            .get_all(header::VARY)
            .iter()
            .map(|value| value.to_str().unwrap())
            .collect();
        assert_eq!(vary, ["origin", "authorization"]);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_trace_requested() {
        assert!(trace_requested(Some("trace=true")));
        assert!(trace_requested(Some("a=b&trace=1")));
        assert!(!trace_requested(Some("trace=false")));
        assert!(!trace_requested(Some("tracetrue")));
        assert!(!trace_requested(None));
    }
}
