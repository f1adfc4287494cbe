use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::sync::Arc;

use super::{ApiError, AppState};

/// Username and password carried by an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Authorization middleware.
///
/// Looks up the access rule for the request, then:
/// 1. `PermitAll` passes straight through
/// 2. missing or invalid Basic credentials give 401
/// 3. a role mismatch gives 403
///
/// On success the [`AuthenticatedUser`](crate::services::AuthenticatedUser)
/// is inserted into the request extensions.
pub async fn security_filter(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let access = state
        .policy
        .access_for(request.method(), request.uri().path());

    if !access.requires_credentials() {
        return next.run(request).await;
    }

    let Some(credentials) = basic_credentials(request.headers()) else {
        return ApiError::Unauthorized("Full authentication is required".to_string())
            .into_response();
    };

    let user = match state
        .user_service()
        .authenticate(&credentials.username, &credentials.password)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return ApiError::Unauthorized("Bad credentials".to_string()).into_response();
        }
        Err(e) => return ApiError::from(e).into_response(),
    };

    tracing::Span::current().record("user_id", user.username.as_str());

    if !access.permits(&user) {
        tracing::debug!(
            user = %user.username,
            authority = user.authority(),
            ?access,
            "Access denied"
        );
        return ApiError::Forbidden("Access is denied".to_string()).into_response();
    }

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Decodes `Authorization: Basic base64(username:password)`.
///
/// Returns `None` for a missing header, another scheme, bad base64, non
/// UTF-8 content or a payload without a colon.
pub fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_basic_credentials() {
        let encoded = STANDARD.encode("Nata:mama");
        let creds = basic_credentials(&headers_with(&format!("Basic {encoded}"))).unwrap();
        assert_eq!(creds.username, "Nata");
        assert_eq!(creds.password, "mama");
    }

    #[test]
    fn test_password_may_contain_colon() {
        let encoded = STANDARD.encode("user:pa:ss");
        let creds = basic_credentials(&headers_with(&format!("basic {encoded}"))).unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.password, "pa:ss");
    }

    #[test]
    fn test_rejects_malformed_headers() {
        assert!(basic_credentials(&HeaderMap::new()).is_none());
        assert!(basic_credentials(&headers_with("Bearer abc")).is_none());
        assert!(basic_credentials(&headers_with("Basic !!!not-base64")).is_none());

        let no_colon = STANDARD.encode("justauser");
        assert!(basic_credentials(&headers_with(&format!("Basic {no_colon}"))).is_none());
    }
}
