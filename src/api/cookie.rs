//! Session cookie handling
//!
//! The session id travels in a single `HttpOnly` cookie. Only ids the
//! [`SessionStore`](crate::session::SessionStore) minted are ever honoured.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "neurowake_session";

/// Extract the session id from the request's `Cookie` headers
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for a session id
pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// Attach the session cookie to a response when the session is new
pub fn with_session_cookie(mut response: Response, id: &str, created: bool) -> Response {
    if created {
        match HeaderValue::from_str(&session_cookie(id)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(session_id = %id, "Invalid session cookie value: {}", e),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_session_from_headers() {
        let h = headers("theme=dark; neurowake_session=abc-123; other=1");
        assert_eq!(session_from_headers(&h), Some("abc-123".to_string()));
    }

    #[test]
    fn test_missing_or_empty_cookie() {
        assert_eq!(session_from_headers(&HeaderMap::new()), None);
        assert_eq!(session_from_headers(&headers("theme=dark")), None);
        assert_eq!(session_from_headers(&headers("neurowake_session=")), None);
    }

    #[test]
    fn test_cookie_value() {
        assert_eq!(
            session_cookie("abc"),
            "neurowake_session=abc; Path=/; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_cookie_only_set_for_new_sessions() {
        let response = with_session_cookie("ok".into_response(), "abc", false);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let response = with_session_cookie("ok".into_response(), "abc", true);
        assert_eq!(
            response.headers().get(header::SET_COOKIE).unwrap(),
            "neurowake_session=abc; Path=/; HttpOnly; SameSite=Lax"
        );
    }
}
