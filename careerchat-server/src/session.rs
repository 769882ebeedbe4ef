//! Anonymous session cookie middleware
//!
//! Every request carries an `anon_sid` cookie identifying the browser
//! session without identifying the person. If the cookie is missing a
//! fresh UUID is minted, attached to the request for handlers, and set
//! on the response with a 30-day lifetime.

use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "anon_sid";

const THIRTY_DAYS_SECS: u64 = 30 * 24 * 60 * 60;

/// Session id extracted from (or minted for) the current request
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// Middleware: ensure every request has an anonymous session id
pub async fn anon_session(mut request: Request, next: Next) -> Response {
    let existing = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(cookie_value);

    let (session_id, minted) = match existing {
        Some(sid) => (sid, false),
        None => (Uuid::new_v4().to_string(), true),
    };

    request.extensions_mut().insert(SessionId(session_id.clone()));

    let mut response = next.run(request).await;

    if minted {
        let cookie = format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session_id, THIRTY_DAYS_SECS
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

fn cookie_value(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_parses_multi_cookie_header() {
        let header = "theme=dark; anon_sid=abc-123; other=x";
        assert_eq!(cookie_value(header), Some("abc-123".to_string()));
    }

    #[test]
    fn test_cookie_value_missing_or_empty() {
        assert_eq!(cookie_value("theme=dark"), None);
        assert_eq!(cookie_value("anon_sid="), None);
        assert_eq!(cookie_value(""), None);
    }
}
