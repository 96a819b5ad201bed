//! Session Cookie Plumbing
//!
//! The draft store is scoped by a `selfservice_session` UUID cookie. The
//! cookie only identifies the draft namespace; it carries no data itself.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;

use wizard_core::SessionId;

/// Cookie name carrying the session identifier
pub const SESSION_COOKIE: &str = "selfservice_session";

/// Resolved session for one request
#[derive(Clone, Debug)]
pub struct RequestSession {
    pub id: SessionId,

    /// Whether the id was minted for this request (cookie must be set)
    pub is_new: bool,
}

/// Read the session cookie, minting a fresh id when absent
pub fn session_from_headers(headers: &HeaderMap) -> RequestSession {
    let existing = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(find_session_cookie);

    match existing {
        Some(id) => RequestSession {
            id: SessionId::from_string(id),
            is_new: false,
        },
        None => RequestSession {
            id: SessionId::new(),
            is_new: true,
        },
    }
}

fn find_session_cookie(cookie_header: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Attach a Set-Cookie header when the session was minted this request
pub fn apply_session_cookie(mut response: Response, session: &RequestSession) -> Response {
    if session.is_new {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            session.id.as_str()
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
