//! Session cookie construction and token extraction from request headers.
//!
//! Cookies are built and parsed by hand; the format is small enough that a
//! cookie crate would be more surface than the two format strings below.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use super::claims::SESSION_TTL_SECS;
use super::track::Track;

/// Build the Set-Cookie value for a fresh session on `track`.
///
/// `HttpOnly` always; `Secure` only when the deployment serves TLS (i.e.
/// outside dev mode), since browsers drop Secure cookies on plain http.
pub fn session_cookie(track: Track, token: &str, secure: bool) -> String {
    let secure_flag = if secure { " Secure;" } else { "" };
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax;{} Max-Age={}",
        track.cookie_name(),
        token,
        secure_flag,
        SESSION_TTL_SECS
    )
}

/// Build the Set-Cookie value that destroys `track`'s session cookie.
///
/// Same name and path as issuance, empty value, already elapsed. Sending it
/// for a session that does not exist is harmless, which is what makes logout
/// idempotent.
pub fn expired_cookie(track: Track) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        track.cookie_name()
    )
}

/// Find `cookie_name` in a raw Cookie header value.
pub fn token_from_cookie_header<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name.trim() == cookie_name {
            Some(value.trim())
        } else {
            None
        }
    })
}

/// Extract `track`'s session token from the request headers, if present.
pub fn session_token(headers: &HeaderMap, track: Track) -> Option<&str> {
    headers
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookie_header| token_from_cookie_header(cookie_header, track.cookie_name()))
}

/// Extract a Bearer token from an Authorization header value.
///
/// Strict: exactly one `Bearer <token>` pair, case-insensitive scheme.
pub fn bearer_token_from_header(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next()?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = parts.next()?;
    if token.is_empty() || parts.next().is_some() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(Track::Consumer, "tok.en.value", false);
        assert!(cookie.starts_with("consumer-token=tok.en.value;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_flag() {
        let cookie = session_cookie(Track::Admin, "t", true);
        assert!(cookie.starts_with("admin-token=t;"));
        assert!(cookie.contains(" Secure;"));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_cookie(Track::Admin);
        assert!(cookie.starts_with("admin-token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_token_from_cookie_header() {
        let header = "theme=dark; consumer-token=abc.def.ghi; lang=id";
        assert_eq!(
            token_from_cookie_header(header, "consumer-token"),
            Some("abc.def.ghi")
        );
        assert_eq!(token_from_cookie_header(header, "admin-token"), None);
        assert_eq!(token_from_cookie_header("", "consumer-token"), None);
    }

    #[test]
    fn test_token_from_cookie_header_whitespace() {
        let header = " admin-token = xyz ;theme=dark";
        assert_eq!(token_from_cookie_header(header, "admin-token"), Some("xyz"));
    }

    #[test]
    fn test_session_token_reads_only_own_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("consumer-token=ctok; admin-token=atok"),
        );
        assert_eq!(session_token(&headers, Track::Consumer), Some("ctok"));
        assert_eq!(session_token(&headers, Track::Admin), Some("atok"));

        let mut consumer_only = HeaderMap::new();
        consumer_only.insert(COOKIE, HeaderValue::from_static("consumer-token=ctok"));
        assert_eq!(session_token(&consumer_only, Track::Admin), None);
    }

    #[test]
    fn test_bearer_token_from_header_valid() {
        assert_eq!(
            bearer_token_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(bearer_token_from_header("bearer   token123"), Some("token123"));
    }

    #[test]
    fn test_bearer_token_from_header_invalid() {
        let cases = ["", "Bearer", "Bearer ", "Token something", "Bearer token extra"];
        for case in cases {
            assert!(
                bearer_token_from_header(case).is_none(),
                "{case:?} should fail"
            );
        }
    }
}
