// ABOUTME: httpOnly session cookie helpers
// ABOUTME: Builds Set-Cookie values for the auth token and reads cookies from request headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::auth::AUTH_COOKIE_NAME;
use axum::http::{header, HeaderMap, HeaderValue};

/// Find the value of cookie `name` in the request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}

/// Attach the session cookie to response headers
pub fn set_auth_cookie(headers: &mut HeaderMap, token: &str, max_age_secs: i64, secure: bool) {
    let secure_attr = if secure { "; Secure" } else { "" };
    let cookie = format!(
        "{AUTH_COOKIE_NAME}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}{secure_attr}"
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Expire the session cookie
pub fn clear_auth_cookie(headers: &mut HeaderMap) {
    let cookie = format!("{AUTH_COOKIE_NAME}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_lookup_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def.ghi; lang=en"),
        );
        assert_eq!(
            get_cookie_value(&headers, "auth_token").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(get_cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_set_and_clear_cookie() {
        let mut headers = HeaderMap::new();
        set_auth_cookie(&mut headers, "tok", 3600, false);
        clear_auth_cookie(&mut headers);
        let values: Vec<_> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_owned())
            .collect();
        assert_eq!(values.len(), 2);
        assert!(values[0].starts_with("auth_token=tok;"));
        assert!(values[0].contains("HttpOnly"));
        assert!(values[1].contains("Max-Age=0"));
    }
}
