//! Authentication extractor for Axum handlers.
//!
//! Two kinds of credential are accepted:
//!
//! - `Authorization: Bearer <jwt>` signed with `JWT_SECRET`.
//! - A host session token, as the web client's API client and the host's
//!   plugins send it: `Authorization: MediaBrowser Client="...", Token="..."`
//!   (or the older `X-Emby-Authorization` header in the same shape), or a
//!   bare `X-Emby-Token` / `X-MediaBrowser-Token` header. The host decides
//!   whether the token is valid and whose it is.

use std::sync::LazyLock;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use genrerows_core::error::CoreError;
use genrerows_core::types::UserId;
use regex::Regex;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authorization schemes that carry host session parameters.
const SESSION_SCHEMES: [&str; 2] = ["MediaBrowser", "Emby"];

/// Headers holding a `<scheme> key="value", ...` parameter list.
const SESSION_AUTH_HEADERS: [&str; 2] = ["authorization", "x-emby-authorization"];

/// Headers holding a bare session token.
const SESSION_TOKEN_HEADERS: [&str; 2] = ["x-emby-token", "x-mediabrowser-token"];

static TOKEN_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|[\s,])Token="([^"]*)""#).expect("valid regex")
});

/// Authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The host user's id (JWT `sub`, or the owner of the host session).
    pub user_id: UserId,
}

/// A credential found in the request headers.
#[derive(Debug, PartialEq, Eq)]
enum Credential<'a> {
    Jwt(&'a str),
    HostSession(&'a str),
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match credential(&parts.headers) {
            Some(Credential::Jwt(token)) => {
                let claims = validate_token(token, &state.config.jwt).map_err(|_| {
                    AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
                })?;
                Ok(AuthUser {
                    user_id: claims.sub,
                })
            }
            Some(Credential::HostSession(token)) => {
                let user = state.catalog.resolve_session(token).await?;
                tracing::debug!(user_id = %user.id, "Authenticated host session");
                Ok(AuthUser { user_id: user.id })
            }
            None => Err(AppError::Core(CoreError::Unauthorized(
                "Missing credentials. Expected a Bearer token or a host session token".into(),
            ))),
        }
    }
}

fn credential(headers: &HeaderMap) -> Option<Credential<'_>> {
    let bearer = header_str(headers, "authorization").and_then(|v| v.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        return Some(Credential::Jwt(token.trim()));
    }
    session_token(headers).map(Credential::HostSession)
}

fn session_token(headers: &HeaderMap) -> Option<&str> {
    let from_params = SESSION_AUTH_HEADERS
        .iter()
        .filter_map(|name| header_str(headers, name))
        .filter_map(strip_session_scheme)
        .find_map(|params| TOKEN_PARAM_RE.captures(params)?.get(1))
        .map(|m| m.as_str());

    from_params.or_else(|| {
        SESSION_TOKEN_HEADERS
            .iter()
            .find_map(|name| header_str(headers, name))
            .map(str::trim)
    })
}

/// The parameter list after a host session scheme, or `None` for any other
/// scheme.
fn strip_session_scheme(value: &str) -> Option<&str> {
    let (scheme, params) = value.trim_start().split_once(' ')?;
    SESSION_SCHEMES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(scheme))
        .then_some(params)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_is_a_jwt() {
        let map = headers(&[("authorization", "Bearer abc.def.ghi")]);
        assert_eq!(credential(&map), Some(Credential::Jwt("abc.def.ghi")));
    }

    #[test]
    fn web_client_header_yields_the_session_token() {
        let map = headers(&[(
            "authorization",
            r#"MediaBrowser Client="Jellyfin Web", Device="Firefox", DeviceId="TW96aWxsYQ", Version="10.9.11", Token="0123abcd""#,
        )]);
        assert_eq!(credential(&map), Some(Credential::HostSession("0123abcd")));
    }

    #[test]
    fn legacy_headers_yield_the_session_token() {
        let map = headers(&[(
            "x-emby-authorization",
            r#"Emby UserId="u", Client="Android", Token="feed""#,
        )]);
        assert_eq!(credential(&map), Some(Credential::HostSession("feed")));

        let map = headers(&[("x-emby-token", "cafe")]);
        assert_eq!(credential(&map), Some(Credential::HostSession("cafe")));

        let map = headers(&[("x-mediabrowser-token", "beef")]);
        assert_eq!(credential(&map), Some(Credential::HostSession("beef")));
    }

    #[test]
    fn session_header_without_token_falls_back_to_token_header() {
        let map = headers(&[
            ("authorization", r#"MediaBrowser Client="Jellyfin Web", DeviceId="x""#),
            ("x-emby-token", "cafe"),
        ]);
        assert_eq!(credential(&map), Some(Credential::HostSession("cafe")));
    }

    #[test]
    fn other_schemes_are_not_credentials() {
        let map = headers(&[("authorization", r#"Basic Token="nope""#)]);
        assert_eq!(credential(&map), None);
        assert_eq!(credential(&HeaderMap::new()), None);
    }
}
