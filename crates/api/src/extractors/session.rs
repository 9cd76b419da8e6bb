//! Session extractor.
//!
//! Identity is established by the fronting gateway, which forwards it in
//! plain headers. Requests without identity headers act as an anonymous
//! admin.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts, HeaderMap},
};
use domain::models::{Locale, Role};
use domain::Session;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

pub const SESSION_USER_HEADER: &str = "X-Session-User";
pub const SESSION_ROLE_HEADER: &str = "X-Session-Role";

/// The per-request [`Session`], built from request headers.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext(pub Session);

impl SessionContext {
    /// Builds a session from headers, falling back to `default_locale`
    /// when no `Accept-Language` is sent.
    pub fn from_headers(headers: &HeaderMap, default_locale: Locale) -> Result<Self, ApiError> {
        let user_id = header_str(headers, SESSION_USER_HEADER)
            .map(|raw| {
                Uuid::parse_str(raw).map_err(|_| {
                    ApiError::validation(format!("{} must be a UUID", SESSION_USER_HEADER))
                })
            })
            .transpose()?;

        let role = match header_str(headers, SESSION_ROLE_HEADER) {
            Some(raw) => raw.parse::<Role>().map_err(ApiError::validation)?,
            None => Role::Admin,
        };

        let locale = header_str(headers, ACCEPT_LANGUAGE.as_str())
            .map(Locale::from_accept_language)
            .unwrap_or(default_locale);

        Ok(SessionContext(Session::new(user_id, role, locale)))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Self::from_headers(&parts.headers, state.config.locale.default)?;
        tracing::debug!(
            user_id = ?session.0.user_id(),
            role = %session.0.role(),
            locale = %session.0.locale(),
            "Resolved session"
        );
        Ok(session)
    }
}
