use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::auth::jwt::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
/// Returns 401 if the Authorization header is missing, malformed, or the
/// token fails verification (bad signature or expired).
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".into()))?;

        let claims = state
            .jwt
            .verify(token)
            .map_err(|_| AppError::Unauthorized("Invalid token.".into()))?;

        Ok(AuthUser(claims))
    }
}

/// Optional claims extractor - returns None instead of 401 when no valid
/// token is present. Used where an anonymous caller gets a relaxed
/// response rather than a hard failure.
pub struct MaybeAuthUser(pub Option<Claims>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_token(parts).and_then(|token| state.jwt.verify(token).ok());
        Ok(MaybeAuthUser(claims))
    }
}

/// Extractor that additionally requires the admin role. 403 for a valid
/// token with a non-admin role.
pub struct AdminUser(pub Claims);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if !claims.is_admin() {
            return Err(AppError::Forbidden(
                "Access denied. Admin privileges required.".into(),
            ));
        }

        Ok(AdminUser(claims))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_extracts_value() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let parts = parts_with_auth(Some("abc.def.ghi"));
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn bearer_token_missing_header() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }
}
