use crate::AppState;
use crate::api::error::AppError;
use crate::entities::users::ROLE_ADMIN;
use crate::utils::auth::validate_jwt;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

pub const TOKEN_COOKIE: &str = "token";

/// Gate for admin-only routes: the session token travels in the `token`
/// cookie, and only an "admin" role may pass. Decoded claims are exposed to
/// downstream handlers through request extensions.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());

    let token = jar
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Token is Missing".to_string()))?;

    // Signature and expiry checks both collapse into the same client message
    let claims = validate_jwt(&token, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Error with token".to_string()))?;

    if claims.role != ROLE_ADMIN {
        return Err(AppError::Forbidden("Not admin".to_string()));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
