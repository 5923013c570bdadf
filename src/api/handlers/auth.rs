use crate::api::error::AppError;
use crate::api::middleware::auth::TOKEN_COOKIE;
use crate::entities::users::{self, ROLE_VISITOR};
use crate::utils::auth::{Claims, create_jwt};
use axum::{Extension, Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// bcrypt cost factor, matching the storefront's existing password hashes.
const BCRYPT_COST: u32 = 10;

#[derive(Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(email(message = "email must be well-formed"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[serde(rename = "Status")]
    pub status: String,
    pub role: String,
    pub id: String,
    pub username: String,
}

/// User record as exposed over the API. The password hash stays server-side.
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered"),
        (status = 400, description = "Malformed payload"),
        (status = 500, description = "Hashing or persistence failure")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<&'static str>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Duplicate emails are deliberately not rejected; see users entity docs
    let password_hash = bcrypt::hash(&payload.password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

    users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        username: Set(payload.username),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        role: Set(ROLE_VISITOR.to_string()),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
    }
    .insert(&state.db)
    .await?;

    Ok(Json("Success"))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token cookie set", body = LoginResponse),
        (status = 401, description = "Password is incorrect"),
        (status = 404, description = "No record found")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No record found".to_string()))?;

    let matches = bcrypt::verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("password verification failed: {e}")))?;
    if !matches {
        return Err(AppError::Unauthorized("Password is incorrect".to_string()));
    }

    let token = create_jwt(&user, &state.config.jwt_secret, state.config.token_ttl_days)
        .map_err(|e| AppError::Internal(format!("token issuance failed: {e}")))?;

    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(state.config.cookie_http_only)
        .secure(state.config.cookie_secure)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            status: "Success".to_string(),
            role: user.role,
            id: user.id,
            username: user.username,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/admindashboard",
    responses(
        (status = 200, description = "Caller holds an admin token"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not admin")
    )
)]
pub async fn admin_dashboard(Extension(claims): Extension<Claims>) -> Json<&'static str> {
    tracing::debug!("admin dashboard opened by {}", claims.username);
    Json("Success")
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All registered users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not admin")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = users::Entity::find().all(&state.db).await?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}
