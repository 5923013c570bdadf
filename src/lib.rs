pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::media_service::MediaService;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::admin_dashboard,
        api::handlers::auth::list_users,
        api::handlers::media::add_banner,
        api::handlers::media::get_banner,
        api::handlers::media::delete_banner,
        api::handlers::media::add_image,
        api::handlers::media::get_image,
        api::handlers::media::delete_image,
        api::handlers::media::add_video,
        api::handlers::media::get_video,
        api::handlers::media::delete_video,
    ),
    components(
        schemas(
            api::handlers::auth::RegisterRequest,
            api::handlers::auth::LoginRequest,
            api::handlers::auth::LoginResponse,
            api::handlers::auth::UserResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and admin gating"),
        (name = "media", description = "Banner, gallery image and video management")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media: Arc<MediaService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/addbanner", post(api::handlers::media::add_banner))
        .route("/getbanner", get(api::handlers::media::get_banner))
        .route("/deletebanner", delete(api::handlers::media::delete_banner))
        .route("/addimage", post(api::handlers::media::add_image))
        .route("/getimage", get(api::handlers::media::get_image))
        .route("/deleteimage/:id", delete(api::handlers::media::delete_image))
        .route("/addvideo", post(api::handlers::media::add_video))
        .route("/getvideo", get(api::handlers::media::get_video))
        .route("/deletevideo/:id", delete(api::handlers::media::delete_video))
        .route("/register", post(api::handlers::auth::register))
        .route("/login", post(api::handlers::auth::login))
        .route(
            "/admindashboard",
            get(api::handlers::auth::admin_dashboard).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::require_admin,
            )),
        )
        .route(
            "/users",
            get(api::handlers::auth::list_users).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::require_admin,
            )),
        )
        // Public read-only namespaces over the upload directories
        .nest_service("/images", ServeDir::new(state.config.images_dir()))
        .nest_service("/videos", ServeDir::new(state.config.videos_dir()))
        .layer(cors)
        .with_state(state)
}

/// Single configured origin with credentials, mirroring the storefront
/// frontend's cookie-based sessions.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => tracing::warn!(
            "Invalid CORS_ORIGIN '{}', cross-origin requests disabled",
            config.cors_origin
        ),
    }

    cors
}
