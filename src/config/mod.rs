use std::env;
use std::path::PathBuf;

/// Fallback signing secret for local development only. `AppConfig::from_env`
/// warns when it is in use.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Runtime configuration, loaded once at startup and injected everywhere.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string (default: local sqlite file)
    pub database_url: String,

    /// Port the HTTP server binds on (default: 5000)
    pub port: u16,

    /// HMAC secret for session tokens
    pub jwt_secret: String,

    /// Session token lifetime in days (default: 30)
    pub token_ttl_days: i64,

    /// Set the `HttpOnly` flag on the token cookie (default: false)
    pub cookie_http_only: bool,

    /// Set the `Secure` flag on the token cookie (default: false)
    pub cookie_secure: bool,

    /// Single allowed CORS origin, with credentials (default: http://localhost:3000)
    pub cors_origin: String,

    /// Root directory for uploaded media (default: "public")
    pub upload_root: PathBuf,

    /// Maximum request body size in bytes (default: 100 MB)
    pub max_body_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://media_admin.db?mode=rwc".to_string(),
            port: 5000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_days: 30,
            cookie_http_only: false,
            cookie_secure: false,
            cors_origin: "http://localhost:3000".to_string(),
            upload_root: PathBuf::from("public"),
            max_body_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            jwt_secret: env::var("JWT_SECRET").unwrap_or(default.jwt_secret),

            token_ttl_days: env::var("TOKEN_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.token_ttl_days),

            cookie_http_only: env::var("COOKIE_HTTP_ONLY")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(default.cookie_http_only),

            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(default.cookie_secure),

            cors_origin: env::var("CORS_ORIGIN").unwrap_or(default.cors_origin),

            upload_root: env::var("UPLOAD_ROOT")
                .map(PathBuf::from)
                .unwrap_or(default.upload_root),

            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_body_size),
        };

        if config.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set, using development fallback");
        }

        config
    }

    /// Directory image and banner files are written to
    pub fn images_dir(&self) -> PathBuf {
        self.upload_root.join("images")
    }

    /// Directory video files are written to
    pub fn videos_dir(&self) -> PathBuf {
        self.upload_root.join("videos")
    }

    /// Config for tests: in-memory database, caller supplies the upload root
    pub fn development(upload_root: PathBuf) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            upload_root,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.token_ttl_days, 30);
        assert!(!config.cookie_http_only);
        assert!(!config.cookie_secure);
        assert_eq!(config.cors_origin, "http://localhost:3000");
    }

    #[test]
    fn test_category_dirs() {
        let config = AppConfig::default();
        assert_eq!(config.images_dir(), PathBuf::from("public/images"));
        assert_eq!(config.videos_dir(), PathBuf::from("public/videos"));
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development(PathBuf::from("/tmp/uploads"));
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.images_dir(), PathBuf::from("/tmp/uploads/images"));
    }
}
