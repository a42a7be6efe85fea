use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL used to build public share links (no trailing slash).
    pub public_base_url: String,
    /// Return email verification codes in the sign-up response.
    ///
    /// Codes are always logged; this is for local development and tests only.
    pub expose_verification_code: bool,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `PUBLIC_BASE_URL`          | `http://localhost:3000`    |
    /// | `EXPOSE_VERIFICATION_CODE` | `false`                    |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let expose_verification_code = std::env::var("EXPOSE_VERIFICATION_CODE")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            expose_verification_code,
            jwt,
        }
    }

    /// Public URL of a canvas share link.
    pub fn share_url(&self, token: &str) -> String {
        format!("{}/share/{token}", self.public_base_url)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
