//! Server configuration, read once at startup from flags or the environment.

use clap::Parser;

#[derive(Parser, Clone)]
#[command(name = "jobspring-backend")]
#[command(about = "HTTP API for the Job Spring job board")]
pub struct Config {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Shared secret used to sign and verify session tokens.
    #[arg(long, env = "JWT_KEY", hide_env_values = true)]
    pub jwt_secret: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Comma-separated origins allowed to call the API with credentials.
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Mark the session cookie `SameSite=None; Secure` for cross-site clients.
    #[arg(
        long,
        env = "CROSS_SITE_COOKIES",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub cross_site_cookies: bool,

    /// Connect to PostgreSQL over TLS.
    #[arg(
        long,
        env = "DATABASE_TLS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub db_tls: bool,

    /// Upper bound on pooled database connections.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 16)]
    pub db_max_connections: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("port", &self.port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("cross_site_cookies", &self.cross_site_cookies)
            .field("db_tls", &self.db_tls)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}
