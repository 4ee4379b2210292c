//! Command-line and environment configuration for the server and client.
//!
//! Both structures derive [`clap::Args`] so each binary can flatten them
//! into its own parser. Every flag also reads a `TASKLANE_*` variable.

use crate::projection::StatusFilter;
use camino::Utf8PathBuf;
use chrono::Duration;
use clap::Args;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use std::fmt;
use std::net::SocketAddr;

/// Default lifetime of an issued bearer token: thirty days.
pub const DEFAULT_TOKEN_TTL_SECS: u32 = 30 * 24 * 60 * 60;

/// Server settings.
#[derive(Clone, Args)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "TASKLANE_LISTEN", default_value = "0.0.0.0:5000")]
    pub listen: SocketAddr,

    /// `PostgreSQL` connection URL; tasks are kept in memory when absent.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(
        long,
        env = "TASKLANE_POOL_SIZE",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub pool_size: u32,

    /// HMAC secret used to sign bearer tokens.
    #[arg(long, env = "TASKLANE_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Lifetime of an issued token, in seconds.
    #[arg(long, env = "TASKLANE_TOKEN_TTL_SECS", default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    pub token_ttl_secs: u32,
}

impl ServerConfig {
    /// Returns the token lifetime as a duration.
    #[must_use]
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(i64::from(self.token_ttl_secs))
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("listen", &self.listen)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("pool_size", &self.pool_size)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

/// Client settings.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the Tasklane server.
    #[arg(long, env = "TASKLANE_SERVER", default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// Directory holding the persisted session.
    #[arg(long, env = "TASKLANE_SESSION_DIR", default_value = ".tasklane")]
    pub session_dir: Utf8PathBuf,
}

/// Parses a `--filter` selector, listing every [`StatusFilter`] in `--help`.
#[must_use]
pub fn status_filter_parser() -> impl TypedValueParser<Value = StatusFilter> {
    PossibleValuesParser::new(StatusFilter::ALL.map(StatusFilter::as_str))
        .try_map(|selector| selector.parse::<StatusFilter>())
}
