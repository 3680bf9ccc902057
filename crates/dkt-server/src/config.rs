use clap::Parser;
use clap::ValueEnum;
use dkt_auth::Codec;

/// Deployment environment. Only `production` changes behaviour: it refuses
/// to start without a signing secret.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "docket", about = "Practice management backend")]
pub struct Config {
    /// Listen address (host:port)
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8888")]
    pub bind: String,
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
    /// HS256 signing secret for session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,
    #[arg(long = "env", env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,
    /// actix worker threads
    #[arg(long, env = "WORKERS", default_value_t = 6)]
    pub workers: usize,
}

impl Config {
    pub fn production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Token codec from the configured secret. Outside production a missing
    /// secret yields a random one, so sessions do not survive a restart.
    pub fn codec(&self) -> Result<Codec, ConfigError> {
        match (self.jwt_secret.as_deref().filter(|s| !s.is_empty()), self.production()) {
            (Some(secret), _) => Ok(Codec::new(secret.as_bytes())),
            (None, true) => Err(ConfigError::MissingSecret),
            (None, false) => {
                log::warn!("JWT_SECRET not set, using a random per-process secret");
                Ok(Codec::random())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingSecret,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSecret => write!(f, "JWT_SECRET must be set in production"),
        }
    }
}

impl std::error::Error for ConfigError {}
