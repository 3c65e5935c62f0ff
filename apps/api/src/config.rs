//! API server configuration

use std::env;
use std::str::FromStr;

use membership_shared_config::{
    get_env_or_default, get_required_env, parse_bool_env, parse_env, CommonConfig, ConfigError,
    ConfigResult, DatabaseConfig, Environment,
};

/// Default maximum selection depth accepted by the GraphQL gate
pub const DEFAULT_DEPTH_LIMIT: usize = 5;

/// Where records are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// PostgreSQL through the sqlx pool
    #[default]
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{}'", other)),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Settings for schema construction and request execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQLConfig {
    /// Maximum nested field depth of an operation
    pub depth_limit: usize,

    /// Register request-scoped DataLoaders for nested fields
    pub batch_loading: bool,

    /// Serve the GraphQL Playground at /graphql/playground
    pub playground: bool,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            batch_loading: false,
            playground: true,
        }
    }
}

impl GraphQLConfig {
    /// Load GraphQL settings, defaulting the playground to off in production
    pub fn from_env(environment: Environment) -> ConfigResult<Self> {
        let depth_limit = parse_env("GRAPHQL_DEPTH_LIMIT", DEFAULT_DEPTH_LIMIT)?;
        if depth_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "GRAPHQL_DEPTH_LIMIT".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            depth_limit,
            batch_loading: parse_bool_env("GRAPHQL_BATCH_LOADING", false)?,
            playground: parse_bool_env("GRAPHQL_PLAYGROUND", !environment.is_production())?,
        })
    }
}

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// Storage backend (default: postgres)
    pub storage: StorageBackend,

    /// GraphQL execution settings
    pub graphql: GraphQLConfig,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production with the Postgres backend, `DATABASE_URL` must be set
    /// explicitly. Everything else falls back to development defaults.
    pub fn from_env() -> ConfigResult<Self> {
        let environment = Environment::from_str(&get_env_or_default("ENVIRONMENT", "development"))
            .unwrap_or_default();
        let storage = parse_env("STORAGE_BACKEND", StorageBackend::Postgres)?;

        if environment.is_production() && storage == StorageBackend::Postgres {
            Self::validate_database_url()?;
        }

        Ok(Self {
            common: CommonConfig::from_env()?,
            port: parse_env("PORT", 8080)?,
            storage,
            graphql: GraphQLConfig::from_env(environment)?,
            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Validate that DATABASE_URL is explicitly set
    fn validate_database_url() -> ConfigResult<()> {
        get_required_env("DATABASE_URL").map(|_| ()).map_err(|_| {
            ConfigError::ValidationError(
                "DATABASE_URL environment variable is required in production. \
                 Please set your PostgreSQL connection string."
                    .to_string(),
            )
        })
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}
