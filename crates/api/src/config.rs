use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    /// JWT authentication configuration
    pub jwt: JwtAuthConfig,
    /// First-run administrator account
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub procurement: ProcurementConfig,
    #[serde(default)]
    pub idempotency: IdempotencyConfig,
    /// Generative-language analysis endpoint
    #[serde(default)]
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl From<&DatabaseConfig> for persistence::db::DatabaseConfig {
    fn from(cfg: &DatabaseConfig) -> Self {
        Self {
            url: cfg.url.clone(),
            max_connections: cfg.max_connections,
            min_connections: cfg.min_connections,
            connect_timeout_secs: cfg.connect_timeout_secs,
            idle_timeout_secs: cfg.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Send Strict-Transport-Security (only behind HTTPS termination).
    #[serde(default)]
    pub hsts_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtAuthConfig {
    /// HMAC secret for signing tokens (at least 32 bytes)
    pub secret: String,

    /// Token expiration in seconds (default: 28800 = 8 hours)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: i64,

    /// Leeway in seconds for clock skew tolerance (default: 30)
    #[serde(default = "default_jwt_leeway")]
    pub leeway_secs: u64,
}

fn default_token_expiry() -> i64 {
    28800 // 8 hours, one school day
}

fn default_jwt_leeway() -> u64 {
    30
}

/// Administrator created on startup when no user with the name exists.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub bootstrap_username: String,

    #[serde(default)]
    pub bootstrap_password: String,

    #[serde(default = "default_admin_name")]
    pub bootstrap_name: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            bootstrap_username: String::new(),
            bootstrap_password: String::new(),
            bootstrap_name: default_admin_name(),
        }
    }
}

impl AdminConfig {
    pub fn is_configured(&self) -> bool {
        !self.bootstrap_username.is_empty() && !self.bootstrap_password.is_empty()
    }
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcurementConfig {
    /// Enforce pending -> approved|rejected, approved -> completed.
    #[serde(default)]
    pub strict_transitions: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdempotencyConfig {
    /// How long ledger idempotency keys are kept (default: 168 = 7 days)
    #[serde(default = "default_idempotency_retention")]
    pub retention_hours: i32,
}

impl Default for IdempotencyConfig {
    fn default() -> Self {
        Self {
            retention_hours: default_idempotency_retention(),
        }
    }
}

fn default_idempotency_retention() -> i32 {
    168
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_ai_base_url")]
    pub base_url: String,

    #[serde(default = "default_ai_model")]
    pub model: String,

    #[serde(default = "default_ai_timeout")]
    pub timeout_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            timeout_ms: default_ai_timeout(),
        }
    }
}

fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_ai_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_ai_timeout() -> u64 {
    60000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with SARPRAS__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SARPRAS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("security.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// This method creates a config entirely from defaults and overrides,
    /// without relying on config files (which may not be accessible during tests).
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30

            [database]
            url = ""
            max_connections = 20
            min_connections = 2
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [jwt]
            secret = "test-secret-key-with-at-least-32-bytes!!"
            token_expiry_secs = 28800
            leeway_secs = 30
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "SARPRAS__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.jwt.secret.len() < shared::jwt::MIN_SECRET_LEN {
            return Err(ConfigValidationError::MissingRequired(format!(
                "SARPRAS__JWT__SECRET must be at least {} bytes",
                shared::jwt::MIN_SECRET_LEN
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.ai.enabled && self.ai.api_key.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "SARPRAS__AI__API_KEY must be set when AI analysis is enabled".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
