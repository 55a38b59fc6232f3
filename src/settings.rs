use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

use crate::use_cases::health::{DEFAULT_RECENT_WINDOW_DAYS, DEFAULT_RETENTION_DAYS, MAX_WINDOW_DAYS};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub admin_secret: Option<Zeroizing<String>>,

    #[serde(default)]
    pub cron_secret: Option<Zeroizing<String>>,

    #[serde(default = "default_recent_window_days")]
    pub health_recent_window_days: i64,

    #[serde(default = "default_retention_days")]
    pub health_retention_days: i64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Interview-Board".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_recent_window_days() -> i64 {
    DEFAULT_RECENT_WINDOW_DAYS
}
fn default_retention_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.database_url = fill_or_env(config.database_url, "APP_DATABASE_URL")?;
        if config.admin_secret.is_none() {
            config.admin_secret = env::var("APP_ADMIN_SECRET").ok().map(Zeroizing::new);
        }
        if config.cron_secret.is_none() {
            config.cron_secret = env::var("APP_CRON_SECRET").ok().map(Zeroizing::new);
        }

        config.validate()?;
        config.warn_missing_secrets();
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if !(1..=MAX_WINDOW_DAYS).contains(&self.health_recent_window_days) {
            errors.push("HEALTH_RECENT_WINDOW_DAYS must be between 1 and 36500");
        }
        if !(1..=MAX_WINDOW_DAYS).contains(&self.health_retention_days) {
            errors.push("HEALTH_RETENTION_DAYS must be between 1 and 36500");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    fn warn_missing_secrets(&self) {
        if self.admin_secret().is_none() {
            tracing::warn!("APP_ADMIN_SECRET is not set; every admin request will be rejected");
        }
        if self.cron_secret().is_none() {
            tracing::warn!("APP_CRON_SECRET is not set; every health-check trigger will be rejected");
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn admin_secret(&self) -> Option<&str> {
        non_blank_secret(&self.admin_secret)
    }

    pub fn cron_secret(&self) -> Option<&str> {
        non_blank_secret(&self.cron_secret)
    }
}

fn non_blank_secret(secret: &Option<Zeroizing<String>>) -> Option<&str> {
    secret
        .as_ref()
        .map(|s| s.as_str())
        .filter(|s| !s.trim().is_empty())
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.trim().is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl Redact for Option<Zeroizing<String>> {
    fn redact(&self) -> &str {
        match self {
            Some(secret) => secret.as_str().redact(),
            None => "[MISSING]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("admin_secret", &self.admin_secret.redact())
            .field("cron_secret", &self.cron_secret.redact())
            .field("health_recent_window_days", &self.health_recent_window_days)
            .field("health_retention_days", &self.health_retention_days)
            .finish()
    }
}
