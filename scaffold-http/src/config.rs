//! 服务配置
//!
//! 先按运行环境加载 `.env-prod` 或 `.env-dev`（文件不存在时忽略），再读取进程环境变量：
//! - `APP_ENV`：development | production | test，默认 development
//! - `SERVER_PORT`：监听端口，默认 3000
//! - `ALLOWED_ORIGINS`：逗号分隔的 CORS 来源，默认 `*`
//!
use bon::Builder;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "*";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// 对应的 dotenv 文件名
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Production => ".env-prod",
            _ => ".env-dev",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(ConfigError::InvalidValue {
                key: "APP_ENV",
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ServerConfig {
    #[builder(default = DEFAULT_PORT)]
    pub port: u16,
    #[builder(default = vec![DEFAULT_ALLOWED_ORIGINS.to_owned()])]
    pub allowed_origins: Vec<String>,
    #[builder(default)]
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ServerConfig {
    /// 加载 dotenv 文件后读取进程环境
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match std::env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };
        if let Err(err) = dotenvy::from_filename(environment.env_file()) {
            tracing::debug!(file = environment.env_file(), error = %err, "env file not loaded");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV") {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let port = match lookup("SERVER_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_owned())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            port,
            allowed_origins,
            environment,
        })
    }

    /// 是否允许任意来源
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// 环境变量布尔值：`true`、`1`、`yes`、`on`（不区分大小写）
pub fn env_is_true(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
