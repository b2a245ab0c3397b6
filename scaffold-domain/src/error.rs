//! 领域层错误
//!
//! 覆盖标识与值校验、业务规则、事件处理器失败、解析与持久化几类情形；
//! 上层（应用层、HTTP 层）通过 `From` 将其包装为自身的错误类型。
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    /// 标识不是 UUIDv4 或不是正整数
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },

    /// 业务规则被破坏，消息原样展示
    #[error("{message}")]
    BusinessRuleBroken { message: String },

    /// 某个处理器处理事件失败；分发中止且缓冲区保留
    #[error("handler {handler} failed on {event}: {reason}")]
    EventHandler {
        handler: String,
        event: String,
        reason: String,
    },

    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("not found: {reason}")]
    NotFound { reason: String },

    #[error("database error: {reason}")]
    Database { reason: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    fn parse(err: impl std::fmt::Display) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}

impl From<uuid::Error> for DomainError {
    fn from(err: uuid::Error) -> Self {
        Self::parse(err)
    }
}

impl From<chrono::ParseError> for DomainError {
    fn from(err: chrono::ParseError) -> Self {
        Self::parse(err)
    }
}

/// 行不存在映射为 `NotFound`，其余映射为 `Database`
#[cfg(feature = "infra-sqlx")]
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound {
                reason: "row not found".into(),
            },
            other => DomainError::Database {
                reason: other.to_string(),
            },
        }
    }
}
