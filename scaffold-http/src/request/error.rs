use crate::responder::ApiResponder;
use crate::validation::ValidationError;
use axum::response::{IntoResponse, Response};

/// 请求校验失败，携带全部字段错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed")]
pub struct ValidationException {
    pub errors: Vec<ValidationError>,
}

impl ValidationException {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthorizationException {
    pub message: String,
}

impl AuthorizationException {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for AuthorizationException {
    fn default() -> Self {
        Self::new("Unauthorized request")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Validation(#[from] ValidationException),

    #[error(transparent)]
    Authorization(#[from] AuthorizationException),

    /// 请求体不是合法的 JSON 对象
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        ApiResponder::send_error(self)
    }
}
