use scaffold_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("authorization: {0}")]
    Authorization(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("infra: {0}")]
    Infra(String),
}

impl AppError {
    /// 不带分类前缀的错误描述，用于返回给调用方
    pub fn reason(&self) -> String {
        match self {
            AppError::Domain(err) => err.to_string(),
            AppError::Validation(reason)
            | AppError::Authorization(reason)
            | AppError::NotFound(reason)
            | AppError::Infra(reason) => reason.clone(),
        }
    }
}
