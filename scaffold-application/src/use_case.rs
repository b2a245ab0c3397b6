//! 用例（UseCase）
//!
//! 用例接收请求 DTO，编排领域对象完成操作，以 `Either` 返回结果：
//! - 业务上的失败由 `handle` 直接返回 `Failure(UseCaseFailedResult)`；
//! - `handle` 中出现的意外错误由 `execute` 统一转换为失败结果，不向上传播。
//!
use crate::context::AppContext;
use crate::error::AppError;
use async_trait::async_trait;
use scaffold_domain::outcome::{Either, fail};
use serde::Serialize;

/// 用例的失败结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct UseCaseFailedResult {
    message: String,
}

impl UseCaseFailedResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AppError> for UseCaseFailedResult {
    fn from(err: AppError) -> Self {
        Self::new(err.reason())
    }
}

impl From<&str> for UseCaseFailedResult {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for UseCaseFailedResult {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// 用例返回值：失败结果或成功载荷
pub type UseCaseResponse<T> = Either<UseCaseFailedResult, T>;

#[async_trait]
pub trait UseCase: Send + Sync {
    type Request: Send + 'static;
    type Response: Send + 'static;

    /// 具体业务逻辑
    async fn handle(
        &self,
        ctx: &AppContext,
        request: Self::Request,
    ) -> Result<UseCaseResponse<Self::Response>, AppError>;

    /// 执行用例；`handle` 返回的错误被捕获为失败结果
    async fn execute(
        &self,
        ctx: &AppContext,
        request: Self::Request,
    ) -> UseCaseResponse<Self::Response> {
        match self.handle(ctx, request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    correlation_id = ctx.correlation_id(),
                    error = %err,
                    "use case failed"
                );
                fail(UseCaseFailedResult::from(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_domain::error::DomainError;
    use scaffold_domain::outcome::succeed;

    struct Divide;

    #[async_trait]
    impl UseCase for Divide {
        type Request = (i32, i32);
        type Response = i32;

        async fn handle(
            &self,
            _ctx: &AppContext,
            request: Self::Request,
        ) -> Result<UseCaseResponse<i32>, AppError> {
            let (a, b) = request;
            if b == 0 {
                return Ok(fail("division by zero".into()));
            }
            if a < 0 {
                return Err(AppError::Domain(DomainError::InvalidValue {
                    reason: "negative dividend".into(),
                }));
            }
            Ok(succeed(a / b))
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        let res = Divide.execute(&AppContext::default(), (9, 3)).await;
        assert_eq!(res, succeed(3));
    }

    #[tokio::test]
    async fn business_failure_is_returned_as_is() {
        let res = Divide.execute(&AppContext::default(), (1, 0)).await;
        assert_eq!(res.failure().unwrap().message(), "division by zero");
    }

    #[tokio::test]
    async fn unexpected_error_becomes_failed_result() {
        let res = Divide.execute(&AppContext::default(), (-1, 1)).await;
        assert!(res.is_failure());
        assert_eq!(
            res.failure().unwrap().message(),
            "invalid value: negative dividend"
        );
    }

    #[test]
    fn failed_result_from_app_error_drops_prefix() {
        let failed = UseCaseFailedResult::from(AppError::NotFound("user 1".into()));
        assert_eq!(failed.to_string(), "user 1");
    }
}
