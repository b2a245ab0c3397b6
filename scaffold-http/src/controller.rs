//! 控制器（Controller）
//!
//! 控制器声明其请求类型，接收已校验的请求并返回响应。
//! `execute` 是失败边界：处理函数返回的错误或 panic 统一转换为 500 并记录日志，
//! 不再向上抛出。
//!
use crate::request::{FormRequest, ValidatedRequest};
use crate::responder::ApiResponder;
use async_trait::async_trait;
use axum::response::Response;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// 处理函数的执行方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// 在当前请求任务中直接等待
    #[default]
    Immediate,
    /// 在独立的运行时任务中执行并等待其完成
    Worker,
}

#[async_trait]
pub trait Controller: Send + Sync + 'static {
    type Request: FormRequest;

    fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::Immediate
    }

    async fn handle(&self, request: ValidatedRequest<Self::Request>) -> anyhow::Result<Response>;
}

/// 执行控制器，错误与 panic 均映射为 500
pub async fn execute<C: Controller>(
    controller: Arc<C>,
    request: ValidatedRequest<C::Request>,
) -> Response {
    let name = std::any::type_name::<C>();

    let outcome = match controller.execution_mode() {
        ExecutionMode::Immediate => AssertUnwindSafe(controller.handle(request))
            .catch_unwind()
            .await
            .map_err(|_| "handler panicked".to_owned()),
        ExecutionMode::Worker => {
            tokio::spawn(async move { controller.handle(request).await })
                .await
                .map_err(|err| err.to_string())
        }
    };

    match outcome {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            tracing::error!(controller = name, error = ?err, "controller failed");
            ApiResponder::internal_server_error(None)
        }
        Err(reason) => {
            tracing::error!(controller = name, reason = %reason, "controller aborted");
            ApiResponder::internal_server_error(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{DefaultRequest, IncomingRequest, RequestInput};
    use axum::http::StatusCode;

    enum Behaviour {
        Succeed,
        Fail,
        Panic,
    }

    struct Probe {
        behaviour: Behaviour,
        mode: ExecutionMode,
    }

    #[async_trait]
    impl Controller for Probe {
        type Request = DefaultRequest;

        fn execution_mode(&self) -> ExecutionMode {
            self.mode
        }

        async fn handle(&self, _request: ValidatedRequest<DefaultRequest>) -> anyhow::Result<Response> {
            match self.behaviour {
                Behaviour::Succeed => Ok(ApiResponder::no_content()),
                Behaviour::Fail => anyhow::bail!("database unavailable"),
                Behaviour::Panic => panic!("boom"),
            }
        }
    }

    async fn run(behaviour: Behaviour, mode: ExecutionMode) -> StatusCode {
        let request = IncomingRequest::<DefaultRequest>::new(RequestInput::new())
            .validate_and_authorize_or_fail()
            .unwrap();
        execute(Arc::new(Probe { behaviour, mode }), request)
            .await
            .status()
    }

    #[tokio::test]
    async fn immediate_mode() {
        assert_eq!(run(Behaviour::Succeed, ExecutionMode::Immediate).await, StatusCode::NO_CONTENT);
        assert_eq!(
            run(Behaviour::Fail, ExecutionMode::Immediate).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            run(Behaviour::Panic, ExecutionMode::Immediate).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn worker_mode() {
        assert_eq!(run(Behaviour::Succeed, ExecutionMode::Worker).await, StatusCode::NO_CONTENT);
        assert_eq!(
            run(Behaviour::Fail, ExecutionMode::Worker).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            run(Behaviour::Panic, ExecutionMode::Worker).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
