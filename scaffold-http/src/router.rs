//! 路由适配
//!
//! 每条路由绑定 方法 + 路径 + 控制器。请求到达后依次执行：
//! 构建原始输入 → 构造控制器声明的请求对象 → 校验并授权 → 调用控制器。
//! 校验失败返回 422，授权失败返回 401。
//!
use crate::controller::{Controller, execute};
use crate::request::{IncomingRequest, RequestInput};
use axum::Router;
use axum::extract::Request;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, on};
use std::sync::Arc;

/// 已注册路由的描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub method: Method,
    pub path: String,
}

#[derive(Default)]
pub struct ApiRouter {
    router: Router,
    routes: Vec<RouteDescriptor>,
}

impl ApiRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<C: Controller>(self, path: &str, controller: C) -> Self {
        self.route(Method::GET, MethodFilter::GET, path, controller)
    }

    pub fn post<C: Controller>(self, path: &str, controller: C) -> Self {
        self.route(Method::POST, MethodFilter::POST, path, controller)
    }

    pub fn put<C: Controller>(self, path: &str, controller: C) -> Self {
        self.route(Method::PUT, MethodFilter::PUT, path, controller)
    }

    pub fn delete<C: Controller>(self, path: &str, controller: C) -> Self {
        self.route(Method::DELETE, MethodFilter::DELETE, path, controller)
    }

    pub fn patch<C: Controller>(self, path: &str, controller: C) -> Self {
        self.route(Method::PATCH, MethodFilter::PATCH, path, controller)
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn merge(mut self, other: ApiRouter) -> Self {
        self.router = self.router.merge(other.router);
        self.routes.extend(other.routes);
        self
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    fn route<C: Controller>(
        mut self,
        method: Method,
        filter: MethodFilter,
        path: &str,
        controller: C,
    ) -> Self {
        let controller = Arc::new(controller);
        let handler = move |request: Request| {
            let controller = Arc::clone(&controller);
            async move { dispatch(controller, request).await }
        };

        self.router = self.router.route(path, on(filter, handler));
        self.routes.push(RouteDescriptor {
            method,
            path: path.to_owned(),
        });
        self
    }
}

async fn dispatch<C: Controller>(controller: Arc<C>, request: Request) -> Response {
    let input = match RequestInput::from_http(request).await {
        Ok(input) => input,
        Err(err) => {
            tracing::debug!(error = %err, "malformed request");
            return err.into_response();
        }
    };

    match IncomingRequest::<C::Request>::new(input).validate_and_authorize_or_fail() {
        Ok(request) => execute(controller, request).await,
        Err(err) => {
            tracing::debug!(error = %err, "request rejected");
            err.into_response()
        }
    }
}
