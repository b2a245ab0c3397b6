//! HTTP 适配层（scaffold-http）
//!
//! 把领域层与应用层接入 axum：
//! - `validation`：声明式规则集与校验引擎
//! - `request`：请求对象，负责校验与授权
//! - `controller` / `router`：控制器执行边界与路由注册
//! - `responder`：统一的 JSON 响应
//! - `app` / `config` / `telemetry`：服务启动、配置与日志
//!
//! 典型用法：
//! 1. 为每个接口定义实现 `FormRequest` 的请求类型，声明 `rules()`；
//! 2. 实现 `Controller`，在 `handle` 中调用用例；
//! 3. 用 `ApiRouter` 绑定路由，交给 `App` 启动。
//!
pub mod app;
pub mod config;
pub mod controller;
pub mod request;
pub mod responder;
pub mod router;
pub mod telemetry;
pub mod validation;

pub use app::App;
pub use config::ServerConfig;
pub use controller::{Controller, ExecutionMode};
pub use request::{DefaultRequest, FormRequest, RequestError, ValidatedRequest};
pub use responder::ApiResponder;
pub use router::ApiRouter;
