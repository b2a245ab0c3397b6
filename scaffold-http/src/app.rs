//! 服务启动
//!
//! `App` 汇总路由，挂载默认中间件（CORS、安全响应头、gzip 压缩、HTTP 日志），
//! 执行启动前初始化后开始监听。
//!
use crate::config::ServerConfig;
use crate::router::ApiRouter;
use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use futures_util::future::BoxFuture;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

type Initializer = Box<dyn FnOnce() -> BoxFuture<'static, anyhow::Result<()>> + Send>;

const SECURITY_HEADERS: [(HeaderName, &str); 5] = [
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'self'; style-src 'self'",
    ),
    (
        header::STRICT_TRANSPORT_SECURITY,
        "max-age=31536000; includeSubDomains; preload",
    ),
    (header::REFERRER_POLICY, "origin"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_XSS_PROTECTION, "0"),
];

pub struct App {
    config: ServerConfig,
    router: ApiRouter,
    initializer: Option<Initializer>,
}

impl App {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: ApiRouter::new(),
            initializer: None,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn register_routes(mut self, routers: impl IntoIterator<Item = ApiRouter>) -> Self {
        self.router = routers
            .into_iter()
            .fold(self.router, |acc, router| acc.merge(router));
        self
    }

    /// 监听前执行的异步初始化（例如注册事件处理器、建立连接池）
    pub fn before_start<F, Fut>(mut self, initializer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.initializer = Some(Box::new(move || Box::pin(initializer())));
        self
    }

    /// 挂载默认中间件后的 axum 路由
    pub fn into_router(self) -> Router {
        let router = SECURITY_HEADERS
            .into_iter()
            .fold(self.router.into_router(), |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::if_not_present(
                    name,
                    HeaderValue::from_static(value),
                ))
            });

        router
            .layer(CompressionLayer::new())
            .layer(cors_layer(&self.config))
            .layer(TraceLayer::new_for_http())
    }

    /// 执行初始化并在 `0.0.0.0:port` 上监听
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// 在给定监听器上提供服务
    pub async fn serve(mut self, listener: TcpListener) -> anyhow::Result<()> {
        if let Some(initializer) = self.initializer.take() {
            initializer().await?;
        }

        tracing::info!(
            addr = %listener.local_addr()?,
            environment = ?self.config.environment,
            "server listening"
        );
        axum::serve(listener, self.into_router()).await?;
        Ok(())
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("lang"),
        ])
}
