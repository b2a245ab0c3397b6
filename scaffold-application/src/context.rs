use bon::Builder;

/// 应用层上下文（Application Context）
///
/// 承载一次用例调用所需的横切信息，例如：
/// - 关联追踪 `correlation_id`、因果链 `causation_id`；
/// - 执行者类型/ID（用于审计）；
/// - 幂等键（`idempotency_key`）：用于在基础设施层实现请求幂等（如 API 层重复提交保护）。
///
/// 典型用法：
/// ```rust
/// use scaffold_application::context::AppContext;
///
/// let ctx = AppContext::builder()
///     .correlation_id("cor-123".into())
///     .actor_type("user".into())
///     .actor_id("u-1".into())
///     .idempotency_key("idem-xyz".into())
///     .build();
/// assert_eq!(ctx.correlation_id(), Some("cor-123"));
/// assert_eq!(ctx.causation_id(), None);
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    correlation_id: Option<String>,
    causation_id: Option<String>,
    actor_type: Option<String>,
    actor_id: Option<String>,
    idempotency_key: Option<String>,
}

impl AppContext {
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub fn actor_type(&self) -> Option<&str> {
        self.actor_type.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }
}
