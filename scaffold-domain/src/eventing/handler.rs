//! 领域事件处理器（DomainEventHandler）
//!
//! 定义消费某一名称事件的处理逻辑；处理器在发布器上按事件名称注册，
//! 分发时才按名称查找（晚绑定），因此注册顺序与事件发布先后无关。
//!
use crate::domain_event::DomainEvent;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// 事件处理器：处理某一名称的领域事件
#[async_trait]
pub trait DomainEventHandler: Send + Sync {
    /// 处理器名称（用于失败定位与日志）
    fn handler_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// 处理事件；返回错误会使本次分发失败且缓冲区保留
    async fn handle(&self, event: Arc<dyn DomainEvent>) -> anyhow::Result<()>;
}

/// 以闭包实现的处理器
pub struct FnHandler<F> {
    name: String,
    f: F,
}

/// 使用闭包快速构造处理器
///
/// ```
/// use scaffold_domain::eventing::handler_fn;
///
/// let handler = handler_fn("audit", |event| async move {
///     println!("{}", event.event_name());
///     Ok(())
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(name: impl Into<String>, f: F) -> Arc<FnHandler<F>>
where
    F: Fn(Arc<dyn DomainEvent>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(FnHandler {
        name: name.into(),
        f,
    })
}

#[async_trait]
impl<F, Fut> DomainEventHandler for FnHandler<F>
where
    F: Fn(Arc<dyn DomainEvent>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn handler_name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: Arc<dyn DomainEvent>) -> anyhow::Result<()> {
        (self.f)(event).await
    }
}
