//! 领域事件发布器协议（DomainEventPublisher）
//!
//! 发布器按聚合根标识缓冲事件，由调用方显式触发分发：
//! - `publish`：同步入队，同一事件重复发布视为 no-op；
//! - `register_handler`：按事件名称登记处理器（追加，不去重）；
//! - `dispatch_*`：并发调用处理器，全部成功后才清理已分发的事件。
//!
use crate::aggregate_root::AggregateRoot;
use crate::domain_event::DomainEvent;
use crate::error::DomainResult;
use crate::eventing::DomainEventHandler;
use crate::identifier::UniqueId;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait DomainEventPublisher: Send + Sync {
    /// 将事件加入聚合的缓冲区（若已存在同一事件则忽略）
    fn publish(&self, aggregate_root_id: &UniqueId, event: Arc<dyn DomainEvent>);

    /// 按顺序发布多个事件
    fn publish_many(&self, aggregate_root_id: &UniqueId, events: Vec<Arc<dyn DomainEvent>>) {
        for event in events {
            self.publish(aggregate_root_id, event);
        }
    }

    /// 为事件名称登记处理器
    fn register_handler(&self, handler: Arc<dyn DomainEventHandler>, event_name: &str);

    /// 聚合当前缓冲事件的快照（按发布顺序）
    fn aggregate_root_events(&self, aggregate_root_id: &UniqueId) -> Vec<Arc<dyn DomainEvent>>;

    /// 分发聚合的全部缓冲事件
    async fn dispatch_aggregate_root_events(&self, aggregate_root_id: &UniqueId) -> DomainResult<()>;

    /// 仅分发指定名称的事件；成功后清理该聚合的整个缓冲区
    async fn dispatch_aggregate_root_event_by_name(
        &self,
        aggregate_root_id: &UniqueId,
        event_name: &str,
    ) -> DomainResult<()>;

    /// 无条件清空聚合的缓冲区
    fn clear_aggregate_root_events(&self, aggregate_root_id: &UniqueId);
}

/// 将聚合根的待发布事件移交给发布器，返回移交数量
pub fn publish_pending_events<A>(aggregate: &mut A, publisher: &dyn DomainEventPublisher) -> usize
where
    A: AggregateRoot,
{
    let events = aggregate.take_pending_events();
    let count = events.len();
    let aggregate_root_id = aggregate.id().clone();
    publisher.publish_many(&aggregate_root_id, events);
    count
}
