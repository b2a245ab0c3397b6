//! 聚合根（AggregateRoot）
//!
//! 聚合根是一致性边界上的实体：在状态变更时产生领域事件并暂存，
//! 由应用层在事务完成后交给事件发布器（见 `eventing`）按聚合缓冲与分发。
//!
use crate::domain_event::{DomainEvent, PendingEvents};
use crate::entity::Entity;
use crate::identifier::UniqueId;
use std::sync::Arc;

/// 以 `UniqueId` 标识、持有待发布事件的实体
pub trait AggregateRoot: Entity<Id = UniqueId> {
    fn pending_events(&self) -> &PendingEvents;

    fn pending_events_mut(&mut self) -> &mut PendingEvents;

    /// 记录一个领域事件；同一事件重复记录时忽略
    fn raise_domain_event<E>(&mut self, event: E)
    where
        E: DomainEvent,
        Self: Sized,
    {
        let event: Arc<dyn DomainEvent> = Arc::new(event);
        if !self.pending_events_mut().push(event) {
            tracing::debug!(aggregate_root_id = %self.id(), "duplicate domain event ignored");
        }
    }

    fn clear_pending_events(&mut self) {
        self.pending_events_mut().clear();
    }

    /// 取出全部待发布事件
    fn take_pending_events(&mut self) -> Vec<Arc<dyn DomainEvent>> {
        self.pending_events_mut().take()
    }
}
