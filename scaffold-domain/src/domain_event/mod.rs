//! 领域事件（Domain Event）与事件集合
//!
//! 定义事件需要实现的最小接口（`DomainEvent`）、通用事件记录 `DomainEventRecord`，
//! 以及聚合根暂存未发布事件的 `PendingEvents`。

mod domain_event_trait;
mod event_record;
mod pending_events;

pub use domain_event_trait::{DomainEvent, Timestamp};
pub use event_record::DomainEventRecord;
pub use pending_events::PendingEvents;

/// 当前时间（供 `#[domain_event]` 生成的构造函数使用）
#[doc(hidden)]
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
