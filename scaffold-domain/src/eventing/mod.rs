//! 事件子系统（eventing）
//!
//! 提供进程内领域事件的发布与处理：
//! - `DomainEventPublisher`：按聚合缓冲、显式分发的发布器协议；
//! - `InMemoryDomainEventPublisher`：内存实现，同一聚合的分发串行、处理器并发；
//! - `DomainEventHandler`：按事件名称登记的处理器。
//!
//! 事件仅保存在内存中，不提供持久化、重试或跨进程投递。
//!
pub mod handler;
pub mod publisher;
pub mod publisher_inmemory;

pub use handler::{DomainEventHandler, FnHandler, handler_fn};
pub use publisher::{DomainEventPublisher, publish_pending_events};
pub use publisher_inmemory::InMemoryDomainEventPublisher;
