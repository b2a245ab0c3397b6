//! 内存版领域事件发布器（InMemoryDomainEventPublisher）
//!
//! - 缓冲区按聚合根标识分道（lane），惰性创建；
//! - 同一聚合的缓冲区修改由道内互斥锁保护，同一聚合的分发彼此串行，
//!   保证一个事件在未重新发布前不会被处理两次；
//! - 分发期间新发布的事件保留在缓冲区，留待下一次分发；
//! - 处理器并发执行，任一失败即返回错误（fail-fast），此时缓冲区不清理。
//!
//! 注意：不得在处理器内部分发同一聚合（会因串行锁而死锁）；处理器没有超时控制。

use crate::domain_event::DomainEvent;
use crate::error::{DomainError, DomainResult};
use crate::eventing::{DomainEventHandler, DomainEventPublisher};
use crate::identifier::UniqueId;
use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::future::try_join_all;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// 单个聚合的事件缓冲与分发锁
#[derive(Default)]
struct AggregateLane {
    pending: Mutex<Vec<Arc<dyn DomainEvent>>>,
    dispatching: tokio::sync::Mutex<()>,
}

impl AggregateLane {
    fn events(&self) -> MutexGuard<'_, Vec<Arc<dyn DomainEvent>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: Arc<dyn DomainEvent>) -> bool {
        let mut events = self.events();
        if events.iter().any(|e| e.is_same_event(event.as_ref())) {
            return false;
        }
        events.push(event);
        true
    }

    fn snapshot(&self) -> Vec<Arc<dyn DomainEvent>> {
        self.events().clone()
    }

    /// 移除已分发的事件，保留分发期间新发布的事件
    fn remove(&self, dispatched: &[Arc<dyn DomainEvent>]) {
        self.events()
            .retain(|e| !dispatched.iter().any(|d| d.is_same_event(e.as_ref())));
    }

    fn clear(&self) {
        self.events().clear();
    }

    fn is_idle(&self) -> bool {
        self.events().is_empty() && self.dispatching.try_lock().is_ok()
    }
}

/// 内存版发布器，既可注入使用，也可通过 `global()` 获取进程级实例
#[derive(Default)]
pub struct InMemoryDomainEventPublisher {
    lanes: DashMap<UniqueId, Arc<AggregateLane>>,
    handlers: DashMap<String, Vec<Arc<dyn DomainEventHandler>>>,
}

impl InMemoryDomainEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程级共享实例（惰性创建）
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<InMemoryDomainEventPublisher>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// 指定事件名称已登记的处理器数量
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers.get(event_name).map(|h| h.len()).unwrap_or(0)
    }

    /// 清空所有聚合的缓冲区（用于测试隔离），处理器登记保持不变
    pub fn clear_all(&self) {
        self.lanes.clear();
    }

    /// 清空处理器登记（用于测试隔离）
    pub fn clear_handlers(&self) {
        self.handlers.clear();
    }

    fn lane(&self, aggregate_root_id: &UniqueId) -> Option<Arc<AggregateLane>> {
        self.lanes.get(aggregate_root_id).map(|lane| Arc::clone(lane.value()))
    }

    fn handlers_for(&self, event_name: &str) -> Vec<Arc<dyn DomainEventHandler>> {
        self.handlers
            .get(event_name)
            .map(|h| h.value().clone())
            .unwrap_or_default()
    }

    async fn dispatch(&self, aggregate_root_id: &UniqueId, only: Option<&str>) -> DomainResult<()> {
        let Some(lane) = self.lane(aggregate_root_id) else {
            return Ok(());
        };

        let result = self.dispatch_lane(aggregate_root_id, &lane, only).await;
        // 串行锁已释放；空闲的道立即回收，map 只保留仍有待分发事件的聚合
        self.lanes.remove_if(aggregate_root_id, |_, lane| lane.is_idle());
        result
    }

    async fn dispatch_lane(
        &self,
        aggregate_root_id: &UniqueId,
        lane: &AggregateLane,
        only: Option<&str>,
    ) -> DomainResult<()> {
        let _serial = lane.dispatching.lock().await;
        let snapshot = lane.snapshot();
        if snapshot.is_empty() {
            return Ok(());
        }

        let invocations = snapshot
            .iter()
            .filter(|event| only.is_none_or(|name| event.event_name() == name))
            .flat_map(|event| {
                self.handlers_for(event.event_name())
                    .into_iter()
                    .map(move |handler| (handler, Arc::clone(event)))
            })
            .map(|(handler, event)| async move {
                handler.handle(Arc::clone(&event)).await.map_err(|err| {
                    tracing::warn!(
                        handler = handler.handler_name(),
                        event = event.event_name(),
                        aggregate_root_id = %event.aggregate_root_id(),
                        error = %err,
                        "domain event handler failed"
                    );
                    DomainError::EventHandler {
                        handler: handler.handler_name().to_string(),
                        event: event.event_name().to_string(),
                        reason: err.to_string(),
                    }
                })
            });

        let handled = try_join_all(invocations).await?.len();
        lane.remove(&snapshot);

        tracing::debug!(
            %aggregate_root_id,
            events = snapshot.len(),
            handled,
            "dispatched aggregate root events"
        );
        Ok(())
    }
}

#[async_trait]
impl DomainEventPublisher for InMemoryDomainEventPublisher {
    fn publish(&self, aggregate_root_id: &UniqueId, event: Arc<dyn DomainEvent>) {
        // 持有分片写锁完成入队，避免与 clear 中的回收竞争
        let lane = self.lanes.entry(aggregate_root_id.clone()).or_default();
        if lane.push(Arc::clone(&event)) {
            tracing::debug!(
                %aggregate_root_id,
                event = event.event_name(),
                "domain event published"
            );
        }
    }

    fn register_handler(&self, handler: Arc<dyn DomainEventHandler>, event_name: &str) {
        tracing::debug!(
            handler = handler.handler_name(),
            event = event_name,
            "domain event handler registered"
        );
        self.handlers
            .entry(event_name.to_string())
            .or_default()
            .push(handler);
    }

    fn aggregate_root_events(&self, aggregate_root_id: &UniqueId) -> Vec<Arc<dyn DomainEvent>> {
        self.lane(aggregate_root_id)
            .map(|lane| lane.snapshot())
            .unwrap_or_default()
    }

    async fn dispatch_aggregate_root_events(&self, aggregate_root_id: &UniqueId) -> DomainResult<()> {
        self.dispatch(aggregate_root_id, None).await
    }

    async fn dispatch_aggregate_root_event_by_name(
        &self,
        aggregate_root_id: &UniqueId,
        event_name: &str,
    ) -> DomainResult<()> {
        self.dispatch(aggregate_root_id, Some(event_name)).await
    }

    fn clear_aggregate_root_events(&self, aggregate_root_id: &UniqueId) {
        if let Some(lane) = self.lane(aggregate_root_id) {
            lane.clear();
        }
        self.lanes.remove_if(aggregate_root_id, |_, lane| lane.is_idle());
    }
}
