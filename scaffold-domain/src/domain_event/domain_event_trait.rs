use crate::identifier::UniqueId;
use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt;

/// 事件发生时间
pub type Timestamp = DateTime<Utc>;

/// 领域事件需要满足的通用能力边界
///
/// 事件一经创建即不可变；两个事件当且仅当 `(event_id, event_name, aggregate_root_id)`
/// 三者相同时视为同一事件。
pub trait DomainEvent: Any + fmt::Debug + Send + Sync {
    /// 事件唯一标识
    fn event_id(&self) -> &UniqueId;

    /// 事件名称（处理器按名称订阅）
    fn event_name(&self) -> &str;

    /// 事件发生时间
    fn occurred_at(&self) -> Timestamp;

    /// 产生该事件的聚合根标识
    fn aggregate_root_id(&self) -> &UniqueId;

    /// 供处理器向下转型为具体事件类型
    fn as_any(&self) -> &dyn Any;
}

impl dyn DomainEvent {
    /// 判断是否与另一个事件为同一事件
    pub fn is_same_event(&self, other: &dyn DomainEvent) -> bool {
        self.event_id() == other.event_id()
            && self.event_name() == other.event_name()
            && self.aggregate_root_id() == other.aggregate_root_id()
    }

    /// 向下转型为具体事件类型
    pub fn downcast_ref<E: DomainEvent>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }
}
