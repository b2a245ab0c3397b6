use super::domain_event_trait::{DomainEvent, Timestamp};
use crate::identifier::UniqueId;
use bon::Builder;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// 通用的不可变事件记录，载荷以 JSON 表示
///
/// 适用于无需定义专门事件类型的场景（例如集成事件转发、测试）。
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEventRecord {
    #[builder(default)]
    id: UniqueId,
    #[builder(into)]
    name: String,
    #[builder(default = Utc::now())]
    occurred_at: Timestamp,
    aggregate_root_id: UniqueId,
    #[builder(default)]
    payload: serde_json::Value,
}

impl DomainEventRecord {
    /// 以新标识与当前时间创建空载荷事件
    pub fn new(name: impl Into<String>, aggregate_root_id: UniqueId) -> Self {
        Self::builder()
            .name(name)
            .aggregate_root_id(aggregate_root_id)
            .build()
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

impl DomainEvent for DomainEventRecord {
    fn event_id(&self) -> &UniqueId {
        &self.id
    }

    fn event_name(&self) -> &str {
        &self.name
    }

    fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    fn aggregate_root_id(&self) -> &UniqueId {
        &self.aggregate_root_id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
