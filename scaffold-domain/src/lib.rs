//! DDD 领域层脚手架（scaffold-domain）
//!
//! 提供以 DDD 为中心的通用构件，用于在 Web API 中实现：
//! - 结果包装（`outcome`）：`Either` 与带一致性校验的 `OperationResult`
//! - 标识（`identifier`）、值对象（`value_object`）与业务规则（`business_rule`）
//! - 实体（`entity`）与聚合根（`aggregate_root`）建模
//! - 领域事件（`domain_event`）与进程内事件发布器（`eventing`）
//! - 实体表的公共列约定（`persist`）
//!
//! 典型用法：
//! 1. 使用 `#[entity(aggregate_root)]` 定义聚合根，使用 `#[domain_event]` 定义事件；
//! 2. 聚合在状态变更时 `raise_domain_event`；
//! 3. 应用层通过 `publish_pending_events` 将事件交给发布器；
//! 4. 在事务提交后调用 `dispatch_aggregate_root_events` 通知处理器。
//!
pub mod aggregate_root;
pub mod business_rule;
pub mod domain_event;
pub mod entity;
pub mod error;
#[cfg(feature = "eventing")]
pub mod eventing;
pub mod identifier;
pub mod outcome;
pub mod persist;
pub mod value_object;

// 允许在本 crate 内部通过 ::scaffold_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::scaffold_domain 路径。
extern crate self as scaffold_domain;
