//! 映射器（Mapper）
//!
//! 在领域实体、持久化记录与对外 DTO 三种形态之间转换。
//!
use crate::dto::Dto;
use scaffold_domain::entity::Entity;
use scaffold_domain::error::DomainResult;

pub trait Mapper<E: Entity>: Send + Sync {
    /// 持久化记录类型
    type Persistence;
    /// 对外输出类型
    type Dto: Dto;

    fn to_persistence(&self, entity: &E) -> Self::Persistence;

    /// 由持久化记录重建实体；记录不满足领域约束时返回错误
    fn to_domain(&self, persistence: Self::Persistence) -> DomainResult<E>;

    fn to_dto(&self, entity: &E) -> Self::Dto;
}
