//! 实体（Entity）基础抽象
//!
//! 为实体与聚合提供统一的标识（Id）、时间戳（创建/更新/软删除）与业务规则校验能力。
//!
use crate::business_rule::BusinessRule;
use crate::error::{DomainError, DomainResult};
use crate::value_object::{CreatedAt, DeletedAt, UpdatedAt};
use std::fmt::Display;

/// 具备唯一标识与时间戳的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可显示、可比较与可克隆
    type Id: Clone + Display + PartialEq;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    fn created_at(&self) -> Option<&CreatedAt>;

    fn updated_at(&self) -> Option<&UpdatedAt>;

    fn deleted_at(&self) -> Option<&DeletedAt>;

    /// 是否已被软删除
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// 校验业务规则，被破坏时返回 `BusinessRuleBroken`
    fn check_business_rule(&self, rule: &dyn BusinessRule) -> DomainResult<()> {
        if rule.is_broken() {
            return Err(DomainError::BusinessRuleBroken {
                message: rule.message(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business_rule::DateTimeRule;
    use crate::identifier::UniqueId;
    use scaffold_macros::entity;

    #[entity]
    #[derive(Clone, Default)]
    struct Booking {
        room: String,
    }

    #[test]
    fn generated_entity_exposes_id_and_timestamps() {
        let id = UniqueId::generate();
        let booking = Booking {
            id: id.clone(),
            room: "A-101".into(),
            created_at: Some(CreatedAt::now()),
            ..Default::default()
        };

        assert_eq!(booking.id(), &id);
        assert!(booking.created_at().is_some());
        assert!(booking.updated_at().is_none());
        assert!(!booking.is_deleted());
        assert_eq!(booking.room, "A-101");
    }

    #[test]
    fn soft_deleted_when_deleted_at_present() {
        let booking = Booking {
            deleted_at: Some(DeletedAt::now()),
            ..Default::default()
        };
        assert!(booking.is_deleted());
    }

    #[test]
    fn broken_rule_surfaces_message() {
        let booking = Booking::default();
        assert!(booking
            .check_business_rule(&DateTimeRule::new("2023-10-05", "10:00:00"))
            .is_ok());

        let err = booking
            .check_business_rule(&DateTimeRule::new("2023-13-01", "10:00:00"))
            .unwrap_err();
        match err {
            DomainError::BusinessRuleBroken { message } => {
                assert_eq!(message, "invalid date time: 2023-13-01 10:00:00")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
