//! 业务规则（Business Rule）
//!
//! 以对象表达一条领域不变量，由实体在状态变更前调用 `check_business_rule` 校验。
//!
use crate::value_object::DateTimeValue;

/// 一条可被检查的业务规则
pub trait BusinessRule: Send + Sync {
    /// 规则被破坏时的提示信息
    fn message(&self) -> String;

    /// 规则是否被破坏
    fn is_broken(&self) -> bool;
}

/// 日期与时间必须组成合法时间点
pub struct DateTimeRule {
    date: String,
    time: String,
}

impl DateTimeRule {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

impl BusinessRule for DateTimeRule {
    fn message(&self) -> String {
        format!("invalid date time: {} {}", self.date, self.time)
    }

    fn is_broken(&self) -> bool {
        !DateTimeValue::is_valid(&self.date, &self.time)
    }
}
