//! 声明式请求校验
//!
//! - `Constraint`：单字段约束及其失败消息；
//! - `RuleSet`：有序的字段规则集，支持嵌套对象与数组元素；
//! - `validate` / `extract_validated`：规则集解释器。
//!
mod constraint;
mod engine;
mod error;
mod rule_set;

pub use constraint::{Constraint, CustomConstraint};
pub use engine::{extract_validated, validate};
pub use error::ValidationError;
pub use rule_set::{Rule, RuleSet};
