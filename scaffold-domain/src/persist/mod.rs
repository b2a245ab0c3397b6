//! 持久化约定（persist）
//!
//! 领域层只描述实体表共享的列与建表约定，具体存储（如 Postgres）由基础设施层实现；
//! 启用 `infra-sqlx` 特性后 `BaseColumns` 可直接作为 `sqlx::FromRow` 读取。
//!
mod base_columns;

pub use base_columns::{BaseColumns, ColumnDefinition, create_table_sql, with_base_columns};
