//! 通用持久化列（BaseColumns）
//!
//! 所有实体表共享的列：uuid 主键、创建时间、可空的更新时间与软删除时间。
//!
use crate::identifier::UniqueId;
use crate::value_object::{CreatedAt, DeletedAt, UpdatedAt};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// 实体表的公共列
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[cfg_attr(feature = "infra-sqlx", derive(sqlx::FromRow))]
pub struct BaseColumns {
    #[builder(default = uuid::Uuid::new_v4())]
    pub id: uuid::Uuid,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl BaseColumns {
    /// 新行：随机 id，创建时间为当前时间
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn unique_id(&self) -> UniqueId {
        UniqueId::from(self.id)
    }

    pub fn created_at(&self) -> CreatedAt {
        CreatedAt::from(self.created_at)
    }

    pub fn updated_at(&self) -> Option<UpdatedAt> {
        self.updated_at.map(UpdatedAt::from)
    }

    pub fn deleted_at(&self) -> Option<DeletedAt> {
        self.deleted_at.map(DeletedAt::from)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// 标记更新
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// 软删除：仅写入删除时间，重复调用保留首次时间
    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
    }
}

impl Default for BaseColumns {
    fn default() -> Self {
        Self::new()
    }
}

/// 列定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
    pub primary_key: bool,
}

impl ColumnDefinition {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            nullable: false,
            primary_key: false,
        }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

const ID: ColumnDefinition = ColumnDefinition::new("id", "uuid").primary_key();
const TIMESTAMPS: [ColumnDefinition; 3] = [
    ColumnDefinition::new("created_at", "timestamp"),
    ColumnDefinition::new("updated_at", "timestamp").nullable(),
    ColumnDefinition::new("deleted_at", "timestamp").nullable(),
];

/// 组合列：id 在最前，随后是实体列，最后是三个时间戳列；实体列中的同名公共列被忽略
pub fn with_base_columns(columns: impl IntoIterator<Item = ColumnDefinition>) -> Vec<ColumnDefinition> {
    let reserved = |c: &ColumnDefinition| c.name == ID.name || TIMESTAMPS.iter().any(|t| t.name == c.name);

    std::iter::once(ID)
        .chain(columns.into_iter().filter(|c| !reserved(c)))
        .chain(TIMESTAMPS)
        .collect()
}

/// 生成建表语句
pub fn create_table_sql(table: &str, columns: &[ColumnDefinition]) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {table} (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        let _ = write!(sql, "{} {}", column.name, column.sql_type);
        if column.primary_key {
            sql.push_str(" PRIMARY KEY");
        } else if !column.nullable {
            sql.push_str(" NOT NULL");
        }
    }
    sql.push(')');
    sql
}
