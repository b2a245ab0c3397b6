//! 标识（Identifier）
//!
//! 对字符串（须为 UUIDv4）或数值（须大于 0）的类型化包装。
//! 相同具体类型且值相等的两个标识视为相等；不同具体类型在编译期即不可比较。
//!
use crate::error::{DomainError, DomainResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static UUID_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("valid uuid v4 pattern")
});

/// 判断字符串是否为带连字符的 UUIDv4（大小写不敏感）
pub fn is_uuid(value: &str) -> bool {
    UUID_V4.is_match(value)
}

/// 可作为标识底层值的类型
pub trait IdentifierValue:
    Clone + fmt::Debug + fmt::Display + PartialEq + Eq + std::hash::Hash + Send + Sync + 'static
{
    /// 值是否满足标识格式
    fn is_valid_identifier(&self) -> bool;

    /// 是否为“空”值（空串或 0）
    fn is_empty_identifier(&self) -> bool;
}

impl IdentifierValue for String {
    fn is_valid_identifier(&self) -> bool {
        is_uuid(self)
    }

    fn is_empty_identifier(&self) -> bool {
        self.is_empty()
    }
}

impl IdentifierValue for i64 {
    fn is_valid_identifier(&self) -> bool {
        *self > 0
    }

    fn is_empty_identifier(&self) -> bool {
        *self == 0
    }
}

/// 类型化标识
///
/// 反序列化同样经过 `Identifier::new` 校验。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier<V: IdentifierValue> {
    value: V,
}

impl<V: IdentifierValue> Identifier<V> {
    /// 校验后创建
    pub fn new(value: V) -> DomainResult<Self> {
        if !value.is_valid_identifier() {
            return Err(DomainError::InvalidIdentifier(value.to_string()));
        }
        Ok(Self { value })
    }

    /// 跳过校验创建（仅用于可信来源，例如数据库回读）
    pub fn new_unchecked(value: V) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty_identifier()
    }
}

impl TryFrom<String> for Identifier<String> {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Identifier<i64> {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de, V: IdentifierValue + Deserialize<'de>> Deserialize<'de> for Identifier<V> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = V::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl<V: IdentifierValue + Serialize> Serialize for Identifier<V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<V: IdentifierValue> fmt::Display for Identifier<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// 实体与事件使用的 UUIDv4 标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UniqueId(Identifier<String>);

impl UniqueId {
    /// 生成新的随机标识
    pub fn generate() -> Self {
        Self(Identifier::new_unchecked(uuid::Uuid::new_v4().to_string()))
    }

    /// 解析并校验给定字符串
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        Identifier::new(value.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.value()
    }

    pub fn as_uuid(&self) -> DomainResult<uuid::Uuid> {
        Ok(uuid::Uuid::parse_str(self.as_str())?)
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 默认值为新生成的标识
impl Default for UniqueId {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::str::FromStr for UniqueId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UniqueId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UniqueId> for String {
    fn from(id: UniqueId) -> Self {
        id.0.into_value()
    }
}

impl From<uuid::Uuid> for UniqueId {
    fn from(value: uuid::Uuid) -> Self {
        Self(Identifier::new_unchecked(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_v4_uuid_in_any_case() {
        assert!(is_uuid("3f2504e0-4f89-41d3-9a0c-0305e82c3301"));
        assert!(is_uuid("3F2504E0-4F89-41D3-9A0C-0305E82C3301"));
    }

    #[test]
    fn rejects_malformed_uuid() {
        assert!(!is_uuid("3f2504e0"));
        assert!(!is_uuid(" "));
        assert!(!is_uuid("3f2504e0-4f89-41d3-9a0c-0305e82c3301x"));
        // version 1
        assert!(!is_uuid("3f2504e0-4f89-11d3-9a0c-0305e82c3301"));
        // 无连字符形式
        assert!(!is_uuid("3f2504e04f8941d39a0c0305e82c3301"));
    }

    #[test]
    fn numeric_identifier_must_be_positive() {
        assert!(Identifier::new(1_i64).is_ok());
        assert!(matches!(
            Identifier::new(0_i64),
            Err(DomainError::InvalidIdentifier(_))
        ));
        assert!(Identifier::new(-5_i64).is_err());
    }

    #[test]
    fn empty_string_identifier_is_invalid() {
        assert!(Identifier::new(String::new()).is_err());
        assert!(Identifier::new_unchecked(String::new()).is_empty());
    }

    #[test]
    fn identifiers_compare_by_value() {
        let a = Identifier::new(42_i64).unwrap();
        let b = Identifier::new(42_i64).unwrap();
        let c = Identifier::new(43_i64).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "42");
    }

    #[test]
    fn unique_id_generate_is_valid_and_distinct() {
        let a = UniqueId::generate();
        let b = UniqueId::generate();
        assert!(is_uuid(a.as_str()));
        assert_ne!(a, b);
        assert_eq!(a.as_uuid().unwrap().to_string(), a.as_str());
    }

    #[test]
    fn short_hex_is_not_an_identifier() {
        assert!(Identifier::new("3f2504e0".to_string()).is_err());
        assert!(matches!(
            UniqueId::new("3f2504e0"),
            Err(DomainError::InvalidIdentifier(value)) if value == "3f2504e0"
        ));

        let uuid = "3f2504e0-4f89-41d3-9a0c-0305e82c3301";
        assert_eq!(
            Identifier::new(uuid.to_string()).unwrap(),
            Identifier::new(uuid.to_string()).unwrap()
        );
    }

    // 反序列化与 `new` 使用同一套校验
    #[test]
    fn deserialize_rejects_invalid_identifiers() {
        assert!(serde_json::from_str::<Identifier<i64>>("0").is_err());
        assert!(serde_json::from_str::<Identifier<i64>>("-1").is_err());
        assert!(serde_json::from_str::<Identifier<String>>("\"3f2504e0\"").is_err());

        let id: Identifier<i64> = serde_json::from_str("7").unwrap();
        assert_eq!(id.value(), &7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let uuid = "\"3f2504e0-4f89-41d3-9a0c-0305e82c3301\"";
        let id: Identifier<String> = serde_json::from_str(uuid).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), uuid);
    }

    #[test]
    fn unique_id_serde_as_plain_string() {
        let id = UniqueId::new("3f2504e0-4f89-41d3-9a0c-0305e82c3301").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3f2504e0-4f89-41d3-9a0c-0305e82c3301\"");

        let back: UniqueId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<UniqueId>("\"not-a-uuid\"").is_err());
    }
}
