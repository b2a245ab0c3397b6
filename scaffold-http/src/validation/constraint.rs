//! 字段约束（Constraint）
//!
//! 每个约束对单个字段的 JSON 值给出通过/失败判断与失败消息；
//! 值缺失用 `None` 表示，与显式 `null` 区分。
//!
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use scaffold_domain::identifier::is_uuid;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, LazyLock};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("valid email pattern")
});

type Predicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

/// 自定义约束：名称、消息模板（`{field}` 会被替换为字段名）与判断函数
#[derive(Clone)]
pub struct CustomConstraint {
    name: String,
    message: String,
    predicate: Predicate,
}

#[derive(Clone)]
pub enum Constraint {
    /// 值缺失或为 null 时跳过该字段的其余约束
    IsOptional,
    IsDefined,
    IsString,
    IsNotEmpty,
    IsEmail,
    IsNumber,
    IsInt,
    IsBoolean,
    IsArray,
    ArrayNotEmpty,
    IsObject,
    IsUuid,
    IsDateString,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Matches(Regex),
    IsIn(Vec<Value>),
    Custom(CustomConstraint),
}

impl Constraint {
    /// 以正则表达式构造 `Matches`
    pub fn matches(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Constraint::Matches)
    }

    pub fn is_in<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Constraint::IsIn(values.into_iter().map(Into::into).collect())
    }

    pub fn custom<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Constraint::Custom(CustomConstraint {
            name: name.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Constraint::IsOptional => "isOptional",
            Constraint::IsDefined => "isDefined",
            Constraint::IsString => "isString",
            Constraint::IsNotEmpty => "isNotEmpty",
            Constraint::IsEmail => "isEmail",
            Constraint::IsNumber => "isNumber",
            Constraint::IsInt => "isInt",
            Constraint::IsBoolean => "isBoolean",
            Constraint::IsArray => "isArray",
            Constraint::ArrayNotEmpty => "arrayNotEmpty",
            Constraint::IsObject => "isObject",
            Constraint::IsUuid => "isUuid",
            Constraint::IsDateString => "isDateString",
            Constraint::MinLength(_) => "minLength",
            Constraint::MaxLength(_) => "maxLength",
            Constraint::Min(_) => "min",
            Constraint::Max(_) => "max",
            Constraint::Matches(_) => "matches",
            Constraint::IsIn(_) => "isIn",
            Constraint::Custom(c) => &c.name,
        }
    }

    /// 判断值是否满足约束
    pub fn check(&self, value: Option<&Value>) -> bool {
        match self {
            Constraint::IsOptional => true,
            Constraint::IsDefined => !is_absent(value),
            Constraint::IsString => as_str(value).is_some(),
            Constraint::IsNotEmpty => !is_absent(value) && as_str(value) != Some(""),
            Constraint::IsEmail => as_str(value).is_some_and(|s| EMAIL.is_match(s)),
            Constraint::IsNumber => matches!(value, Some(Value::Number(_))),
            Constraint::IsInt => matches!(value, Some(Value::Number(n)) if n.is_i64()
                || n.is_u64()
                || n.as_f64().is_some_and(|f| f.fract() == 0.0)),
            Constraint::IsBoolean => matches!(value, Some(Value::Bool(_))),
            Constraint::IsArray => matches!(value, Some(Value::Array(_))),
            Constraint::ArrayNotEmpty => matches!(value, Some(Value::Array(a)) if !a.is_empty()),
            Constraint::IsObject => matches!(value, Some(Value::Object(_))),
            Constraint::IsUuid => as_str(value).is_some_and(is_uuid),
            Constraint::IsDateString => as_str(value).is_some_and(is_iso8601),
            Constraint::MinLength(min) => as_str(value).is_some_and(|s| s.chars().count() >= *min),
            Constraint::MaxLength(max) => as_str(value).is_some_and(|s| s.chars().count() <= *max),
            Constraint::Min(min) => as_f64(value).is_some_and(|n| n >= *min),
            Constraint::Max(max) => as_f64(value).is_some_and(|n| n <= *max),
            Constraint::Matches(re) => as_str(value).is_some_and(|s| re.is_match(s)),
            Constraint::IsIn(allowed) => value.is_some_and(|v| allowed.contains(v)),
            Constraint::Custom(c) => (c.predicate)(value),
        }
    }

    /// 失败消息（`field` 为属性名）
    pub fn message(&self, field: &str) -> String {
        match self {
            Constraint::IsOptional => String::new(),
            Constraint::IsDefined => format!("{field} should not be null or undefined"),
            Constraint::IsString => format!("{field} must be a string"),
            Constraint::IsNotEmpty | Constraint::ArrayNotEmpty => {
                format!("{field} should not be empty")
            }
            Constraint::IsEmail => format!("{field} must be an email"),
            Constraint::IsNumber => {
                format!("{field} must be a number conforming to the specified constraints")
            }
            Constraint::IsInt => format!("{field} must be an integer number"),
            Constraint::IsBoolean => format!("{field} must be a boolean value"),
            Constraint::IsArray => format!("{field} must be an array"),
            Constraint::IsObject => format!("{field} must be an object"),
            Constraint::IsUuid => format!("{field} must be a UUID"),
            Constraint::IsDateString => format!("{field} must be a valid ISO 8601 date string"),
            Constraint::MinLength(min) => {
                format!("{field} must be longer than or equal to {min} characters")
            }
            Constraint::MaxLength(max) => {
                format!("{field} must be shorter than or equal to {max} characters")
            }
            Constraint::Min(min) => format!("{field} must not be less than {min}"),
            Constraint::Max(max) => format!("{field} must not be greater than {max}"),
            Constraint::Matches(re) => {
                format!("{field} must match {} regular expression", re.as_str())
            }
            Constraint::IsIn(allowed) => format!(
                "{field} must be one of the following values: {}",
                allowed.iter().map(display_value).collect::<Vec<_>>().join(", ")
            ),
            Constraint::Custom(c) => c.message.replace("{field}", field),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MinLength(n) | Constraint::MaxLength(n) => {
                write!(f, "{}({n})", self.name())
            }
            Constraint::Min(n) | Constraint::Max(n) => write!(f, "{}({n})", self.name()),
            Constraint::Matches(re) => write!(f, "matches({})", re.as_str()),
            _ => f.write_str(self.name()),
        }
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn as_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

fn as_f64(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

fn is_iso8601(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
