//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!
use crate::error::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

static DATE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));
static TIME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").expect("valid time pattern"));

/// 秒级精度的 UTC 时间点，对外以 `YYYY-MM-DD` + `HH:mm:ss` 两段呈现
///
/// # 示例
///
/// ```
/// use scaffold_domain::value_object::DateTimeValue;
///
/// let dt = DateTimeValue::create("2024-02-29", "23:59:01").unwrap();
/// assert_eq!(dt.date(), "2024-02-29");
/// assert_eq!(dt.time(), "23:59:01");
/// assert!(DateTimeValue::create("2023-02-29", "00:00:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateTimeValue(DateTime<Utc>);

impl DateTimeValue {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// 由日期与时间字符串创建；格式错误或不存在的日期/时间均失败
    pub fn create(date: &str, time: &str) -> DomainResult<Self> {
        if !DATE_FORMAT.is_match(date) || !TIME_FORMAT.is_match(time) {
            return Err(DomainError::InvalidValue {
                reason: format!("invalid date/time: {date} {time}"),
            });
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
        let time = NaiveTime::parse_from_str(time, "%H:%M:%S")?;
        Ok(Self(NaiveDateTime::new(date, time).and_utc()))
    }

    /// 判断日期与时间字符串能否组成合法时间点
    pub fn is_valid(date: &str, time: &str) -> bool {
        Self::create(date, time).is_ok()
    }

    pub fn date(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    pub fn time(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for DateTimeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(0))
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date(), self.time())
    }
}

impl ValueObject for DateTimeValue {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.timestamp_subsec_nanos() != 0 {
            return Err(DomainError::InvalidValue {
                reason: "date time must have second precision".to_string(),
            });
        }
        Ok(())
    }
}

macro_rules! timestamp_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(DateTimeValue);

        impl $name {
            pub fn now() -> Self {
                Self(DateTimeValue::now())
            }

            pub fn value(&self) -> DateTimeValue {
                self.0
            }
        }

        impl From<DateTimeValue> for $name {
            fn from(value: DateTimeValue) -> Self {
                Self(value)
            }
        }

        impl From<DateTime<Utc>> for $name {
            fn from(value: DateTime<Utc>) -> Self {
                Self(DateTimeValue::from(value))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

timestamp_value!(
    /// 创建时间
    CreatedAt
);
timestamp_value!(
    /// 最后更新时间
    UpdatedAt
);
timestamp_value!(
    /// 软删除时间
    DeletedAt
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn create_splits_into_date_and_time() {
        let dt = DateTimeValue::create("2023-10-05", "08:30:00").unwrap();
        assert_eq!(dt.date(), "2023-10-05");
        assert_eq!(dt.time(), "08:30:00");
        assert_eq!(dt.to_string(), "2023-10-05 08:30:00");
    }

    #[test]
    fn create_rejects_malformed_input() {
        assert!(DateTimeValue::create("2023-1-05", "08:30:00").is_err());
        assert!(DateTimeValue::create("2023-10-05", "8:30").is_err());
        assert!(DateTimeValue::create("", "").is_err());
    }

    #[test]
    fn create_rejects_impossible_dates() {
        assert!(!DateTimeValue::is_valid("2023-02-30", "00:00:00"));
        assert!(!DateTimeValue::is_valid("2023-10-05", "25:00:00"));
        assert!(DateTimeValue::is_valid("2024-02-29", "00:00:00"));
    }

    #[test]
    fn from_datetime_truncates_to_seconds() {
        let raw = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::milliseconds(789);
        let dt = DateTimeValue::from(raw);
        assert_eq!(dt.time(), "03:04:05");
        assert!(dt.validate().is_ok());
    }

    #[test]
    fn timestamps_compare_by_value() {
        let base = DateTimeValue::create("2023-10-05", "08:30:00").unwrap();
        assert_eq!(CreatedAt::from(base), CreatedAt::from(base));
        assert_eq!(UpdatedAt::from(base).value(), base);
        assert!(DeletedAt::now().value() >= base);
    }

    #[test]
    fn serde_is_transparent() {
        let dt = DateTimeValue::create("2023-10-05", "08:30:00").unwrap();
        let json = serde_json::to_string(&CreatedAt::from(dt)).unwrap();
        assert_eq!(json, "\"2023-10-05T08:30:00Z\"");
    }
}
