//! 日期类型模块
//!
//! 题目完成日期只关心日历日，不涉及时区与时刻：
//! - 传输格式为 ISO 8601 日期 `YYYY-MM-DD`
//! - 内部使用 `chrono::NaiveDate`

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;

/// 传输与表单使用的日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =========================================================
// CompletedDate - 完成日期
// =========================================================

/// 题目完成日期
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompletedDate(NaiveDate);

impl CompletedDate {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 本地时区的今天
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// 解析 `YYYY-MM-DD`
    ///
    /// 返回 None 如果格式不合法或日期不存在 (如 2月30日)
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .ok()
            .map(Self)
    }

    #[inline]
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl Display for CompletedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CompletedDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map(Self)
    }
}

impl From<NaiveDate> for CompletedDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CompletedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CompletedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // 后端偶尔会返回完整的 ISO 时间戳，只取日期部分
        let day = raw.get(..10).unwrap_or(raw.as_str());
        day.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calendar_dates() {
        let date = CompletedDate::parse("2024-03-09").unwrap();
        assert_eq!(date.to_string(), "2024-03-09");
        assert!(CompletedDate::parse("2024-02-30").is_none());
        assert!(CompletedDate::parse("09/03/2024").is_none());
        assert!(CompletedDate::parse("").is_none());
    }

    #[test]
    fn serializes_as_plain_date_string() {
        let date = CompletedDate::parse("2023-12-31").unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2023-12-31\"");

        let full: CompletedDate = serde_json::from_str("\"2023-12-31T08:00:00+00:00\"").unwrap();
        assert_eq!(full, date);
    }
}
