//! Разбор дат от бэкенда.
//!
//! ASP.NET отдаёт `DateTime` как с зоной (`2024-03-15T14:02:26Z`), так и без неё
//! (`2024-03-15T14:02:26.123`). Дата без зоны считается UTC. Нераспознанное
//! значение даёт `None`, а не ошибку разбора всего списка.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|value| value.and_utc())
}

/// Для `#[serde(deserialize_with = ...)]` на полях `createdAt`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc3339_with_offset() {
        assert_eq!(
            parse_timestamp("2024-03-15T17:02:26+03:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap())
        );
    }

    #[test]
    fn test_naive_read_as_utc() {
        let value = parse_timestamp("2024-03-15T14:02:26.123").unwrap();
        assert_eq!(value.format("%d.%m.%Y %H:%M:%S").to_string(), "15.03.2024 14:02:26");
        assert_eq!(
            parse_timestamp("2024-03-15T14:02:26"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-03-15"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_timestamp("вчера"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
