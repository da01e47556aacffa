//! Форматирование дат для таблиц и карточек

use chrono::{DateTime, Utc};

/// Формат DD.MM.YYYY HH:MM:SS
/// Example: 2024-03-15T14:02:26.123Z -> "15.03.2024 14:02:26"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Дата создания записи; бэкенд может её не прислать
pub fn format_created_at(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_datetime).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let value = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&value), "15.03.2024 14:02:26");
    }

    #[test]
    fn test_parsed_from_backend() {
        let value: DateTime<Utc> = serde_json::from_str(r#""2024-12-31T23:59:59.123Z""#).unwrap();
        assert_eq!(format_created_at(Some(&value)), "31.12.2024 23:59:59");
    }

    #[test]
    fn test_missing_created_at() {
        assert_eq!(format_created_at(None), "-");
    }
}
