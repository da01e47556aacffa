use serde::Deserialize;
use std::collections::BTreeMap;

/// Тело ответа бэкенда с ошибкой.
///
/// Бэкенд отдаёт либо `{ "message": "..." }`, либо ProblemDetails ASP.NET
/// (`title`, `detail`, `errors: { "Name": ["..."] }`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    /// Разобрать тело ошибки; нераспознанное тело даёт пустую структуру
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Текст для пользователя: первое непустое из message, detail, title
    pub fn summary(&self) -> Option<String> {
        [&self.message, &self.detail, &self.title]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details() {
        let body = r#"{"type":"https://tools.ietf.org/html/rfc7231","title":"One or more validation errors occurred.","status":400,"errors":{"Name":["Name is taken"]}}"#;
        let parsed = ErrorBody::parse(body);
        assert_eq!(
            parsed.summary().as_deref(),
            Some("One or more validation errors occurred.")
        );
        assert_eq!(parsed.errors["Name"], vec!["Name is taken".to_string()]);
    }

    #[test]
    fn test_blank_message_falls_through_to_title() {
        let parsed = ErrorBody::parse(r#"{"message":"","title":"Bad request"}"#);
        assert_eq!(parsed.summary().as_deref(), Some("Bad request"));

        let parsed = ErrorBody::parse(r#"{"message":"  ","detail":"Name is taken","title":"Bad request"}"#);
        assert_eq!(parsed.summary().as_deref(), Some("Name is taken"));
    }

    #[test]
    fn test_garbage_body() {
        let parsed = ErrorBody::parse("<html>502</html>");
        assert_eq!(parsed, ErrorBody::default());
        assert_eq!(parsed.summary(), None);
    }
}
