use contracts::domain::common::FieldErrors;
use contracts::shared::api_error::ErrorBody;
use thiserror::Error;

/// Ошибки обращения к API.
///
/// `Clone + PartialEq`, чтобы ошибка могла храниться в сигналах вместе с данными.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Запрос не дошёл до сервера
    #[error("Сервер недоступен: {0}")]
    Network(String),

    #[error("Превышено время ожидания ответа сервера")]
    Timeout,

    #[error("Запись не найдена: {0}")]
    NotFound(String),

    /// Бэкенд отклонил данные, прошедшие клиентскую валидацию
    #[error("{message}")]
    ServerValidation { message: String, fields: FieldErrors },

    /// Удаление отклонено (например, на запись ссылаются дочерние)
    #[error("Операция отклонена сервером: {0}")]
    Conflict(String),

    #[error("Ошибка сервера (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// Ответ 2xx, который не удалось разобрать
    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),
}

impl ApiError {
    /// Перевести ответ с кодом не-2xx в ошибку
    pub fn from_status(status: u16, url: &str, body: &str) -> Self {
        let parsed = ErrorBody::parse(body);
        let message = parsed
            .summary()
            .unwrap_or_else(|| format!("HTTP {}", status));

        match status {
            404 => ApiError::NotFound(url.to_string()),
            409 => ApiError::Conflict(message),
            400 | 422 => ApiError::ServerValidation {
                message,
                fields: FieldErrors::from_server(&parsed.errors),
            },
            _ => ApiError::Server { status, message },
        }
    }

    /// Ошибки полей от сервера, если они есть
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::ServerValidation { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}
