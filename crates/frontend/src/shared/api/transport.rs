use super::error::ApiError;
use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_net::http::Request;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Один HTTP-запрос к бэкенду
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// JSON-тело
    pub body: Option<String>,
    pub bearer: Option<String>,
    /// Крайний срок ожидания ответа; `None` - ждать столько, сколько ждёт браузер
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Шов между клиентом API и сетью.
///
/// Реализация возвращает ответ с любым статусом; перевод статуса в `ApiError`
/// делает `ApiClient`. Ошибкой транспорта считается только недоставка запроса
/// или истечение срока.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Транспорт браузера (fetch через gloo-net)
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let Some(limit) = request.timeout else {
            return exchange(request).await;
        };

        // Запрос не прерывается: по истечении срока его ответ просто не ждут
        let exchange = Box::pin(exchange(request));
        let deadline = Box::pin(gloo_timers::future::sleep(limit));
        match future::select(exchange, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ApiError::Timeout),
        }
    }
}

async fn exchange(request: ApiRequest) -> Result<ApiResponse, ApiError> {
    let builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    let mut builder = builder.header("Accept", "application/json");
    if let Some(token) = &request.bearer {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }

    let sent = match request.body {
        Some(body) => {
            builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?
                .send()
                .await
        }
        None => builder.send().await,
    };
    let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

    Ok(ApiResponse { status, body })
}
