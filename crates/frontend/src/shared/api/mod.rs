//! Доступ к REST API бэкенда.
//!
//! - `transport` - шов HTTP (`HttpTransport`) и его браузерная реализация на gloo-net
//! - `client`    - единый `ApiClient` приложения и типизированный `ResourceClient<R>`
//! - `error`     - таксономия ошибок API
//! - `context`   - передача клиента через контекст Leptos

pub mod client;
pub mod context;
pub mod error;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use client::{ApiClient, Payload, ResourceClient};
pub use context::{provide_api_client, use_api_client};
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, GlooTransport, HttpTransport, Method};
