use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::shared::remote::RequestKey;
use contracts::domain::common::{EntityForm, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::Duration;

/// Тело POST/PUT для ресурса
pub type Payload<R> = <<R as Resource>::Form as EntityForm>::Payload;

type TokenSupplier = Rc<dyn Fn() -> Option<String>>;

/// Клиент API приложения.
///
/// Создаётся один раз при старте (базовый URL, источник токена, срок ожидания)
/// и передаётся страницам через контекст; страницы не собирают URL сами.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    transport: Rc<dyn HttpTransport>,
    token: TokenSupplier,
    timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn HttpTransport>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').into(),
            transport,
            token: Rc::new(|| None),
            timeout: None,
        }
    }

    /// Источник bearer-токена; вызывается на каждый запрос
    pub fn with_token_supplier(mut self, supplier: impl Fn() -> Option<String> + 'static) -> Self {
        self.token = Rc::new(supplier);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient {
            api: self.clone(),
            _resource: PhantomData,
        }
    }

    /// Выполнить запрос; ответ не-2xx становится `ApiError`
    pub async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<String>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(path_and_query);
        log::debug!("{} {}", method, url);

        let request = ApiRequest {
            method,
            url: url.clone(),
            body,
            bearer: (self.token)(),
            timeout: self.timeout,
        };

        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, url, e);
            e
        })?;

        if response.is_success() {
            Ok(response)
        } else {
            let err = ApiError::from_status(response.status, path_and_query, &response.body);
            log::warn!("{} {} -> HTTP {}: {}", method, url, response.status, err);
            Err(err)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ApiError> {
        let response = self.send(Method::Get, path_and_query, None).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(method, path, Some(json)).await
    }
}

/// Типизированный клиент одного ресурса
pub struct ResourceClient<R: Resource> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    /// Ключ списка: без поиска, либо с `?search=`
    pub fn list_key(&self, search: Option<&str>) -> RequestKey {
        match search {
            Some(search) => RequestKey::with_search(R::collection_path(), search),
            None => RequestKey::new(R::collection_path()),
        }
    }

    pub fn detail_key(&self, id: &str) -> RequestKey {
        RequestKey::new(R::element_path(id))
    }

    /// GET по ключу запроса
    pub async fn fetch<T: DeserializeOwned>(&self, key: &RequestKey) -> Result<T, ApiError> {
        self.api.get_json(&key.path_and_query()).await
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<R::Item>, ApiError> {
        self.fetch(&self.list_key(search)).await
    }

    pub async fn get(&self, id: &str) -> Result<R::Detail, ApiError> {
        self.fetch(&self.detail_key(id)).await
    }

    /// POST. Бэкенд может вернуть созданную запись или только её id;
    /// во втором случае результат `None`.
    pub async fn create(&self, payload: &Payload<R>) -> Result<Option<R::Item>, ApiError> {
        let response = self
            .api
            .send_json(Method::Post, R::collection_path(), payload)
            .await?;
        match serde_json::from_str::<R::Item>(&response.body) {
            Ok(item) => Ok(Some(item)),
            Err(e) => {
                log::debug!("Created {} without record body: {}", R::element_name(), e);
                Ok(None)
            }
        }
    }

    pub async fn update(&self, id: &str, payload: &Payload<R>) -> Result<(), ApiError> {
        self.api
            .send_json(Method::Put, &R::element_path(id), payload)
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api
            .send(Method::Delete, &R::element_path(id), None)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::testing::{mock_client, MockTransport};
    use contracts::domain::a003_brand::aggregate::{BrandPayload, BrandResource};
    use contracts::domain::a004_product::aggregate::ProductResource;
    use futures::executor::block_on;

    #[test]
    fn test_list_parses_items() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/Brands", 200, r#"[{"id":"1","name":"Acme"}]"#);
        let client = mock_client(&transport).resource::<BrandResource>();

        let brands = block_on(client.list(None)).unwrap();
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].name, "Acme");

        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://localhost:3000/api/be/api/Brands");
        assert_eq!(sent[0].bearer.as_deref(), Some("token-1"));
        assert!(sent[0].body.is_none());
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/Products/404", 404, "");
        let client = mock_client(&transport).resource::<ProductResource>();

        let err = block_on(client.get("404")).unwrap_err();
        assert_eq!(err, ApiError::NotFound("/api/Products/404".to_string()));
    }

    #[test]
    fn test_create_posts_payload() {
        let transport = MockTransport::new();
        transport.respond(Method::Post, "/api/Brands", 200, r#""0b7c""#);
        let client = mock_client(&transport).resource::<BrandResource>();

        let payload = BrandPayload {
            name: "Acme".to_string(),
        };
        let created = block_on(client.create(&payload)).unwrap();
        assert!(created.is_none());

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"name":"Acme"}"#));
    }

    #[test]
    fn test_undecodable_list_is_decode_error() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/Brands", 200, "<html>");
        let client = mock_client(&transport).resource::<BrandResource>();

        assert!(matches!(block_on(client.list(None)), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_transport_failure_passes_through() {
        let transport = MockTransport::new();
        let client = mock_client(&transport).resource::<BrandResource>();

        // Нет заготовленного ответа - транспорт сообщает о недоставке
        assert!(matches!(block_on(client.delete("1")), Err(ApiError::Network(_))));
    }

    #[test]
    fn test_timeout_and_search_are_forwarded() {
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/Brands?search=ac%20me", 200, "[]");
        let client = mock_client(&transport)
            .with_timeout(Some(Duration::from_secs(5)))
            .resource::<BrandResource>();

        block_on(client.list(Some("ac me"))).unwrap();
        assert_eq!(transport.requests()[0].timeout, Some(Duration::from_secs(5)));
    }
}
