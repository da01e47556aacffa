//! Тестовый транспорт: заготовленные ответы и ответы, отпускаемые вручную.

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, HttpTransport, Method};
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

pub const TEST_BASE_URL: &str = "http://localhost:3000/api/be";

type Reply = oneshot::Sender<Result<ApiResponse, ApiError>>;

struct Parked {
    path: String,
    reply: Option<Reply>,
}

#[derive(Default)]
struct Inner {
    requests: RefCell<Vec<ApiRequest>>,
    scripted: RefCell<HashMap<(Method, String), VecDeque<ApiResponse>>>,
    parked: RefCell<Vec<Parked>>,
    hold: Cell<bool>,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Rc<Inner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Заготовить ответ на запрос; ответы на один и тот же запрос выдаются по очереди
    pub fn respond(&self, method: Method, path_and_query: &str, status: u16, body: &str) {
        self.inner
            .scripted
            .borrow_mut()
            .entry((method, path_and_query.to_string()))
            .or_default()
            .push_back(ApiResponse {
                status,
                body: body.to_string(),
            });
    }

    /// Запросы без заготовленного ответа ждут `release`
    pub fn hold(&self) {
        self.inner.hold.set(true);
    }

    /// Отпустить `index`-й из ожидающих запросов
    pub fn release(&self, index: usize, status: u16, body: &str) {
        let reply = self.inner.parked.borrow_mut()[index].reply.take();
        if let Some(reply) = reply {
            let _ = reply.send(Ok(ApiResponse {
                status,
                body: body.to_string(),
            }));
        }
    }

    /// Отпустить первый ожидающий запрос на указанный путь
    pub fn release_to(&self, path_and_query: &str, status: u16, body: &str) {
        let index = self
            .inner
            .parked
            .borrow()
            .iter()
            .position(|p| p.path == path_and_query && p.reply.is_some());
        if let Some(index) = index {
            self.release(index, status, body);
        }
    }

    pub fn release_error(&self, index: usize, error: ApiError) {
        let reply = self.inner.parked.borrow_mut()[index].reply.take();
        if let Some(reply) = reply {
            let _ = reply.send(Err(error));
        }
    }

    pub fn parked(&self) -> usize {
        self.inner.parked.borrow().len()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn count(&self, method: Method) -> usize {
        self.inner
            .requests
            .borrow()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request
            .url
            .strip_prefix(TEST_BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let method = request.method;
        self.inner.requests.borrow_mut().push(request);

        let scripted = self
            .inner
            .scripted
            .borrow_mut()
            .get_mut(&(method, path.clone()))
            .and_then(VecDeque::pop_front);
        if let Some(response) = scripted {
            return Ok(response);
        }

        if !self.inner.hold.get() {
            return Err(ApiError::Network(format!("no route for {} {}", method, path)));
        }

        let (tx, rx) = oneshot::channel();
        self.inner.parked.borrow_mut().push(Parked {
            path,
            reply: Some(tx),
        });
        rx.await
            .unwrap_or_else(|_| Err(ApiError::Network("request dropped".to_string())))
    }
}

pub fn mock_client(transport: &MockTransport) -> ApiClient {
    ApiClient::new(TEST_BASE_URL, Rc::new(transport.clone()))
        .with_token_supplier(|| Some("token-1".to_string()))
}
