use super::client::ApiClient;
use leptos::prelude::*;

/// Положить клиент API в контекст. Клиент держит `Rc`, поэтому хранится локально.
pub fn provide_api_client(client: ApiClient) {
    provide_context(StoredValue::new_local(client));
}

pub fn use_api_client() -> ApiClient {
    use_context::<StoredValue<ApiClient, LocalStorage>>()
        .expect("ApiClient not found in context")
        .get_value()
}
