use crate::config::{load_config, provide_app_config, CONFIG_OVERRIDE_KEY};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::api::{provide_api_client, ApiClient, GlooTransport};
use crate::shared::notify::NotificationService;
use crate::system::auth::storage;
use leptos::prelude::*;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config(storage::read_item(CONFIG_OVERRIDE_KEY).as_deref());
    log::info!("API base URL: {}", config.api.base_url);

    // One client for the whole app: base URL, token supplier and deadline are fixed here
    let client = ApiClient::new(config.api.base_url.clone(), Rc::new(GlooTransport))
        .with_token_supplier(storage::get_access_token)
        .with_timeout(config.timeout());
    provide_api_client(client);
    provide_app_config(config);

    provide_context(NotificationService::new());

    let ctx = AppGlobalContext::new();
    provide_context(ctx);
    ctx.init_router_integration();

    view! {
        <Shell />
    }
}
