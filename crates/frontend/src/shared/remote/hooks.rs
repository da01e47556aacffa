//! Привязка контроллеров к реактивной системе Leptos.

use super::collection::{CollectionSnapshot, FetchPhase, Invalidate, RemoteCollection, Spawner};
use super::debounce::DebouncedQuery;
use super::request_key::RequestKey;
use crate::config::use_app_config;
use crate::shared::api::ApiError;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use std::time::Duration;

/// Поле поиска с отложенной фиксацией
#[derive(Clone, Copy)]
pub struct DebouncedSearch {
    pending: RwSignal<String>,
    effective: RwSignal<String>,
    state: StoredValue<DebouncedQuery>,
    delay: Duration,
}

impl DebouncedSearch {
    /// Текст в поле ввода
    pub fn pending(&self) -> Signal<String> {
        self.pending.into()
    }

    /// Зафиксированный запрос; меняется не чаще, чем раз в паузу
    pub fn effective(&self) -> Signal<String> {
        self.effective.into()
    }

    pub fn set_query(&self, text: String) {
        self.pending.set(text.clone());
        let Some(ticket) = self.state.try_update_value(|q| q.set_query(text)) else {
            return;
        };

        let search = *self;
        spawn_local(async move {
            gloo_timers::future::sleep(search.delay).await;
            if let Some(Some(value)) = search.state.try_update_value(|q| q.commit(ticket)) {
                log::debug!("Search committed: {:?}", value);
                search.effective.set(value);
            }
        });
    }

    /// Очистить поле и сразу сбросить фильтр
    pub fn clear(&self) {
        self.pending.set(String::new());
        let committed = self.state.try_update_value(|q| {
            q.set_query("");
            q.flush()
        });
        if let Some(Some(value)) = committed {
            self.effective.set(value);
        }
    }
}

/// Поиск с паузой из конфигурации (`[search] debounce_ms`)
pub fn use_debounced_query() -> DebouncedSearch {
    let delay = use_app_config().debounce();
    DebouncedSearch {
        pending: RwSignal::new(String::new()),
        effective: RwSignal::new(String::new()),
        state: StoredValue::new(DebouncedQuery::default()),
        delay,
    }
}

/// Реактивная обёртка над `RemoteCollection` для компонентов
pub struct CollectionHandle<T: Clone + Send + Sync + 'static> {
    snapshot: RwSignal<CollectionSnapshot<T>>,
    controller: StoredValue<RemoteCollection<T>, LocalStorage>,
}

impl<T: Clone + Send + Sync + 'static> Clone for CollectionHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Clone + Send + Sync + 'static> Copy for CollectionHandle<T> {}

impl<T: Clone + Send + Sync + 'static> CollectionHandle<T> {
    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        self.snapshot.get()
    }

    pub fn data(&self) -> Option<T> {
        self.snapshot.with(|s| s.data.clone())
    }

    pub fn error(&self) -> Option<ApiError> {
        self.snapshot.with(|s| s.error.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.with(|s| s.is_loading)
    }

    pub fn is_validating(&self) -> bool {
        self.snapshot.with(|s| s.is_validating)
    }

    pub fn phase(&self) -> FetchPhase {
        self.snapshot.with(CollectionSnapshot::phase)
    }

    pub fn revalidate(&self) {
        self.controller.with_value(|c| c.revalidate());
    }
}

impl<T: Clone + Send + Sync + 'static> Invalidate for CollectionHandle<T> {
    fn invalidate(&self) {
        let _ = self.controller.try_with_value(|c| c.invalidate());
    }
}

/// Загрузка данных по реактивному ключу.
///
/// Ключ пересчитывается при изменении сигналов, прочитанных в `key`;
/// `None` означает, что запрашивать пока нечего. При уходе со страницы
/// контроллер снимается, поздние ответы не применяются.
pub fn use_remote_collection<T, K, F>(key: K, keep_previous: bool, fetcher: F) -> CollectionHandle<T>
where
    T: Clone + Send + Sync + 'static,
    K: Fn() -> Option<RequestKey> + 'static,
    F: Fn(&RequestKey) -> LocalBoxFuture<'static, Result<T, ApiError>> + 'static,
{
    let spawner: Spawner = Rc::new(|task| spawn_local(task));
    let controller = RemoteCollection::new(fetcher, spawner).keep_previous_data(keep_previous);

    let snapshot = RwSignal::new(controller.snapshot());
    controller.subscribe(move |s| {
        let _ = snapshot.try_set(s.clone());
    });
    let controller = StoredValue::new_local(controller);

    Effect::new(move |_| {
        let key = key();
        controller.with_value(|c| c.set_key(key));
    });

    if let Some(interval) = use_app_config().revalidate_interval() {
        spawn_local(async move {
            loop {
                gloo_timers::future::sleep(interval).await;
                if controller.try_with_value(|c| c.revalidate()).is_none() {
                    break;
                }
            }
        });
    }

    on_cleanup(move || {
        let _ = controller.try_with_value(|c| c.dispose());
    });

    CollectionHandle {
        snapshot,
        controller,
    }
}
