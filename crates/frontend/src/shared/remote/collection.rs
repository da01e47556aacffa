//! Контроллер удалённой коллекции.
//!
//! Держит кэш данных по ключу запроса и жизненный цикл загрузки:
//!
//! ```text
//! idle -> loading -> success(data) | error
//! success -> validating -> success(new data) | error (старые данные остаются)
//! ```
//!
//! Применяется только ответ последнего выданного запроса: медленный ответ
//! на устаревший ключ отбрасывается при получении. Запросы не отменяются,
//! их результат просто игнорируется.

use crate::shared::api::ApiError;
use super::request_key::RequestKey;
use futures::future::{FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Запуск фоновой задачи (в браузере - `spawn_local`)
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

type Fetcher<T> = Rc<dyn Fn(&RequestKey) -> LocalBoxFuture<'static, Result<T, ApiError>>>;
type Listener<T> = Rc<dyn Fn(&CollectionSnapshot<T>)>;

/// Сброс кэша с повторной загрузкой; вызывается после успешной мутации
pub trait Invalidate {
    fn invalidate(&self);
}

/// Состояние для слоя представления
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot<T> {
    pub key: Option<RequestKey>,
    /// Последние успешно загруженные данные; при `error` могут быть устаревшими
    pub data: Option<T>,
    pub error: Option<ApiError>,
    /// Первая загрузка ключа: показывать нечего
    pub is_loading: bool,
    /// Идёт любая загрузка текущего ключа
    pub is_validating: bool,
}

impl<T> Default for CollectionSnapshot<T> {
    fn default() -> Self {
        Self {
            key: None,
            data: None,
            error: None,
            is_loading: false,
            is_validating: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Validating,
    Success,
    Failed,
}

impl<T> CollectionSnapshot<T> {
    pub fn phase(&self) -> FetchPhase {
        if self.is_loading {
            FetchPhase::Loading
        } else if self.is_validating {
            FetchPhase::Validating
        } else if self.error.is_some() {
            FetchPhase::Failed
        } else if self.data.is_some() {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }
}

struct Entry<T> {
    data: Option<T>,
    error: Option<ApiError>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

struct InFlight {
    key: RequestKey,
    seq: u64,
}

struct State<T> {
    key: Option<RequestKey>,
    cache: HashMap<RequestKey, Entry<T>>,
    in_flight: Option<InFlight>,
    next_seq: u64,
    invalidations: u64,
    /// Данные предыдущего ключа, пока новый грузится (`keep_previous_data`)
    previous: Option<T>,
    keep_previous: bool,
    disposed: bool,
    listeners: Vec<Listener<T>>,
}

impl<T: Clone> State<T> {
    fn snapshot(&self) -> CollectionSnapshot<T> {
        let entry = self.key.as_ref().and_then(|k| self.cache.get(k));
        let mut data = entry.and_then(|e| e.data.clone());
        let is_validating = match (&self.in_flight, &self.key) {
            (Some(flight), Some(key)) => &flight.key == key,
            _ => false,
        };
        let is_loading = is_validating && data.is_none();
        if data.is_none() && self.keep_previous {
            data = self.previous.clone();
        }

        CollectionSnapshot {
            key: self.key.clone(),
            data,
            error: entry.and_then(|e| e.error.clone()),
            is_loading,
            is_validating,
        }
    }
}

/// Контроллер данных одной страницы (список или детальная модель)
pub struct RemoteCollection<T: Clone + 'static> {
    state: Rc<RefCell<State<T>>>,
    fetcher: Fetcher<T>,
    spawner: Spawner,
}

impl<T: Clone + 'static> Clone for RemoteCollection<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            fetcher: self.fetcher.clone(),
            spawner: self.spawner.clone(),
        }
    }
}

impl<T: Clone + 'static> RemoteCollection<T> {
    pub fn new<F>(fetcher: F, spawner: Spawner) -> Self
    where
        F: Fn(&RequestKey) -> LocalBoxFuture<'static, Result<T, ApiError>> + 'static,
    {
        Self {
            state: Rc::new(RefCell::new(State {
                key: None,
                cache: HashMap::new(),
                in_flight: None,
                next_seq: 0,
                invalidations: 0,
                previous: None,
                keep_previous: false,
                disposed: false,
                listeners: Vec::new(),
            })),
            fetcher: Rc::new(fetcher),
            spawner,
        }
    }

    /// Показывать данные прежнего ключа, пока новый ключ грузится впервые
    pub fn keep_previous_data(self, keep: bool) -> Self {
        self.state.borrow_mut().keep_previous = keep;
        self
    }

    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        self.state.borrow().snapshot()
    }

    pub fn key(&self) -> Option<RequestKey> {
        self.state.borrow().key.clone()
    }

    /// Сколько раз кэш сбрасывался после мутаций
    pub fn invalidations(&self) -> u64 {
        self.state.borrow().invalidations
    }

    pub fn subscribe(&self, listener: impl Fn(&CollectionSnapshot<T>) + 'static) {
        self.state.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Переключиться на ключ. `None` - запрашивать нечего (например, нет id).
    pub fn set_key(&self, key: Option<RequestKey>) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed || state.key == key {
                return;
            }
            if state.keep_previous {
                let shown = state.snapshot().data;
                if shown.is_some() {
                    state.previous = shown;
                }
            }
            state.key = key;
            if state.key.is_none() {
                state.in_flight = None;
            }
        }
        self.start_fetch(false);
        self.notify();
    }

    /// Фоновая перезагрузка текущего ключа. Если запрос по этому ключу уже
    /// идёт, новый не выдаётся.
    pub fn revalidate(&self) {
        self.start_fetch(false);
    }

    /// Снять контроллер (уход со страницы): поздние ответы больше не применяются
    pub fn dispose(&self) {
        let mut state = self.state.borrow_mut();
        state.disposed = true;
        state.in_flight = None;
        state.listeners.clear();
    }

    fn start_fetch(&self, force: bool) {
        let (key, seq) = {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }
            let Some(key) = state.key.clone() else {
                return;
            };
            if !force {
                if let Some(flight) = &state.in_flight {
                    if flight.key == key {
                        log::debug!("Joining in-flight request for {}", key);
                        return;
                    }
                }
            }
            state.next_seq += 1;
            let seq = state.next_seq;
            state.in_flight = Some(InFlight {
                key: key.clone(),
                seq,
            });
            (key, seq)
        };

        self.notify();

        let request = (self.fetcher)(&key);
        let this = self.clone();
        (self.spawner)(
            async move {
                let result = request.await;
                this.complete(seq, key, result);
            }
            .boxed_local(),
        );
    }

    fn complete(&self, seq: u64, key: RequestKey, result: Result<T, ApiError>) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }
            let latest = state.in_flight.as_ref().map(|flight| flight.seq);
            if latest != Some(seq) {
                log::debug!("Dropping superseded response for {}", key);
                return;
            }
            state.in_flight = None;

            let entry = state.cache.entry(key.clone()).or_default();
            match result {
                Ok(data) => {
                    entry.data = Some(data);
                    entry.error = None;
                }
                Err(err) => {
                    log::warn!("Fetch {} failed: {}", key, err);
                    entry.error = Some(err);
                }
            }
            if entry.data.is_some() {
                state.previous = None;
            }
        }
        self.notify();
    }

    fn notify(&self) {
        let (snapshot, listeners) = {
            let state = self.state.borrow();
            (state.snapshot(), state.listeners.clone())
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl<T: Clone + 'static> Invalidate for RemoteCollection<T> {
    /// Кэш остальных ключей выбрасывается, текущий ключ перезагружается новым
    /// запросом (идущий запрос устаревает). Видимые данные остаются до ответа.
    fn invalidate(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.invalidations += 1;
            let current = state.key.clone();
            state.cache.retain(|k, _| Some(k) == current.as_ref());
        }
        self.start_fetch(true);
    }
}
