//! Синхронизация удалённых списков и детальных моделей.
//!
//! - `debounce`    - отложенная фиксация поискового запроса
//! - `request_key` - ключ запроса (путь + поиск)
//! - `collection`  - контроллер данных по ключу (stale-while-revalidate)
//! - `hooks`       - привязка к реактивной системе Leptos

pub mod collection;
pub mod debounce;
pub mod hooks;
pub mod request_key;

pub use collection::{CollectionSnapshot, FetchPhase, Invalidate, RemoteCollection, Spawner};
pub use debounce::{DebounceTicket, DebouncedQuery, DEFAULT_DEBOUNCE};
pub use hooks::{use_debounced_query, use_remote_collection, CollectionHandle, DebouncedSearch};
pub use request_key::RequestKey;
