//! Состояние страниц списка и карточки, общее для всех сущностей.

use crate::config::use_app_config;
use crate::shared::api::{use_api_client, ResourceClient};
use crate::shared::mutation::{submit_create, submit_update, PendingDelete, SubmitOutcome};
use crate::shared::notify::{use_notifications, NotificationService};
use crate::shared::remote::{
    use_debounced_query, use_remote_collection, CollectionHandle, DebouncedSearch, RequestKey,
};
use contracts::domain::common::{FieldErrors, Resource, ValidationRules};
use futures::future::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Список ресурса по поисковой строке.
///
/// Пустая строка запрашивает список без параметра `search`. Пока `enabled`
/// ложно, запросов нет. При смене строки на экране остаётся прежний список,
/// пока не придёт новый.
pub fn use_resource_list<R: Resource>(
    search: Signal<String>,
    enabled: Signal<bool>,
) -> CollectionHandle<Vec<R::Item>> {
    let client = use_api_client().resource::<R>();
    let key_client = client.clone();
    use_remote_collection(
        move || {
            if !enabled.get() {
                return None;
            }
            let search = search.get();
            let search = search.trim();
            Some(if search.is_empty() {
                key_client.list_key(None)
            } else {
                key_client.list_key(Some(search))
            })
        },
        true,
        move |key: &RequestKey| {
            let client = client.clone();
            let key = key.clone();
            async move { client.fetch::<Vec<R::Item>>(&key).await }.boxed_local()
        },
    )
}

/// Что открыто в окне редактирования
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(String),
}

impl EditTarget {
    pub fn id(&self) -> Option<String> {
        match self {
            EditTarget::New => None,
            EditTarget::Existing(id) => Some(id.clone()),
        }
    }
}

/// Что обновить в карточке после очередного снимка записи
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormRefill {
    Keep,
    /// Форма уже совпадает с сервером, сдвигается только исходник
    Original,
    Both,
}

/// Незавершённая правка не перетирается фоновой загрузкой
fn refill_form<F: PartialEq>(original: Option<&F>, form: &F, loaded: &F) -> FormRefill {
    match original {
        None => FormRefill::Both,
        Some(original) if original == loaded => FormRefill::Keep,
        Some(_) if form == loaded => FormRefill::Original,
        Some(original) if original == form => FormRefill::Both,
        Some(_) => FormRefill::Keep,
    }
}

/// Страница списка: поиск, данные, окно редактирования и удаление с подтверждением
pub struct ListViewModel<R: Resource> {
    pub search: DebouncedSearch,
    pub list: CollectionHandle<Vec<R::Item>>,
    pub editing: RwSignal<Option<EditTarget>>,
    pub pending_delete: RwSignal<PendingDelete<R>>,
    pub deleting: RwSignal<bool>,
    client: StoredValue<ResourceClient<R>, LocalStorage>,
    notifications: NotificationService,
}

impl<R: Resource> Clone for ListViewModel<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for ListViewModel<R> {}

impl<R: Resource> ListViewModel<R> {
    pub fn new() -> Self {
        let search = use_debounced_query();
        let list = use_resource_list::<R>(search.effective(), Signal::derive(|| true));
        Self {
            search,
            list,
            editing: RwSignal::new(None),
            pending_delete: RwSignal::new(PendingDelete::new()),
            deleting: RwSignal::new(false),
            client: StoredValue::new_local(use_api_client().resource::<R>()),
            notifications: use_notifications(),
        }
    }

    pub fn items(&self) -> Vec<R::Item> {
        self.list.data().unwrap_or_default()
    }

    pub fn open_create(&self) {
        self.editing.set(Some(EditTarget::New));
    }

    pub fn open_edit(&self, id: String) {
        self.editing.set(Some(EditTarget::Existing(id)));
    }

    pub fn close_editor(&self) {
        self.editing.set(None);
    }

    /// Фоновая перезагрузка текущего списка
    pub fn refresh(&self) {
        self.list.revalidate();
    }

    pub fn request_delete(&self, item: &R::Item) {
        self.pending_delete.update(|p| p.request(item));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.update(|p| p.cancel());
    }

    pub fn delete_prompt(&self) -> Option<String> {
        self.pending_delete.with(|p| p.prompt())
    }

    pub fn confirm_delete(&self) {
        if self.deleting.get_untracked() {
            return;
        }
        let mut pending = self.pending_delete.get_untracked();
        let slot = self.pending_delete;
        let deleting = self.deleting;
        let client = self.client.get_value();
        let list = self.list;
        let sink = self.notifications;

        deleting.set(true);
        spawn_local(async move {
            let _ = pending.confirm(&client, &[&list], &sink).await;
            let _ = deleting.try_set(false);
            let _ = slot.try_set(pending);
        });
    }
}

/// Карточка записи: форма, исходное состояние для сравнения и сохранение
pub struct DetailsViewModel<R: Resource> {
    pub form: RwSignal<R::Form>,
    pub errors: RwSignal<FieldErrors>,
    pub saving: RwSignal<bool>,
    pub detail: CollectionHandle<R::Detail>,
    original: RwSignal<Option<R::Form>>,
    id: StoredValue<Option<String>>,
    rules: StoredValue<ValidationRules>,
    client: StoredValue<ResourceClient<R>, LocalStorage>,
    notifications: NotificationService,
}

impl<R: Resource> Clone for DetailsViewModel<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for DetailsViewModel<R> {}

impl<R: Resource> DetailsViewModel<R> {
    /// `id = None` - создание новой записи
    pub fn new(id: Option<String>) -> Self {
        let client = use_api_client().resource::<R>();
        let key = id.as_deref().map(|id| client.detail_key(id));
        let fetch_client = client.clone();
        let detail = use_remote_collection(
            move || key.clone(),
            false,
            move |key: &RequestKey| {
                let client = fetch_client.clone();
                let key = key.clone();
                async move { client.fetch::<R::Detail>(&key).await }.boxed_local()
            },
        );

        let form = RwSignal::new(R::Form::default());
        let original = RwSignal::new(None::<R::Form>);
        // Снимок отслеживается целиком, поэтому эффект срабатывает и на начало фоновой
        // загрузки. Форма и исходник трогаются только при изменении загруженной записи.
        Effect::new(move |_| {
            let Some(loaded) = detail.data() else {
                return;
            };
            let loaded = R::form_from_detail(&loaded);
            let current = form.get_untracked();
            let refill = original.with_untracked(|o| refill_form(o.as_ref(), &current, &loaded));
            match refill {
                FormRefill::Keep => {}
                FormRefill::Original => original.set(Some(loaded)),
                FormRefill::Both => {
                    original.set(Some(loaded.clone()));
                    form.set(loaded);
                }
            }
        });

        Self {
            form,
            errors: RwSignal::new(FieldErrors::new()),
            saving: RwSignal::new(false),
            detail,
            original,
            id: StoredValue::new(id),
            rules: StoredValue::new(use_app_config().validation),
            client: StoredValue::new_local(client),
            notifications: use_notifications(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.with_value(Option::is_some)
    }

    /// В режиме редактирования: форма отличается от загруженной записи
    pub fn is_dirty(&self) -> bool {
        let form = self.form.get();
        self.original.with(|o| o.as_ref() != Some(&form))
    }

    pub fn update(&self, change: impl FnOnce(&mut R::Form)) {
        self.form.update(change);
    }

    pub fn error_for(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    }

    /// Сохранить; после успеха кэш списка сбрасывается и вызывается `on_saved`
    pub fn save(&self, list: CollectionHandle<Vec<R::Item>>, on_saved: Callback<()>) {
        if self.saving.get_untracked() {
            return;
        }
        let vm = *self;
        let id = self.id.get_value();
        let form = self.form.get_untracked();
        let original = self.original.get_untracked();
        let rules = self.rules.get_value();
        let client = self.client.get_value();
        let sink = self.notifications;
        let detail = self.detail;

        vm.saving.set(true);
        spawn_local(async move {
            let result = match (id, original) {
                (Some(id), Some(original)) => {
                    submit_update(&client, &id, &form, &original, &rules, &[&list, &detail], &sink)
                        .await
                }
                (Some(id), None) => {
                    log::warn!("Save requested before {} {} loaded", R::aggregate_index(), id);
                    let _ = vm.saving.try_set(false);
                    return;
                }
                (None, _) => submit_create(&client, &form, &rules, &[&list], &sink).await,
            };

            let _ = vm.saving.try_set(false);
            match result {
                Ok(outcome) => {
                    let _ = vm.errors.try_set(FieldErrors::new());
                    if let SubmitOutcome::Created(_) = outcome {
                        let _ = vm.form.try_set(R::Form::default());
                    }
                    on_saved.run(());
                }
                Err(err) => {
                    let _ = vm
                        .errors
                        .try_set(err.field_errors().cloned().unwrap_or_default());
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_snapshot_fills_form() {
        assert_eq!(refill_form(None, &"", &"Acme"), FormRefill::Both);
    }

    #[test]
    fn test_revalidation_keeps_typed_text() {
        // тот же снимок пришёл повторно, пользователь уже печатает
        assert_eq!(refill_form(Some(&"Acme"), &"Acme C", &"Acme"), FormRefill::Keep);
        // запись изменилась на сервере, но правка не сохранена
        assert_eq!(refill_form(Some(&"Acme"), &"Acme C", &"Acme Ltd"), FormRefill::Keep);
    }

    #[test]
    fn test_untouched_form_follows_server() {
        assert_eq!(refill_form(Some(&"Acme"), &"Acme", &"Acme Ltd"), FormRefill::Both);
        assert_eq!(refill_form(Some(&"Acme"), &"Acme", &"Acme"), FormRefill::Keep);
    }

    #[test]
    fn test_saved_edit_becomes_original() {
        assert_eq!(
            refill_form(Some(&"Acme"), &"Acme Corp", &"Acme Corp"),
            FormRefill::Original
        );
    }
}
