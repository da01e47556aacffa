//! Создание, изменение и удаление записей.
//!
//! Порядок один для всех сущностей: валидация формы, запрос к API,
//! при успехе сброс кэша у переданных коллекций и уведомление об успехе.
//! При ошибке форма не трогается, пользователь получает уведомление с текстом ошибки.

use crate::shared::api::{ApiError, ResourceClient};
use crate::shared::notify::{Notification, NotificationSink};
use crate::shared::remote::Invalidate;
use contracts::domain::common::{validate, FieldErrors, Resource, ValidationRules};
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Клиентская валидация не пройдена, запрос не отправлялся
    #[error("Форма заполнена с ошибками")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Ошибки для подсветки полей: клиентские или присланные сервером
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            SubmitError::Api(err) => err.field_errors(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Запись создана; `None`, если бэкенд вернул только id
    Created(Option<T>),
    Updated,
    /// Форма не отличается от загруженной записи, запрос не отправлялся
    Unchanged,
}

fn invalidate_all(targets: &[&dyn Invalidate]) {
    for target in targets {
        target.invalidate();
    }
}

fn report_failure<R: Resource>(action: &str, err: &ApiError, sink: &dyn NotificationSink) {
    log::error!("{} {} failed: {}", action, R::aggregate_index(), err);
    sink.notify(Notification::error(format!(
        "Не удалось {} {}: {}",
        action,
        R::element_name(),
        err
    )));
}

/// Создать запись из формы
pub async fn submit_create<R: Resource>(
    client: &ResourceClient<R>,
    form: &R::Form,
    rules: &ValidationRules,
    targets: &[&dyn Invalidate],
    sink: &dyn NotificationSink,
) -> Result<SubmitOutcome<R::Item>, SubmitError> {
    let payload = validate(form, rules).map_err(|errors| {
        log::debug!("{} form rejected: {:?}", R::aggregate_index(), errors);
        SubmitError::Invalid(errors)
    })?;

    match client.create(&payload).await {
        Ok(created) => {
            invalidate_all(targets);
            sink.notify(Notification::success("Запись создана"));
            Ok(SubmitOutcome::Created(created))
        }
        Err(err) => {
            report_failure::<R>("создать", &err, sink);
            Err(err.into())
        }
    }
}

/// Сохранить изменения записи `id`.
///
/// `original` - форма, заполненная из загруженной записи; если после
/// нормализации значения совпадают, запрос не отправляется.
pub async fn submit_update<R: Resource>(
    client: &ResourceClient<R>,
    id: &str,
    form: &R::Form,
    original: &R::Form,
    rules: &ValidationRules,
    targets: &[&dyn Invalidate],
    sink: &dyn NotificationSink,
) -> Result<SubmitOutcome<R::Item>, SubmitError> {
    let payload = validate(form, rules).map_err(SubmitError::Invalid)?;

    if validate(original, rules).ok().as_ref() == Some(&payload) {
        log::debug!("{} {} unchanged, skipping PUT", R::aggregate_index(), id);
        return Ok(SubmitOutcome::Unchanged);
    }

    match client.update(id, &payload).await {
        Ok(()) => {
            invalidate_all(targets);
            sink.notify(Notification::success("Изменения сохранены"));
            Ok(SubmitOutcome::Updated)
        }
        Err(err) => {
            report_failure::<R>("сохранить", &err, sink);
            Err(err.into())
        }
    }
}

/// Запись, выбранная для удаления
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: String,
    pub label: String,
}

/// Удаление с подтверждением.
///
/// `request` только запоминает цель и формирует вопрос для диалога.
/// DELETE уходит лишь из `confirm`; `cancel` сбрасывает цель без запросов.
pub struct PendingDelete<R: Resource> {
    target: Option<DeleteTarget>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for PendingDelete<R> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Default for PendingDelete<R> {
    fn default() -> Self {
        Self {
            target: None,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> PendingDelete<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, item: &R::Item) {
        self.target = Some(DeleteTarget {
            id: R::item_id(item).to_string(),
            label: R::item_label(item).to_string(),
        });
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Вопрос для диалога, например "Удалить бренд Acme?"
    pub fn prompt(&self) -> Option<String> {
        self.target
            .as_ref()
            .map(|t| format!("Удалить {} {}?", R::element_name(), t.label))
    }

    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// Подтвердить: цель снимается и удаляется на сервере.
    /// Без выбранной цели ничего не происходит.
    pub async fn confirm(
        &mut self,
        client: &ResourceClient<R>,
        targets: &[&dyn Invalidate],
        sink: &dyn NotificationSink,
    ) -> Result<(), ApiError> {
        let Some(target) = self.target.take() else {
            return Ok(());
        };
        delete_record(client, &target, targets, sink).await
    }
}

/// DELETE записи; при успехе кэш коллекций сбрасывается
pub async fn delete_record<R: Resource>(
    client: &ResourceClient<R>,
    target: &DeleteTarget,
    targets: &[&dyn Invalidate],
    sink: &dyn NotificationSink,
) -> Result<(), ApiError> {
    match client.delete(&target.id).await {
        Ok(()) => {
            invalidate_all(targets);
            sink.notify(Notification::success(format!("Удалено: {}", target.label)));
            Ok(())
        }
        Err(err) => {
            report_failure::<R>("удалить", &err, sink);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::testing::{mock_client, MockTransport};
    use crate::shared::api::Method;
    use crate::shared::notify::NotificationKind;
    use crate::shared::remote::{RemoteCollection, RequestKey, Spawner};
    use contracts::domain::a001_province::aggregate::{ProvinceForm, ProvinceResource};
    use contracts::domain::a002_city::aggregate::{CityForm, CityResource};
    use contracts::domain::a003_brand::aggregate::{Brand, BrandForm, BrandResource};
    use contracts::domain::a004_product::aggregate::{Product, ProductForm, ProductResource};
    use futures::executor::{block_on, LocalPool};
    use futures::future::FutureExt;
    use futures::task::LocalSpawnExt;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingSink(RefCell<Vec<Notification>>);

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: Notification) {
            self.0.borrow_mut().push(notification);
        }
    }

    impl RecordingSink {
        fn kinds(&self) -> Vec<NotificationKind> {
            self.0.borrow().iter().map(|n| n.kind).collect()
        }
    }

    #[derive(Default)]
    struct CountingTarget(Cell<u32>);

    impl Invalidate for CountingTarget {
        fn invalidate(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn brand_form(name: &str) -> BrandForm {
        BrandForm {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_create_posts_once_and_invalidates_once() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/Products",
            201,
            r#"{"id":"p1","name":"Kopi","description":"","price":15000,"quantity":3,"brandName":"Acme"}"#,
        );
        let client = mock_client(&transport).resource::<ProductResource>();
        let list = CountingTarget::default();
        let sink = RecordingSink::default();
        let form = ProductForm {
            name: "Kopi".to_string(),
            description: String::new(),
            price: "15 000".to_string(),
            quantity: "3".to_string(),
            brand_id: "b1".to_string(),
        };

        let outcome = block_on(submit_create(
            &client,
            &form,
            &ValidationRules::default(),
            &[&list],
            &sink,
        ))
        .unwrap();

        let SubmitOutcome::Created(Some(Product { id, .. })) = outcome else {
            panic!("unexpected outcome: {:?}", outcome);
        };
        assert_eq!(id, "p1");
        assert_eq!(transport.count(Method::Post), 1);
        assert_eq!(
            transport.requests()[0].body.as_deref(),
            Some(r#"{"name":"Kopi","description":"","price":15000.0,"quantity":3,"brandId":"b1"}"#)
        );
        assert_eq!(list.0.get(), 1);
        assert_eq!(sink.kinds(), vec![NotificationKind::Success]);
    }

    #[test]
    fn test_required_field_empty_sends_nothing() {
        let transport = MockTransport::new();
        let sink = RecordingSink::default();
        let list = CountingTarget::default();
        let rules = ValidationRules::default();

        let provinces = mock_client(&transport).resource::<ProvinceResource>();
        let err = block_on(submit_create(
            &provinces,
            &ProvinceForm::default(),
            &rules,
            &[&list],
            &sink,
        ))
        .unwrap_err();
        assert!(err.field_errors().unwrap().get("name").is_some());

        let cities = mock_client(&transport).resource::<CityResource>();
        let form = CityForm {
            name: "Bandung".to_string(),
            province_id: String::new(),
        };
        let err = block_on(submit_create(&cities, &form, &rules, &[&list], &sink)).unwrap_err();
        assert!(err.field_errors().unwrap().get("provinceId").is_some());

        assert!(transport.requests().is_empty());
        assert_eq!(list.0.get(), 0);
        assert!(sink.kinds().is_empty());
    }

    #[test]
    fn test_create_failure_keeps_cache_and_notifies() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Post,
            "/api/Brands",
            400,
            r#"{"title":"Validation failed","errors":{"Name":["Brand already exists"]}}"#,
        );
        let client = mock_client(&transport).resource::<BrandResource>();
        let list = CountingTarget::default();
        let sink = RecordingSink::default();

        let err = block_on(submit_create(
            &client,
            &brand_form("Acme"),
            &ValidationRules::default(),
            &[&list],
            &sink,
        ))
        .unwrap_err();

        assert_eq!(
            err.field_errors().and_then(|f| f.get("name")),
            Some("Brand already exists")
        );
        assert_eq!(list.0.get(), 0);
        let notes = sink.0.borrow();
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert_eq!(notes[0].message, "Не удалось создать бренд: Validation failed");
    }

    #[test]
    fn test_unchanged_edit_is_not_submitted() {
        let transport = MockTransport::new();
        let client = mock_client(&transport).resource::<BrandResource>();
        let list = CountingTarget::default();
        let sink = RecordingSink::default();

        let outcome = block_on(submit_update(
            &client,
            "1",
            &brand_form("Acme "),
            &brand_form("Acme"),
            &ValidationRules::default(),
            &[&list],
            &sink,
        ))
        .unwrap();

        assert_eq!(outcome, SubmitOutcome::Unchanged);
        assert!(transport.requests().is_empty());
        assert_eq!(list.0.get(), 0);
    }

    #[test]
    fn test_edit_brand_then_list_refetches() {
        let mut pool = LocalPool::new();
        let transport = MockTransport::new();
        transport.respond(Method::Get, "/api/Brands", 200, r#"[{"id":"1","name":"Acme"}]"#);
        transport.respond(Method::Put, "/api/Brands/1", 204, "");
        transport.respond(Method::Get, "/api/Brands", 200, r#"[{"id":"1","name":"Acme Corp"}]"#);
        let client = mock_client(&transport).resource::<BrandResource>();

        let fetch_client = client.clone();
        let pool_spawner = pool.spawner();
        let spawner: Spawner = Rc::new(move |task| {
            pool_spawner.spawn_local(task).expect("spawn");
        });
        let list: RemoteCollection<Vec<Brand>> = RemoteCollection::new(
            move |key: &RequestKey| {
                let client = fetch_client.clone();
                let key = key.clone();
                async move { client.fetch::<Vec<Brand>>(&key).await }.boxed_local()
            },
            spawner,
        );
        list.set_key(Some(client.list_key(None)));
        pool.run_until_stalled();
        let original = BrandResource::form_from_detail(&list.snapshot().data.unwrap()[0]);
        assert_eq!(original, brand_form("Acme"));

        let sink = RecordingSink::default();
        let outcome = pool
            .run_until(submit_update(
                &client,
                "1",
                &brand_form("Acme Corp"),
                &original,
                &ValidationRules::default(),
                &[&list],
                &sink,
            ))
            .unwrap();
        pool.run_until_stalled();

        assert_eq!(outcome, SubmitOutcome::Updated);
        let sent: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.url, r.body))
            .collect();
        assert_eq!(
            sent,
            vec![
                (Method::Get, "http://localhost:3000/api/be/api/Brands".to_string(), None),
                (
                    Method::Put,
                    "http://localhost:3000/api/be/api/Brands/1".to_string(),
                    Some(r#"{"name":"Acme Corp"}"#.to_string())
                ),
                (Method::Get, "http://localhost:3000/api/be/api/Brands".to_string(), None),
            ]
        );
        let data = list.snapshot().data.unwrap();
        assert_eq!(data[0].name, "Acme Corp");
        assert_eq!(list.invalidations(), 1);
    }

    #[test]
    fn test_delete_waits_for_confirmation() {
        let transport = MockTransport::new();
        transport.respond(Method::Delete, "/api/Brands/1", 204, "");
        let client = mock_client(&transport).resource::<BrandResource>();
        let list = CountingTarget::default();
        let sink = RecordingSink::default();
        let acme = Brand {
            id: "1".to_string(),
            name: "Acme".to_string(),
            created_at: None,
        };

        let mut pending = PendingDelete::<BrandResource>::new();
        pending.request(&acme);
        assert_eq!(pending.prompt().as_deref(), Some("Удалить бренд Acme?"));
        pending.cancel();
        assert!(!pending.is_open());
        block_on(pending.confirm(&client, &[&list], &sink)).unwrap();
        assert!(transport.requests().is_empty());

        pending.request(&acme);
        assert!(transport.requests().is_empty());
        block_on(pending.confirm(&client, &[&list], &sink)).unwrap();
        assert_eq!(transport.count(Method::Delete), 1);
        assert_eq!(list.0.get(), 1);
        assert!(!pending.is_open());
    }

    #[test]
    fn test_rejected_delete_reports_conflict() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Delete,
            "/api/Provinces/7",
            409,
            r#"{"message":"Province has cities"}"#,
        );
        let client = mock_client(&transport).resource::<ProvinceResource>();
        let list = CountingTarget::default();
        let sink = RecordingSink::default();
        let target = DeleteTarget {
            id: "7".to_string(),
            label: "Jawa Barat".to_string(),
        };

        let err = block_on(delete_record(&client, &target, &[&list], &sink)).unwrap_err();
        assert_eq!(err, ApiError::Conflict("Province has cities".to_string()));
        assert_eq!(list.0.get(), 0);
        assert_eq!(sink.kinds(), vec![NotificationKind::Error]);
    }
}
