//! Уведомления пользователя об итогах операций.

use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

/// Время показа уведомления
const DISMISS_AFTER_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Приёмник уведомлений
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

/// Всплывающие уведомления приложения
#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<(Uuid, Notification)>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
        }
    }

    pub fn dismiss(&self, id: Uuid) {
        self.items.update(|items| items.retain(|(item_id, _)| *item_id != id));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for NotificationService {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => log::info!("{}", notification.message),
            NotificationKind::Error => log::error!("{}", notification.message),
        }

        let id = Uuid::new_v4();
        self.items.update(|items| items.push((id, notification)));

        let service = *self;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
            service.dismiss(id);
        });
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not found in context")
}

/// Стек уведомлений в углу экрана
#[component]
pub fn Toasts() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="toasts">
            <For
                each=move || service.items.get()
                key=|(id, _)| *id
                children=move |(id, notification)| {
                    let intent = match notification.kind {
                        NotificationKind::Success => MessageBarIntent::Success,
                        NotificationKind::Error => MessageBarIntent::Error,
                    };
                    view! {
                        <div class="toasts__item" on:click=move |_| service.dismiss(id)>
                            <MessageBar intent=intent>{notification.message}</MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
