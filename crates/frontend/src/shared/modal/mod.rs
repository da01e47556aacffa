use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: Signal<String>,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    // Escape закрывает окно
    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Подтверждение необратимого действия
#[component]
pub fn ConfirmDialog(
    /// Вопрос, например "Удалить бренд Acme?"
    #[prop(into)]
    message: Signal<String>,
    /// Идёт выполнение подтверждённого действия
    #[prop(into)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal title="Подтверждение".to_string() on_close=on_cancel>
            <p class="confirm-dialog__message">{move || message.get()}</p>
            <div class="details-actions">
                <button
                    class="button button--danger"
                    disabled=move || busy.get()
                    on:click=move |_| on_confirm.run(())
                >
                    {icon("delete")}
                    {move || if busy.get() { "Удаление..." } else { "Удалить" }}
                </button>
                <button class="button button--secondary" on:click=move |_| on_cancel.run(())>
                    "Отмена"
                </button>
            </div>
        </Modal>
    }
}
