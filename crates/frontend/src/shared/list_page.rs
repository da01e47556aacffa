//! Части страницы списка, одинаковые для всех сущностей.

use crate::shared::entity::ListViewModel;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal::ConfirmDialog;
use crate::shared::remote::FetchPhase;
use contracts::domain::common::Resource;
use leptos::prelude::*;

/// Заголовок страницы: название, поиск, создание и обновление
#[component]
pub fn ListHeader<R: Resource>(vm: ListViewModel<R>, create_label: &'static str) -> impl IntoView {
    view! {
        <div class="header">
            <div class="header__content">
                <h1 class="header__title">{R::list_name()}</h1>
                <Show when=move || vm.list.is_validating()>
                    <span class="header__badge">"Обновление..."</span>
                </Show>
            </div>
            <div class="header__actions">
                <SearchInput search=vm.search />
                <button class="button button--primary" on:click=move |_| vm.open_create()>
                    {icon("plus")}
                    {create_label}
                </button>
                <button class="button button--secondary" on:click=move |_| vm.refresh()>
                    {icon("refresh")}
                    "Обновить"
                </button>
            </div>
        </div>
    }
}

/// Ошибка загрузки и пустые состояния. Данные прошлой загрузки при ошибке остаются в таблице.
#[component]
pub fn ListStatus<R: Resource>(vm: ListViewModel<R>) -> impl IntoView {
    view! {
        {move || vm.list.error().map(|e| view! {
            <div class="warning-box warning-box--error">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">{e.to_string()}</span>
            </div>
        })}
        {move || match vm.list.phase() {
            FetchPhase::Loading => {
                Some(view! { <div class="list-placeholder">"Загрузка..."</div> }.into_any())
            }
            FetchPhase::Success | FetchPhase::Validating
                if vm.list.data().is_some_and(|items| items.is_empty()) => {
                Some(view! { <div class="list-placeholder">"Записей нет"</div> }.into_any())
            }
            _ => None,
        }}
    }
}

/// Диалог подтверждения удаления выбранной записи
#[component]
pub fn DeleteConfirmation<R: Resource>(vm: ListViewModel<R>) -> impl IntoView {
    view! {
        {move || vm.delete_prompt().map(|prompt| view! {
            <ConfirmDialog
                message=prompt
                busy=vm.deleting
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
            />
        })}
    }
}

/// Кнопки строки таблицы
#[component]
pub fn RowActions(on_edit: Callback<()>, on_delete: Callback<()>) -> impl IntoView {
    view! {
        <td class="table__cell table__cell--actions">
            <button
                class="button button--icon"
                title="Изменить"
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_edit.run(());
                }
            >
                {icon("edit")}
            </button>
            <button
                class="button button--icon button--danger"
                title="Удалить"
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_delete.run(());
                }
            >
                {icon("delete")}
            </button>
        </td>
    }
}
