use leptos::prelude::*;

/// Поле формы с подписью и сообщением об ошибке
#[component]
pub fn FormField(
    label: &'static str,
    /// id элемента ввода
    name: &'static str,
    #[prop(into)]
    value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)]
    error: Signal<Option<String>>,
    /// Многострочное поле
    #[prop(optional)]
    multiline: bool,
    /// Числовая клавиатура на мобильных
    #[prop(optional)]
    numeric: bool,
    #[prop(optional)]
    placeholder: &'static str,
) -> impl IntoView {
    let input = if multiline {
        view! {
            <textarea
                id=name
                rows="4"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                id=name
                inputmode=if numeric { "decimal" } else { "text" }
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <div class="form-group" class:form-group--invalid=move || error.with(Option::is_some)>
            <label for=name>{label}</label>
            {input}
            {move || error.get().map(|e| view! { <div class="form-group__error">{e}</div> })}
        </div>
    }
}

/// Кнопки карточки. В режиме редактирования "Сохранить" доступна только после изменений.
#[component]
pub fn FormActions(
    is_edit: bool,
    #[prop(into)]
    saving: Signal<bool>,
    #[prop(into)]
    dirty: Signal<bool>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="details-actions">
            <button
                class="button button--primary"
                disabled=move || saving.get() || (is_edit && !dirty.get())
                on:click=move |_| on_save.run(())
            >
                {move || match (saving.get(), is_edit) {
                    (true, _) => "Сохранение...",
                    (false, true) => "Сохранить",
                    (false, false) => "Создать",
                }}
            </button>
            <button class="button button--secondary" on:click=move |_| on_cancel.run(())>
                "Отмена"
            </button>
        </div>
    }
}
