use crate::shared::entity::use_resource_list;
use crate::shared::remote::use_debounced_query;
use contracts::domain::common::Resource;
use leptos::prelude::*;
use std::marker::PhantomData;

/// Выбор родительской записи с поиском на сервере.
///
/// Список запрашивается только пока выпадающий список открыт,
/// строка поиска уходит параметром `?search=`.
#[component]
pub fn ReferencePicker<P: Resource>(
    label: &'static str,
    name: &'static str,
    /// id выбранной записи
    #[prop(into)]
    value: Signal<String>,
    /// Подпись выбранной записи
    selected_label: RwSignal<String>,
    on_select: Callback<P::Item>,
    #[prop(into)]
    error: Signal<Option<String>>,
    /// Привязывает `P` для вывода типов в макросе `#[component]`
    #[prop(optional)]
    _resource: PhantomData<P>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let search = use_debounced_query();
    let options = use_resource_list::<P>(search.effective(), open.into());
    let pending = search.pending();

    let select = move |item: P::Item| {
        selected_label.set(P::item_label(&item).to_string());
        on_select.run(item);
        open.set(false);
        search.clear();
    };

    view! {
        <div class="form-group picker" class:form-group--invalid=move || error.with(Option::is_some)>
            <label for=name>{label}</label>
            <input
                type="text"
                id=name
                autocomplete="off"
                placeholder="Начните вводить для поиска"
                prop:value=move || if open.get() { pending.get() } else { selected_label.get() }
                on:focus=move |_| open.set(true)
                on:input=move |ev| {
                    open.set(true);
                    search.set_query(event_target_value(&ev));
                }
            />
            <Show when=move || open.get()>
                <div class="picker__dropdown">
                    {move || {
                        if options.is_loading() {
                            return view! { <div class="picker-loading">"Загрузка..."</div> }.into_any();
                        }
                        if let Some(err) = options.error() {
                            return view! { <div class="picker-error">"Ошибка загрузки: " {err.to_string()}</div> }.into_any();
                        }
                        let items = options.data().unwrap_or_default();
                        if items.is_empty() {
                            return view! { <div class="picker-empty">"Ничего не найдено"</div> }.into_any();
                        }
                        items
                            .iter()
                            .map(|item| {
                                let is_selected = value.with_untracked(|v| v == P::item_id(item));
                                let shown = P::item_label(item).to_string();
                                let picked = item.clone();
                                view! {
                                    <div
                                        class="picker-row"
                                        class:selected=is_selected
                                        on:mousedown=move |ev| {
                                            ev.prevent_default();
                                            select(picked.clone());
                                        }
                                    >
                                        {shown}
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                    <button class="button button--secondary picker__close" on:mousedown=move |ev| {
                        ev.prevent_default();
                        open.set(false);
                    }>
                        "Закрыть"
                    </button>
                </div>
            </Show>
            {move || error.get().map(|e| view! { <div class="form-group__error">{e}</div> })}
        </div>
    }
}
