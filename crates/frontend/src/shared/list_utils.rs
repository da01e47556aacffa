/// Поиск в списках: поле ввода с отложенной фиксацией и подсветка совпадений
use crate::shared::icons::icon;
use crate::shared::remote::DebouncedSearch;
use leptos::prelude::*;

/// Подсветка совпадений в тексте (без учёта регистра)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if filter.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let filter_lower = filter.to_lowercase();
    let text_lower = text.to_lowercase();
    // Смещения в нижнем регистре совпадают с исходными только для той же длины
    if text_lower.len() != text.len() || !text_lower.contains(&filter_lower) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let start = last_pos + pos;
        let end = start + filter_lower.len();
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-match">{text[start..end].to_string()}</mark> }.into_any());
        last_pos = end;
    }
    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Поле поиска. Запрос к серверу уходит после паузы в наборе.
#[component]
pub fn SearchInput(
    search: DebouncedSearch,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };
    let pending = search.pending();
    let effective = search.effective();

    view! {
        <div class="search-input" class:search-input--active=move || !effective.get().trim().is_empty()>
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || pending.get()
                on:input=move |ev| search.set_query(event_target_value(&ev))
            />
            <Show when=move || !pending.get().is_empty()>
                <button class="search-input__clear" title="Очистить" on:click=move |_| search.clear()>
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}
