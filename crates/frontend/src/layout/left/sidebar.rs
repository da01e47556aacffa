//! Навигация по справочникам

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext not found");

    view! {
        <nav class="sidebar">
            <div class="sidebar__group-label">"Справочники"</div>
            {Page::ALL
                .into_iter()
                .map(|page| {
                    view! {
                        <button
                            class="sidebar__item"
                            class:sidebar__item--active=move || ctx.active.get() == page
                            on:click=move |_| ctx.activate(page)
                        >
                            {icon(page.icon())}
                            <span class="sidebar__label">{page.title()}</span>
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
