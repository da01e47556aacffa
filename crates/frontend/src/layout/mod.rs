pub mod global_context;
pub mod left;

use crate::domain::a001_province::ui::list::ProvinceList;
use crate::domain::a002_city::ui::list::CityList;
use crate::domain::a003_brand::ui::list::BrandList;
use crate::domain::a004_product::ui::list::ProductList;
use crate::shared::notify::Toasts;
use global_context::{AppGlobalContext, Page};
use leptos::prelude::*;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |           Content            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <left::Left>
                    <left::Sidebar />
                </left::Left>
                <div class="app-main">
                    <Center />
                </div>
            </div>
            <Toasts />
        </div>
    }
}

#[component]
fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Скрыть навигацию" } else { "Показать навигацию" }
                >
                    "☰"
                </button>
                <span class="top-header__title">"Каталог товаров"</span>
            </div>
        </div>
    }
}

/// Активная страница. При переключении прежняя страница снимается вместе с её загрузками.
#[component]
fn Center() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div data-zone="center" class="center">
            {move || match ctx.active.get() {
                Page::Provinces => view! { <ProvinceList /> }.into_any(),
                Page::Cities => view! { <CityList /> }.into_any(),
                Page::Brands => view! { <BrandList /> }.into_any(),
                Page::Products => view! { <ProductList /> }.into_any(),
            }}
        </div>
    }
}
