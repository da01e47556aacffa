use crate::shared::entity::DetailsViewModel;
use crate::shared::form::{FormActions, FormField};
use crate::shared::remote::CollectionHandle;
use contracts::domain::a001_province::aggregate::{Province, ProvinceResource};
use leptos::prelude::*;

#[component]
pub fn ProvinceDetails(
    id: Option<String>,
    /// Список, который нужно обновить после сохранения
    list: CollectionHandle<Vec<Province>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = DetailsViewModel::<ProvinceResource>::new(id);

    view! {
        <div class="details-container">
            {move || vm.detail.error().map(|e| view! { <div class="error">{e.to_string()}</div> })}
            <div class="details-form">
                <FormField
                    label="Наименование"
                    name="province-name"
                    value=Signal::derive(move || vm.form.with(|f| f.name.clone()))
                    on_input=Callback::new(move |v| vm.update(|f| f.name = v))
                    error=vm.error_for("name")
                    placeholder="Например, Jawa Barat"
                />
            </div>
            <FormActions
                is_edit=vm.is_edit_mode()
                saving=vm.saving
                dirty=Signal::derive(move || vm.is_dirty())
                on_save=Callback::new(move |_| vm.save(list, on_close))
                on_cancel=on_close
            />
        </div>
    }
}
