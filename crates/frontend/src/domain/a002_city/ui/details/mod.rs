use crate::shared::entity::DetailsViewModel;
use crate::shared::form::{FormActions, FormField};
use crate::shared::picker::ReferencePicker;
use crate::shared::remote::CollectionHandle;
use contracts::domain::a001_province::aggregate::{Province, ProvinceResource};
use contracts::domain::a002_city::aggregate::{City, CityResource};
use leptos::prelude::*;

#[component]
pub fn CityDetails(
    id: Option<String>,
    list: CollectionHandle<Vec<City>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = DetailsViewModel::<CityResource>::new(id);

    // Подпись провинции приходит вместе с карточкой города
    let province_label = RwSignal::new(String::new());
    Effect::new(move |_| {
        if let Some(detail) = vm.detail.data() {
            province_label.set(detail.province_name.unwrap_or_default());
        }
    });

    view! {
        <div class="details-container">
            {move || vm.detail.error().map(|e| view! { <div class="error">{e.to_string()}</div> })}
            <div class="details-form">
                <FormField
                    label="Наименование"
                    name="city-name"
                    value=Signal::derive(move || vm.form.with(|f| f.name.clone()))
                    on_input=Callback::new(move |v| vm.update(|f| f.name = v))
                    error=vm.error_for("name")
                    placeholder="Например, Bandung"
                />
                <ReferencePicker<ProvinceResource>
                    label="Провинция"
                    name="city-province"
                    value=Signal::derive(move || vm.form.with(|f| f.province_id.clone()))
                    selected_label=province_label
                    on_select=Callback::new(move |p: Province| vm.update(|f| f.province_id = p.id))
                    error=vm.error_for("provinceId")
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
