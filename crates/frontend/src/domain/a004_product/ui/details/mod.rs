use crate::shared::entity::DetailsViewModel;
use crate::shared::form::{FormActions, FormField};
use crate::shared::picker::ReferencePicker;
use crate::shared::remote::CollectionHandle;
use contracts::domain::a003_brand::aggregate::{Brand, BrandResource};
use contracts::domain::a004_product::aggregate::{Product, ProductResource};
use leptos::prelude::*;

#[component]
pub fn ProductDetails(
    id: Option<String>,
    list: CollectionHandle<Vec<Product>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = DetailsViewModel::<ProductResource>::new(id);

    let brand_label = RwSignal::new(String::new());
    Effect::new(move |_| {
        if let Some(detail) = vm.detail.data() {
            brand_label.set(detail.brand_name.unwrap_or_default());
        }
    });

    view! {
        <div class="details-container">
            {move || vm.detail.error().map(|e| view! { <div class="error">{e.to_string()}</div> })}
            <div class="details-form">
                <FormField
                    label="Наименование"
                    name="product-name"
                    value=Signal::derive(move || vm.form.with(|f| f.name.clone()))
                    on_input=Callback::new(move |v| vm.update(|f| f.name = v))
                    error=vm.error_for("name")
                />
                <FormField
                    label="Описание"
                    name="product-description"
                    multiline=true
                    value=Signal::derive(move || vm.form.with(|f| f.description.clone()))
                    on_input=Callback::new(move |v| vm.update(|f| f.description = v))
                    error=vm.error_for("description")
                />
                <div class="form-row">
                    <FormField
                        label="Цена"
                        name="product-price"
                        numeric=true
                        value=Signal::derive(move || vm.form.with(|f| f.price.clone()))
                        on_input=Callback::new(move |v| vm.update(|f| f.price = v))
                        error=vm.error_for("price")
                        placeholder="15000"
                    />
                    <FormField
                        label="Количество"
                        name="product-quantity"
                        numeric=true
                        value=Signal::derive(move || vm.form.with(|f| f.quantity.clone()))
                        on_input=Callback::new(move |v| vm.update(|f| f.quantity = v))
                        error=vm.error_for("quantity")
                        placeholder="0"
                    />
                </div>
                <ReferencePicker<BrandResource>
                    label="Бренд"
                    name="product-brand"
                    value=Signal::derive(move || vm.form.with(|f| f.brand_id.clone()))
                    selected_label=brand_label
                    on_select=Callback::new(move |b: Brand| vm.update(|f| f.brand_id = b.id))
                    error=vm.error_for("brandId")
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
