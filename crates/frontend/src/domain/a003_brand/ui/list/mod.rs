use crate::domain::a003_brand::ui::details::BrandDetails;
use crate::shared::date_utils::format_created_at;
use crate::shared::entity::{EditTarget, ListViewModel};
use crate::shared::list_page::{DeleteConfirmation, ListHeader, ListStatus, RowActions};
use crate::shared::list_utils::highlight_matches;
use crate::shared::modal::Modal;
use contracts::domain::a003_brand::aggregate::BrandResource;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn BrandList() -> impl IntoView {
    let vm = ListViewModel::<BrandResource>::new();
    let filter = vm.search.effective();

    view! {
        <div class="page">
            <ListHeader vm=vm create_label="Новый бренд" />
            <ListStatus vm=vm />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"ID"</th>
                            <th class="table__header-cell">"Наименование"</th>
                            <th class="table__header-cell">"Создано"</th>
                            <th class="table__header-cell table__header-cell--actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || vm.items().into_iter().map(|row| {
                            let id_for_click = row.id.clone();
                            let id_for_edit = row.id.clone();
                            let for_delete = row.clone();
                            view! {
                                <tr class="table__row" on:click=move |_| vm.open_edit(id_for_click.clone())>
                                    <td class="table__cell">{row.id.clone()}</td>
                                    <td class="table__cell">{highlight_matches(&row.name, &filter.get_untracked())}</td>
                                    <td class="table__cell">{format_created_at(row.created_at.as_ref())}</td>
                                    <RowActions
                                        on_edit=Callback::new(move |_| vm.open_edit(id_for_edit.clone()))
                                        on_delete=Callback::new(move |_| vm.request_delete(&for_delete))
                                    />
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            {move || vm.editing.get().map(|target| {
                let title = match target {
                    EditTarget::New => "Новый бренд",
                    EditTarget::Existing(_) => "Бренд",
                };
                let close = Callback::new(move |_| vm.close_editor());
                view! {
                    <Modal title=title.to_string() on_close=close>
                        <BrandDetails id=target.id() list=vm.list on_close=close />
                    </Modal>
                }
            })}

            <DeleteConfirmation vm=vm />
        </div>
    }
}
