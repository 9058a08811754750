use leptos::prelude::*;
use leptos::task::spawn_local;
use mealmatch_browser::gateway;
use mealmatch_shared::protocol::GetInventoryRequest;
use mealmatch_shared::{InventoryItem, InventoryStatus};

fn status_badge(status: InventoryStatus) -> &'static str {
    match status {
        InventoryStatus::Fulfilled => "badge badge-success",
        InventoryStatus::Unfulfilled => "badge badge-error",
        InventoryStatus::Pending => "badge badge-warning",
        InventoryStatus::Other => "badge badge-ghost",
    }
}

#[component]
pub fn InventoryPage() -> impl IntoView {
    let (items, set_items) = signal(Vec::<InventoryItem>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        spawn_local(async move {
            match gateway().send(&GetInventoryRequest).await {
                Ok(list) => {
                    log::info!("loaded {} inventory items", list.len());
                    set_items.set(list);
                }
                Err(e) => log::error!("failed to fetch inventory: {}", e),
            }
            set_loading.set(false);
        });
    });

    let row = |item: InventoryItem| {
        let badge = status_badge(item.status_kind());
        let special = if item.special_capabilities.is_empty() {
            "-".to_string()
        } else {
            item.special_capabilities.join(", ")
        };
        view! {
            <tr>
                <td class="font-medium">{item.name}</td>
                <td><span class=badge>{item.status}</span></td>
                <td>{item.kind}</td>
                <td>{format!("{} {}", item.quantity, item.unit)}</td>
                <td>{item.packaging_type}</td>
                <td>{item.storage_capability}</td>
                <td>{special}</td>
            </tr>
        }
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex items-center gap-3">
                    <span class="loading loading-spinner text-primary"></span>
                    <p class="text-sm">"Loading inventory details..."</p>
                </div>
            }
        >
            <Show
                when=move || items.with(|i| !i.is_empty())
                fallback=|| view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-center">
                            <h2 class="card-title">"No inventory items found"</h2>
                        </div>
                    </div>
                }
            >
                <div class="card bg-base-100 shadow overflow-x-auto">
                    <div class="card-body">
                        <h2 class="card-title">"Current Inventory"</h2>
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Item"</th>
                                    <th>"Status"</th>
                                    <th>"Type"</th>
                                    <th>"Quantity"</th>
                                    <th>"Packaging"</th>
                                    <th>"Storage"</th>
                                    <th>"Special"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For each=move || items.get() key=|item| item.id.as_string() children=row />
                            </tbody>
                        </table>
                    </div>
                </div>
            </Show>
        </Show>
    }
}
