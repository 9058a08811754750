//! 接收方注册表单

use leptos::prelude::*;
use leptos::task::spawn_local;
use mealmatch_browser::router::use_router;
use mealmatch_browser::{AddressPicker, alert, gateway};
use mealmatch_shared::address::AddressSync;
use mealmatch_shared::route::RecipientRoute;
use mealmatch_shared::validation::{
    ACCEPTED_TYPE_OPTIONS, DAYS_OF_WEEK, RecipientForm, STORAGE_OPTIONS, UNIT_OPTIONS,
};
use mealmatch_shared::{AcceptedType, ClientError, STORAGE_RECIPIENT_ID, SessionStore};

fn add_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Conflict(message) if !message.is_empty() => message.clone(),
        ClientError::Conflict(_) => "Recipient already exists".to_string(),
        _ => err.server_message_or("Failed to add recipient"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[component]
pub fn AddRecipientPage() -> impl IntoView {
    let router = use_router::<RecipientRoute>();

    let form = RwSignal::new(RecipientForm::default());
    let address = RwSignal::new(AddressSync::default());
    let (is_submitting, set_is_submitting) = signal(false);

    // 只在行数变化时重建可接收类型列表
    let type_count = Memo::new(move |_| form.with(|f| f.accepted_types.len()));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut value = form.get_untracked();
        address.with_untracked(|a| {
            value.address = a.text.clone();
            value.location = a.location;
        });

        let req = match value.validate() {
            Ok(req) => req,
            Err(e) => {
                alert(&e.to_string());
                return;
            }
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            let gw = gateway();
            match gw.send(&req).await {
                Ok(resp) => {
                    if let Some(id) = resp.recipient_id {
                        gw.store().set(STORAGE_RECIPIENT_ID, &id.as_string());
                    }
                    log::info!("recipient {} registered", req.name);
                    alert("Recipient added successfully!");
                    router.go(RecipientRoute::Inventory);
                }
                Err(e) => {
                    log::error!("add recipient failed: {}", e);
                    alert(&add_error_message(&e));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let accepted_row = move |index: usize| {
        let update_row = move |apply: &dyn Fn(&mut AcceptedType)| {
            form.update(|f| {
                if let Some(t) = f.accepted_types.get_mut(index) {
                    apply(t);
                }
            });
        };
        let current = move |get: fn(&AcceptedType) -> String| {
            move || form.with(|f| f.accepted_types.get(index).map(get).unwrap_or_default())
        };
        let kind = current(|t| t.kind.clone());
        let unit = current(|t| t.unit.clone());

        view! {
            <div class="grid grid-cols-4 gap-2 items-end">
                <select
                    class="select select-bordered"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        update_row(&|t| t.kind = value.clone());
                    }
                >
                    {ACCEPTED_TYPE_OPTIONS
                        .iter()
                        .map(|opt| view! { <option value=*opt selected=move || kind() == *opt>{capitalize(opt)}</option> })
                        .collect_view()}
                </select>
                <input
                    type="number"
                    min="0"
                    class="input input-bordered"
                    on:input=move |ev| {
                        // 非数字输入按 0 处理
                        let quantity = event_target_value(&ev).trim().parse().unwrap_or(0);
                        update_row(&|t| t.min_quantity = quantity);
                    }
                    prop:value=current(|t| t.min_quantity.to_string())
                />
                <select
                    class="select select-bordered"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        update_row(&|t| t.unit = value.clone());
                    }
                >
                    {UNIT_OPTIONS
                        .iter()
                        .map(|opt| view! { <option value=*opt selected=move || unit() == *opt>{*opt}</option> })
                        .collect_view()}
                </select>
                <Show when=move || (type_count.get() >= 2)>
                    <button
                        type="button"
                        class="btn btn-ghost btn-sm text-error"
                        on:click=move |_| form.update(|f| f.remove_accepted_type(index))
                    >
                        "Remove"
                    </button>
                </Show>
            </div>
        }
    };

    let storage_checkbox = move |option: &'static str| {
        view! {
            <label class="label cursor-pointer justify-start gap-2">
                <input
                    type="checkbox"
                    class="checkbox checkbox-primary"
                    prop:checked=move || form.with(|f| f.storage_capabilities.iter().any(|c| c == option))
                    on:change=move |_| form.update(|f| f.toggle_storage(option))
                />
                <span class="label-text">{capitalize(option)}</span>
            </label>
        }
    };

    let open_hours_row = move |(index, day): (usize, &'static str)| {
        view! {
            <div class="grid grid-cols-3 gap-2 items-center">
                <span class="label-text">{capitalize(day)}</span>
                <input
                    type="text"
                    placeholder="10:00-21:00, 14:00-18:00"
                    class="input input-bordered input-sm col-span-2"
                    on:input=move |ev| form.update(|f| f.open_hours[index] = event_target_value(&ev))
                    prop:value=move || form.with(|f| f.open_hours[index].clone())
                />
            </div>
        }
    };

    let text_input = move |id: &'static str,
                           label: &'static str,
                           kind: &'static str,
                           write: fn(&mut RecipientForm, String),
                           read: fn(&RecipientForm) -> String| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    class="input input-bordered w-full"
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| write(f, value));
                    }
                    prop:value=move || form.with(read)
                />
            </div>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-4xl mx-auto">
                <h1 class="text-2xl font-bold mb-6">"Register Recipient"</h1>
                <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                    <div class="card-body space-y-4">
                        {text_input("name", "Organization Name", "text", |f, v| f.name = v, |f| f.name.clone())}

                        <AddressPicker sync=address />

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="status">
                                    <span class="label-text">"Status"</span>
                                </label>
                                <select
                                    id="status"
                                    class="select select-bordered w-full"
                                    on:change=move |ev| form.update(|f| f.status = event_target_value(&ev))
                                >
                                    <option value="active" selected=move || form.with(|f| f.status == "active")>"Active"</option>
                                    <option value="inactive" selected=move || form.with(|f| f.status == "inactive")>"Inactive"</option>
                                </select>
                            </div>
                            {text_input("timezone", "Timezone", "text", |f, v| f.timezone = v, |f| f.timezone.clone())}
                        </div>

                        <div class="grid grid-cols-2 gap-4">
                            {text_input("email", "Email", "email", |f, v| f.email = v, |f| f.email.clone())}
                            {text_input("phone", "Phone", "tel", |f, v| f.phone = v, |f| f.phone.clone())}
                        </div>

                        <div class="form-control">
                            <label class="label" for="description">
                                <span class="label-text">"Description"</span>
                            </label>
                            <textarea
                                id="description"
                                rows="3"
                                placeholder="Describe the organization and its mission"
                                class="textarea textarea-bordered w-full"
                                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.description.clone())
                            ></textarea>
                        </div>

                        <div>
                            <div class="flex items-center justify-between">
                                <span class="label-text font-semibold">"Accepted Food Types"</span>
                                <button
                                    type="button"
                                    class="btn btn-ghost btn-sm"
                                    on:click=move |_| form.update(|f| f.add_accepted_type())
                                >
                                    "+ Add Type"
                                </button>
                            </div>
                            <div class="space-y-2 mt-2">
                                {move || (0..type_count.get()).map(accepted_row).collect_view()}
                            </div>
                        </div>

                        <div>
                            <span class="label-text font-semibold">"Storage Capabilities"</span>
                            <div class="flex flex-wrap gap-4">
                                {STORAGE_OPTIONS.into_iter().map(storage_checkbox).collect_view()}
                            </div>
                        </div>

                        <div>
                            <span class="label-text font-semibold">"Open Hours"</span>
                            <div class="space-y-2 mt-2">
                                {DAYS_OF_WEEK.into_iter().enumerate().map(open_hours_row).collect_view()}
                            </div>
                        </div>

                        <div class="card-actions justify-end">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Adding..." }.into_any()
                                } else {
                                    "Add Recipient".into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </form>
            </div>
        </div>
    }
}
