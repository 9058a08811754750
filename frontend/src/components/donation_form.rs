//! 捐赠表单组件
//!
//! 只负责输入渲染；校验与提交由 `CreateDonationPage` 的流程处理。

use leptos::prelude::*;
use mealmatch_shared::validation::DonationForm;

const FOOD_TYPES: [(&str, &str); 2] = [("prepared", "Prepared Meals"), ("raw", "Raw Ingredients")];
const UNITS: [(&str, &str); 2] = [("kg", "Kg"), ("meals", "Meals")];
const PACKAGING_TYPES: [(&str, &str); 5] = [
    ("bulk", "Bulk Packaging"),
    ("individual", "Individual Portions"),
    ("sealed_containers", "Sealed Containers"),
    ("vacuum_sealed", "Vacuum Sealed"),
    ("loose", "Loose (unpackaged)"),
];
const STORAGE_REQUIREMENTS: [(&str, &str); 4] = [
    ("frozen", "Frozen"),
    ("refrigerated", "Refrigerated"),
    ("shelf_stable", "Shelf Stable"),
    ("dry", "Dry"),
];

/// 下拉框：选项为 (值, 文本)
fn select_options(
    options: &'static [(&'static str, &'static str)],
    current: impl Fn() -> String + Copy + Send + Sync + 'static,
) -> impl IntoView {
    options
        .iter()
        .map(|(value, text)| {
            view! {
                <option value=*value selected=move || current() == *value>
                    {*text}
                </option>
            }
        })
        .collect_view()
}

#[component]
pub fn DonationFormView(
    form: RwSignal<DonationForm>,
    #[prop(into)] is_loading: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    // 饮食选项输入框（不属于提交内容）
    let special_input = RwSignal::new(String::new());

    let add_special = move |_| {
        let raw = special_input.get_untracked();
        let mut added = false;
        form.update(|f| added = f.add_capability(&raw));
        if added {
            special_input.set(String::new());
        }
    };

    let tag = move |capability: String| {
        let label = capability.clone();
        view! {
            <span class="badge badge-lg gap-2">
                {label}
                <button
                    type="button"
                    class="btn btn-ghost btn-xs"
                    on:click=move |_| form.update(|f| f.set_capability(&capability, false))
                >
                    "✕"
                </button>
            </span>
        }
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body grid lg:grid-cols-2 gap-8">
                <div class="space-y-4">
                    <div class="form-control">
                        <label class="label" for="donation_name">
                            <span class="label-text">"Donation Name"</span>
                        </label>
                        <input
                            id="donation_name"
                            type="text"
                            placeholder="e.g, Fresh Vegetable Soup"
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                            prop:value=move || form.with(|f| f.name.clone())
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label" for="quantity">
                                <span class="label-text">"Quantity"</span>
                            </label>
                            <input
                                id="quantity"
                                type="number"
                                min="0"
                                placeholder="e.g, 50"
                                on:input=move |ev| form.update(|f| f.quantity = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.quantity.clone())
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="unit">
                                <span class="label-text">"Unit"</span>
                            </label>
                            <select
                                id="unit"
                                class="select select-bordered w-full"
                                on:change=move |ev| form.update(|f| f.unit = event_target_value(&ev))
                            >
                                {select_options(&UNITS, move || form.with(|f| f.unit.clone()))}
                            </select>
                        </div>
                    </div>

                    <div class="form-control">
                        <label class="label" for="food_type">
                            <span class="label-text">"Food Type"</span>
                        </label>
                        <select
                            id="food_type"
                            class="select select-bordered w-full"
                            on:change=move |ev| form.update(|f| f.kind = event_target_value(&ev))
                        >
                            {select_options(&FOOD_TYPES, move || form.with(|f| f.kind.clone()))}
                        </select>
                    </div>

                    <div class="form-control">
                        <label class="label" for="pickup_time">
                            <span class="label-text">"Pickup Time"</span>
                        </label>
                        <input
                            id="pickup_time"
                            type="datetime-local"
                            on:input=move |ev| form.update(|f| f.donation_pickup_time = event_target_value(&ev))
                            prop:value=move || form.with(|f| f.donation_pickup_time.clone())
                            class="input input-bordered w-full"
                        />
                    </div>
                </div>

                <div class="space-y-4">
                    <div class="form-control">
                        <label class="label" for="packaging_type">
                            <span class="label-text">"Packaging Type"</span>
                        </label>
                        <select
                            id="packaging_type"
                            class="select select-bordered w-full"
                            on:change=move |ev| form.update(|f| f.packaging_type = event_target_value(&ev))
                        >
                            {select_options(&PACKAGING_TYPES, move || form.with(|f| f.packaging_type.clone()))}
                        </select>
                    </div>

                    <div class="form-control">
                        <label class="label" for="storage_capability">
                            <span class="label-text">"Storage Requirements"</span>
                        </label>
                        <select
                            id="storage_capability"
                            class="select select-bordered w-full"
                            on:change=move |ev| form.update(|f| f.storage_capability = event_target_value(&ev))
                        >
                            {select_options(&STORAGE_REQUIREMENTS, move || form.with(|f| f.storage_capability.clone()))}
                        </select>
                    </div>

                    <div class="form-control">
                        <label class="label" for="special_input">
                            <span class="label-text">"Special Dietary Options"</span>
                        </label>
                        <div class="flex gap-2">
                            <input
                                id="special_input"
                                type="text"
                                placeholder="Enter dietary option"
                                on:input=move |ev| special_input.set(event_target_value(&ev))
                                prop:value=special_input
                                class="input input-bordered flex-1"
                            />
                            <button type="button" class="btn btn-secondary" on:click=add_special>
                                "Add"
                            </button>
                        </div>
                        <div class="flex flex-wrap gap-2 mt-3">
                            <For
                                each=move || form.with(|f| f.special_capabilities.clone())
                                key=|c| c.clone()
                                children=tag
                            />
                        </div>
                    </div>
                </div>

                <div class="lg:col-span-2 flex justify-end">
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || is_loading.get()
                        on:click=move |_| on_submit.run(())
                    >
                        {move || if is_loading.get() {
                            view! { <span class="loading loading-spinner"></span> "Finding recipients..." }.into_any()
                        } else {
                            "Find Recipients".into_any()
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}
