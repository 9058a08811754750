use crate::api::report_error;
use crate::auth::use_auth;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mealmatch_browser::gateway;
use mealmatch_shared::DonationRecord;
use mealmatch_shared::protocol::FetchDonationHistoryRequest;

#[component]
pub fn DonationHistoryPage() -> impl IntoView {
    let auth = use_auth();

    let (donations, set_donations) = signal(Vec::<DonationRecord>::new());
    let (loading, set_loading) = signal(true);

    // 挂载时加载一次
    Effect::new(move |_| {
        spawn_local(async move {
            match gateway().send(&FetchDonationHistoryRequest).await {
                Ok(list) => set_donations.set(list),
                Err(e) if e.is_unauthorized() => report_error(&auth, &e, "Failed to load donations"),
                // 列表为空时展示空状态，仅记录日志
                Err(e) => log::error!("failed to fetch donation history: {}", e),
            }
            set_loading.set(false);
        });
    });

    let row = |d: DonationRecord| {
        let capabilities = if d.special_capabilities.is_empty() {
            "-".to_string()
        } else {
            d.special_capabilities.join(", ")
        };
        view! {
            <tr>
                <td class="font-medium">{d.donation_name}</td>
                <td>{d.recipient_name}</td>
                <td><span class="badge badge-ghost">{d.kind}</span></td>
                <td>{format!("{} {}", d.quantity, d.unit)}</td>
                <td>{d.storage_capability}</td>
                <td>{capabilities}</td>
            </tr>
        }
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex items-center gap-3">
                    <span class="loading loading-spinner text-primary"></span>
                    <p class="text-sm">"Loading your donation history..."</p>
                </div>
            }
        >
            <Show
                when=move || donations.with(|d| !d.is_empty())
                fallback=|| view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-center">
                            <h2 class="card-title">"No donation history found"</h2>
                            <p class="text-base-content/70">"Donations you create will appear here."</p>
                        </div>
                    </div>
                }
            >
                <div class="card bg-base-100 shadow overflow-x-auto">
                    <div class="card-body">
                        <h2 class="card-title">"Your Donations"</h2>
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Donation"</th>
                                    <th>"Recipient"</th>
                                    <th>"Type"</th>
                                    <th>"Quantity"</th>
                                    <th>"Storage"</th>
                                    <th>"Special"</th>
                                </tr>
                            </thead>
                            <tbody>
                                // donation_id 可能缺失，按位置作为 key
                                <For
                                    each=move || donations.get().into_iter().enumerate()
                                    key=|(index, _)| *index
                                    children=move |(_, d)| row(d)
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </Show>
        </Show>
    }
}
