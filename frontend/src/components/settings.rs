//! 账户设置：名称、密码、联系方式三个独立区块

use crate::api::report_error;
use crate::auth::{logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mealmatch_browser::{AddressPicker, alert, gateway, reset_after};
use mealmatch_shared::address::AddressSync;
use mealmatch_shared::protocol::GetDonorRequest;
use mealmatch_shared::validation::{DetailsForm, PasswordForm, validate_name};

/// 成功提示的显示时长
const SUCCESS_MS: u64 = 3000;

/// 单个区块的请求状态
#[derive(Clone, Copy)]
struct SectionState {
    saving: RwSignal<bool>,
    saved: RwSignal<bool>,
}

impl SectionState {
    fn new() -> Self {
        Self {
            saving: RwSignal::new(false),
            saved: RwSignal::new(false),
        }
    }

    fn begin(&self) {
        self.saving.set(true);
        self.saved.set(false);
    }

    fn finish(&self, ok: bool) {
        self.saving.set(false);
        if ok {
            self.saved.set(true);
            reset_after(self.saved, SUCCESS_MS);
        }
    }
}

#[component]
fn SectionFooter(
    state: SectionState,
    label: &'static str,
    success: &'static str,
) -> impl IntoView {
    view! {
        <div class="card-actions items-center justify-end">
            <Show when=move || state.saved.get()>
                <span class="text-success text-sm">{success}</span>
            </Show>
            <button type="submit" class="btn btn-primary" disabled=move || state.saving.get()>
                {move || if state.saving.get() { "Saving..." } else { label }}
            </button>
        </div>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();

    let name = RwSignal::new(String::new());
    let passwords = RwSignal::new(PasswordForm::default());
    let address = RwSignal::new(AddressSync::default());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());

    let name_state = SectionState::new();
    let password_state = SectionState::new();
    let details_state = SectionState::new();

    // 挂载时预填资料
    Effect::new(move |_| {
        spawn_local(async move {
            match gateway().send(&GetDonorRequest).await {
                Ok(donor) => {
                    let details = DetailsForm::from_donor(&donor);
                    name.set(donor.name);
                    address.set(AddressSync::new(&details.address, Some(donor.location)));
                    email.set(details.email);
                    phone.set(details.phone);
                }
                Err(e) => report_error(&auth, &e, "Failed to fetch donor details"),
            }
        });
    });

    let on_name = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match validate_name(&name.get_untracked()) {
            Ok(req) => req,
            Err(e) => return alert(&e.to_string()),
        };

        name_state.begin();
        spawn_local(async move {
            let result = gateway().send(&req).await;
            name_state.finish(result.is_ok());
            if let Err(e) = result {
                report_error(&auth, &e, "Name update failed");
            }
        });
    };

    let on_password = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match passwords.get_untracked().validate() {
            Ok(req) => req,
            Err(e) => return alert(&e.to_string()),
        };

        password_state.begin();
        spawn_local(async move {
            let result = gateway().send(&req).await;
            password_state.finish(result.is_ok());
            match result {
                Ok(()) => passwords.set(PasswordForm::default()),
                Err(e) => report_error(&auth, &e, "Password update failed"),
            }
        });
    };

    let on_details = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = address.with_untracked(|a| DetailsForm {
            address: a.text.clone(),
            latitude: a.location.map(|l| l.latitude.to_string()).unwrap_or_default(),
            longitude: a.location.map(|l| l.longitude.to_string()).unwrap_or_default(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
        });
        let req = match form.validate() {
            Ok(req) => req,
            Err(e) => return alert(&e.to_string()),
        };

        details_state.begin();
        spawn_local(async move {
            let result = gateway().send(&req).await;
            details_state.finish(result.is_ok());
            if let Err(e) = result {
                report_error(&auth, &e, "Details update failed");
            }
        });
    };

    view! {
        <div class="grid lg:grid-cols-2 gap-6">
            <form class="card bg-base-100 shadow" on:submit=on_name>
                <div class="card-body">
                    <h2 class="card-title">"Display Name"</h2>
                    <input
                        type="text"
                        on:input=move |ev| name.set(event_target_value(&ev))
                        prop:value=name
                        class="input input-bordered w-full"
                    />
                    <SectionFooter state=name_state label="Update Name" success="Name updated successfully!" />
                </div>
            </form>

            <form class="card bg-base-100 shadow" on:submit=on_password>
                <div class="card-body">
                    <h2 class="card-title">"Password"</h2>
                    <input
                        type="password"
                        placeholder="Current password"
                        on:input=move |ev| passwords.update(|p| p.old_password = event_target_value(&ev))
                        prop:value=move || passwords.with(|p| p.old_password.clone())
                        class="input input-bordered w-full"
                    />
                    <input
                        type="password"
                        placeholder="New password"
                        on:input=move |ev| passwords.update(|p| p.new_password = event_target_value(&ev))
                        prop:value=move || passwords.with(|p| p.new_password.clone())
                        class="input input-bordered w-full"
                    />
                    <SectionFooter state=password_state label="Update Password" success="Password updated successfully!" />
                </div>
            </form>

            <form class="card bg-base-100 shadow lg:col-span-2" on:submit=on_details>
                <div class="card-body">
                    <h2 class="card-title">"Contact Details"</h2>
                    <AddressPicker sync=address />
                    <div class="grid grid-cols-2 gap-4">
                        <input
                            type="email"
                            placeholder="Email"
                            on:input=move |ev| email.set(event_target_value(&ev))
                            prop:value=email
                            class="input input-bordered w-full"
                        />
                        <input
                            type="tel"
                            placeholder="Phone"
                            on:input=move |ev| phone.set(event_target_value(&ev))
                            prop:value=phone
                            class="input input-bordered w-full"
                        />
                    </div>
                    <SectionFooter state=details_state label="Update Details" success="Contact details updated successfully!" />
                </div>
            </form>
        </div>

        <div class="flex justify-end">
            <button class="btn btn-outline btn-error" on:click=move |_| logout(&auth)>
                "Sign out"
            </button>
        </div>
    }
}
