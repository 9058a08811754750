use crate::auth::{login, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mealmatch_browser::router::use_router;
use mealmatch_browser::{AddressPicker, alert, gateway};
use mealmatch_shared::ClientError;
use mealmatch_shared::address::AddressSync;
use mealmatch_shared::route::DonorRoute;
use mealmatch_shared::validation::SignupForm;

fn signup_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Conflict(message) if !message.is_empty() => message.clone(),
        ClientError::Conflict(_) => "User already exists".to_string(),
        _ => "Signup failed. Please try again.".to_string(),
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router::<DonorRoute>();

    let form = RwSignal::new(SignupForm::default());
    let address = RwSignal::new(AddressSync::default());
    let (is_submitting, set_is_submitting) = signal(false);

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
            match gateway().send(&req).await {
                Ok(tokens) => {
                    log::info!("donor {} signed up", tokens.donor_id);
                    login(&auth, &tokens);
                }
                Err(e) => {
                    log::error!("signup failed: {}", e);
                    alert(&signup_error_message(&e));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create a donor account"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.name.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.password.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <AddressPicker sync=address />

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="email">
                                    <span class="label-text">"Email"</span>
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                                    prop:value=move || form.with(|f| f.email.clone())
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="phone">
                                    <span class="label-text">"Phone"</span>
                                </label>
                                <input
                                    id="phone"
                                    type="tel"
                                    on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                                    prop:value=move || form.with(|f| f.phone.clone())
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "Creating account..." } else { "Sign up" }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <a class="link link-primary" on:click=move |_| router.go(DonorRoute::Login)>
                                "Log in"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
