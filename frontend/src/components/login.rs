use crate::api::report_server_message;
use crate::auth::{login, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mealmatch_browser::router::use_router;
use mealmatch_browser::{alert, gateway};
use mealmatch_shared::route::DonorRoute;
use mealmatch_shared::validation::LoginForm;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router::<DonorRoute>();

    let form = RwSignal::new(LoginForm::default());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match form.get_untracked().validate() {
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
                    log::info!("donor {} logged in", tokens.donor_id);
                    login(&auth, &tokens);
                }
                Err(e) => report_server_message(&auth, &e, "Login failed"),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"MealMatch"</h1>
                    <p class="text-base-content/70">"Sign in to manage your donations"</p>
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
                                placeholder="••••••••"
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.password.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Don't have an account? "
                            <a class="link link-primary" on:click=move |_| router.go(DonorRoute::Signup)>
                                "Sign up"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
