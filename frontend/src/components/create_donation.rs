//! 创建捐赠：表单 → 候选接收方 → (AI 推荐) → 确认

use crate::api::report_error;
use crate::auth::use_auth;
use crate::components::donation_form::DonationFormView;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mealmatch_browser::gateway;
use mealmatch_shared::validation::DonationForm;
use mealmatch_shared::workflow::{DonationWorkflow, Stage};
use mealmatch_shared::{AcceptedType, ClientResult, RecordId, Recipient};

/// 当前进行中的请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Busy {
    Submitting,
    Matching,
    Creating,
}

fn accepted_summary(types: &[AcceptedType]) -> String {
    types
        .iter()
        .map(|t| format!("{} (min {} {})", t.kind, t.min_quantity, t.unit))
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
pub fn CreateDonationPage() -> impl IntoView {
    let auth = use_auth();

    let form = RwSignal::new(DonationForm::default());
    let workflow = RwSignal::new(DonationWorkflow::new());
    let busy = RwSignal::new(None::<Busy>);

    let is_busy = move |action: Busy| busy.get() == Some(action);

    let on_submit = Callback::new(move |_| {
        if busy.get_untracked().is_some() {
            return;
        }
        let mut wf = workflow.get_untracked();
        let value = form.get_untracked();
        busy.set(Some(Busy::Submitting));

        spawn_local(async move {
            let result = wf.submit(&gateway(), &value).await;
            workflow.set(wf);
            busy.set(None);
            if let Err(e) = result {
                report_error(&auth, &e, "Submission failed");
            }
        });
    });

    let on_ai_match = move |_| {
        let mut wf = workflow.get_untracked();
        busy.set(Some(Busy::Matching));

        spawn_local(async move {
            let result = wf.request_ai_match(&gateway()).await;
            workflow.set(wf);
            busy.set(None);
            if let Err(e) = result {
                report_error(&auth, &e, "AI matching failed");
            }
        });
    };

    let finish = move |result: ClientResult<()>, wf: DonationWorkflow| {
        workflow.set(wf);
        busy.set(None);
        match result {
            Ok(()) => form.set(DonationForm::default()),
            Err(e) => report_error(&auth, &e, "Error"),
        }
    };

    let select = move |recipient_id: RecordId| {
        let mut wf = workflow.get_untracked();
        busy.set(Some(Busy::Creating));

        spawn_local(async move {
            let result = wf.select_recipient(&gateway(), &recipient_id).await;
            finish(result, wf);
        });
    };

    let on_accept = move |_| {
        let mut wf = workflow.get_untracked();
        busy.set(Some(Busy::Creating));

        spawn_local(async move {
            let result = wf.accept_recommendation(&gateway()).await;
            finish(result, wf);
        });
    };

    let stage = move || workflow.with(|wf| wf.stage());

    let candidate_card = move |recipient: Recipient| {
        let id = recipient.id.clone();
        let is_recommended = {
            let id = id.clone();
            move || {
                workflow.with(|wf| {
                    wf.recommendation()
                        .is_some_and(|rec| rec.recipient_id == id)
                })
            }
        };
        let storage = recipient.storage_capabilities.join(", ");
        let special = recipient.special_capabilities.join(", ");
        let accepted = accepted_summary(&recipient.accepted_types);

        view! {
            <div class=move || {
                if is_recommended() {
                    "card bg-base-100 shadow border-2 border-primary"
                } else {
                    "card bg-base-100 shadow"
                }
            }>
                <div class="card-body">
                    <h3 class="card-title">{recipient.name.clone()}</h3>
                    <p class="text-sm text-base-content/70">{recipient.address.clone()}</p>
                    <p class="text-sm">"Accepts: " {accepted}</p>
                    <p class="text-sm">"Storage: " {storage}</p>
                    {(!special.is_empty()).then(|| view! { <p class="text-sm">"Special: " {special}</p> })}
                    <p class="text-xs text-base-content/60">
                        {recipient.contact.email.clone()} " · " {recipient.contact.phone.clone()}
                    </p>
                    <div class="card-actions justify-end">
                        <button
                            class="btn btn-sm btn-primary"
                            disabled=move || busy.get().is_some()
                            on:click=move |_| select(id.clone())
                        >
                            "Donate to this recipient"
                        </button>
                    </div>
                </div>
            </div>
        }
    };

    view! {
        <DonationFormView
            form=form
            is_loading=Signal::derive(move || is_busy(Busy::Submitting))
            on_submit=on_submit
        />

        <Show when=move || stage() == Stage::DonationCreated>
            <div role="alert" class="alert alert-success">
                <span>"Your donation has been made"</span>
            </div>
        </Show>

        <Show when=move || stage() == Stage::AiMatched>
            <div class="card bg-base-100 shadow border border-primary">
                <div class="card-body">
                    <h2 class="card-title">"AI Recommendation"</h2>
                    <p class="font-semibold">
                        {move || workflow.with(|wf| {
                            wf.recommendation().map(|r| r.recipient_name.clone()).unwrap_or_default()
                        })}
                    </p>
                    <p class="text-sm text-base-content/70">
                        {move || workflow.with(|wf| {
                            wf.recommendation().map(|r| r.justification.clone()).unwrap_or_default()
                        })}
                    </p>
                    <div class="card-actions justify-end">
                        <button
                            class="btn btn-primary"
                            disabled=move || {
                                busy.get().is_some()
                                    || workflow.with(|wf| wf.recommended_recipient().is_none())
                            }
                            on:click=on_accept
                        >
                            {move || if is_busy(Busy::Creating) { "Creating donation..." } else { "Accept Recommendation" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>

        <Show when=move || stage().has_candidates()>
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-bold">
                    "Recipients Found "
                    <span class="badge badge-neutral">{move || workflow.with(|wf| wf.candidates().len())}</span>
                </h2>
                <button
                    class="btn btn-secondary"
                    disabled=move || busy.get().is_some()
                    on:click=on_ai_match
                >
                    {move || if is_busy(Busy::Matching) { "Matching..." } else { "Match with AI" }}
                </button>
            </div>
            <Show
                when=move || workflow.with(|wf| !wf.candidates().is_empty())
                fallback=|| view! { <p class="text-base-content/70">"No recipients matched this donation."</p> }
            >
                <div class="grid md:grid-cols-2 gap-4">
                    <For
                        each=move || workflow.with(|wf| wf.candidates().to_vec())
                        key=|r| r.id.as_string()
                        children=candidate_card
                    />
                </div>
            </Show>
        </Show>
    }
}
