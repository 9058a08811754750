//! `/home` 外壳：侧边栏 + 内容区

use leptos::prelude::*;
use mealmatch_browser::router::use_router;
use mealmatch_browser::clear_site_data;
use mealmatch_shared::route::RecipientRoute;

#[component]
pub fn HomeShell(route: RecipientRoute, children: Children) -> impl IntoView {
    let router = use_router::<RecipientRoute>();
    let (sidebar_open, set_sidebar_open) = signal(true);

    let on_sign_out = move |_| {
        clear_site_data();
        router.go(RecipientRoute::AddRecipient);
    };

    view! {
        <div class="flex min-h-screen bg-base-200 font-sans">
            <aside class=move || {
                if sidebar_open.get() { "w-64 bg-base-100 shadow-xl p-4" } else { "w-20 bg-base-100 shadow-xl p-4" }
            }>
                <div class="flex items-center justify-between mb-6">
                    <Show when=move || sidebar_open.get()>
                        <h2 class="text-xl font-bold">"Dashboard"</h2>
                    </Show>
                    <button
                        class="btn btn-ghost btn-sm"
                        on:click=move |_| set_sidebar_open.update(|open| *open = !*open)
                    >
                        {move || if sidebar_open.get() { "«" } else { "»" }}
                    </button>
                </div>
                <ul class="space-y-2">
                    <li>
                        <button
                            class="btn btn-primary justify-start w-full"
                            on:click=move |_| router.go(RecipientRoute::Inventory)
                        >
                            {move || if sidebar_open.get() { RecipientRoute::Inventory.title() } else { "I" }}
                        </button>
                    </li>
                </ul>
                <button class="btn btn-outline btn-error w-full mt-8" on:click=on_sign_out>
                    {move || if sidebar_open.get() { "Sign out" } else { "⎋" }}
                </button>
            </aside>

            <main class="flex-1 p-4 md:p-8">
                <div class="max-w-6xl mx-auto space-y-6">
                    <h1 class="text-2xl font-bold">{route.title()}</h1>
                    {children()}
                </div>
            </main>
        </div>
    }
}
