//! `/home` 下各页面的外壳：侧边栏导航 + 内容区

use crate::auth::{logout, use_auth};
use leptos::prelude::*;
use mealmatch_browser::router::use_router;
use mealmatch_shared::route::DonorRoute;

#[component]
pub fn HomeShell(route: DonorRoute, children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router::<DonorRoute>();

    // 侧边栏：展开 / 收起
    let (sidebar_open, set_sidebar_open) = signal(true);

    let nav_items = DonorRoute::HOME_PAGES
        .into_iter()
        .map(|page| {
            let class = if page == route {
                "btn btn-primary justify-start w-full"
            } else {
                "btn btn-ghost justify-start w-full"
            };
            view! {
                <li>
                    <button class=class on:click=move |_| router.go(page)>
                        {move || {
                            if sidebar_open.get() {
                                page.title().to_string()
                            } else {
                                page.title().chars().take(1).collect::<String>()
                            }
                        }}
                    </button>
                </li>
            }
        })
        .collect_view();

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
                <ul class="space-y-2">{nav_items}</ul>
                <button class="btn btn-outline btn-error w-full mt-8" on:click=move |_| logout(&auth)>
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
