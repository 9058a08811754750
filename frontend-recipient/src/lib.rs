//! MealMatch 接收方应用
//!
//! 注册接收方并查看库存；没有登录流程，路由不做认证守卫。

mod components {
    pub mod add_recipient;
    pub mod home_shell;
    pub mod inventory;
}

use crate::components::add_recipient::AddRecipientPage;
use crate::components::home_shell::HomeShell;
use crate::components::inventory::InventoryPage;

use leptos::prelude::*;
use mealmatch_browser::router::{RouterOutlet, provide_router};
use mealmatch_shared::route::RecipientRoute;

/// 路由匹配函数
fn route_matcher(route: RecipientRoute) -> AnyView {
    match route {
        RecipientRoute::AddRecipient => view! { <AddRecipientPage /> }.into_any(),
        RecipientRoute::Inventory => view! {
            <HomeShell route=route>
                <InventoryPage />
            </HomeShell>
        }
        .into_any(),
        RecipientRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_router::<RecipientRoute>(Signal::stored(false));

    view! { <RouterOutlet matcher=route_matcher /> }
}
