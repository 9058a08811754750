//! MealMatch 捐赠者应用
//!
//! 采用 Context-Driven 的架构：
//! - `mealmatch_shared::route`: 路由定义（领域模型）
//! - `mealmatch_browser::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod create_donation;
    pub mod donation_form;
    pub mod donation_history;
    pub mod home_shell;
    pub mod login;
    pub mod settings;
    pub mod signup;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::create_donation::CreateDonationPage;
use crate::components::donation_history::DonationHistoryPage;
use crate::components::home_shell::HomeShell;
use crate::components::login::LoginPage;
use crate::components::settings::SettingsPage;
use crate::components::signup::SignupPage;

use leptos::prelude::*;
use mealmatch_browser::router::{RouterOutlet, provide_router};
use mealmatch_shared::route::DonorRoute;

/// 路由匹配函数
fn route_matcher(route: DonorRoute) -> AnyView {
    match route {
        DonorRoute::Login => view! { <LoginPage /> }.into_any(),
        DonorRoute::Signup => view! { <SignupPage /> }.into_any(),
        DonorRoute::DonationHistory => view! {
            <HomeShell route=route>
                <DonationHistoryPage />
            </HomeShell>
        }
        .into_any(),
        DonorRoute::CreateDonation => view! {
            <HomeShell route=route>
                <CreateDonationPage />
            </HomeShell>
        }
        .into_any(),
        DonorRoute::Settings => view! {
            <HomeShell route=route>
                <SettingsPage />
            </HomeShell>
        }
        .into_any(),
        DonorRoute::NotFound => view! {
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
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 从 LocalStorage 恢复登录状态
    init_auth(&auth_ctx);

    // 3. 注入认证信号到路由服务
    provide_router::<DonorRoute>(auth_ctx.is_authenticated_signal());

    view! { <RouterOutlet matcher=route_matcher /> }
}
