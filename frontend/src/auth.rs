//! 认证模块
//!
//! 管理登录状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use leptos::prelude::*;
use mealmatch_browser::{BrowserStorage, sign_out};
use mealmatch_shared::{AuthTokens, SessionStore};

/// 认证状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub donor_id: Option<String>,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 从 LocalStorage 恢复登录状态
pub fn init_auth(ctx: &AuthContext) {
    let store = BrowserStorage;
    ctx.set_state.set(AuthState {
        is_authenticated: store.is_signed_in(),
        donor_id: store.donor_id(),
    });
}

/// 保存登录凭据并更新状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub fn login(ctx: &AuthContext, tokens: &AuthTokens) {
    if !BrowserStorage.store_tokens(tokens) {
        log::warn!("failed to persist auth tokens");
    }
    ctx.set_state.set(AuthState {
        is_authenticated: true,
        donor_id: Some(tokens.donor_id.as_string()),
    });
}

/// 注销并清除状态
pub fn logout(ctx: &AuthContext) {
    sign_out();
    ctx.set_state.set(AuthState::default());
}
