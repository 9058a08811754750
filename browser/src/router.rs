//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，路由表由各应用通过 `Route` 提供。

use leptos::prelude::*;
use mealmatch_shared::route::Route;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送或替换 History 状态
fn write_history(path: &str, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if use_push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        log::warn!("[Router] history update failed: {:?}", e);
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证状态以信号形式注入。
pub struct RouterService<R: Route> {
    current_route: ReadSignal<R>,
    set_route: WriteSignal<R>,
    is_authenticated: Signal<bool>,
}

impl<R: Route> Clone for RouterService<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Route> Copy for RouterService<R> {}

impl<R: Route> RouterService<R> {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial_route = R::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<R> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(R::from_path(path), true);
    }

    pub fn go(&self, route: R) {
        self.navigate_to_route(route, true);
    }

    /// 守卫：返回实际应进入的路由
    fn guard(&self, target: R, is_auth: bool) -> R {
        if target.requires_auth() && !is_auth {
            log::info!("[Router] Access denied to {}. Redirecting.", target);
            return R::auth_failure_redirect();
        }
        if target.should_redirect_when_authenticated() && is_auth {
            log::info!("[Router] Already authenticated. Leaving {}.", target);
            return R::auth_success_redirect();
        }
        target
    }

    fn navigate_to_route(&self, target: R, use_push: bool) {
        let route = self.guard(target, self.is_authenticated.get_untracked());
        write_history(route.to_path(), use_push);
        self.set_route.set(route);
    }

    /// 初始路由：守卫并替换为规范路径（如 `/` → `/login`）
    fn init_current(&self) {
        let initial = self.current_route.get_untracked();
        self.navigate_to_route(initial, false);
    }

    /// 浏览器后退/前进按钮
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = R::from_path(&current_path());
            router.navigate_to_route(target, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            let redirect = router.guard(route.clone(), is_auth);
            if redirect != route {
                log::info!("[Router] Auth state changed, redirecting to {}.", redirect);
                write_history(redirect.to_path(), true);
                router.set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
pub fn provide_router<R: Route>(is_authenticated: Signal<bool>) -> RouterService<R> {
    let router = RouterService::<R>::new(is_authenticated);

    router.init_current();
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router<R: Route>() -> RouterService<R> {
    use_context::<RouterService<R>>()
        .expect("RouterService not found in context. Ensure provide_router was called.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet<R: Route>(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(R) -> AnyView,
) -> impl IntoView {
    let router = use_router::<R>();

    move || matcher(router.current_route().get())
}
