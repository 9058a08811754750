//! 登出
//!
//! 清空本地存储并使 Cookie 过期；跳转由调用方或路由服务的认证监听处理。

use crate::storage::BrowserStorage;
use mealmatch_shared::session::{cookie_names, expired_cookie, expired_cookie_variants};
use mealmatch_shared::{REFRESH_TOKEN_COOKIE, SessionStore};
use wasm_bindgen::JsCast;

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

fn write_cookie(document: &web_sys::HtmlDocument, cookie: &str) {
    if let Err(e) = document.set_cookie(cookie) {
        log::warn!("failed to write cookie {}: {:?}", cookie, e);
    }
}

/// 捐赠者登出：清空 LocalStorage，使 refresh token 过期
pub fn sign_out() {
    BrowserStorage.clear();
    if let Some(document) = html_document() {
        write_cookie(&document, &expired_cookie(REFRESH_TOKEN_COOKIE));
    }
    log::info!("signed out");
}

/// 清除站点上的全部客户端状态
///
/// LocalStorage、SessionStorage，以及 `document.cookie` 可见的每个 Cookie
/// （按无域、主机域、上级域三种形式各写一次过期）。
pub fn clear_site_data() {
    BrowserStorage.clear();

    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(session) = window.session_storage().ok().flatten() {
        if let Err(e) = session.clear() {
            log::warn!("failed to clear sessionStorage: {:?}", e);
        }
    }

    let Some(document) = html_document() else {
        return;
    };
    let hostname = window.location().hostname().unwrap_or_default();
    let cookies = document.cookie().unwrap_or_default();
    for name in cookie_names(&cookies) {
        for cookie in expired_cookie_variants(&name, &hostname) {
            write_cookie(&document, &cookie);
        }
    }
    log::info!("site data cleared");
}
