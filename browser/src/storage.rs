//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现共享层的 `SessionStore`。

use mealmatch_shared::SessionStore;

/// 浏览器 LocalStorage
///
/// 所有操作在无法获取 Storage 时静默失败（返回 `None` / `false`）。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn clear(&self) -> bool {
        Self::storage().and_then(|s| s.clear().ok()).is_some()
    }
}
