//! 会话存储抽象
//!
//! 浏览器端由 LocalStorage 实现，测试中使用内存实现。

use crate::model::AuthTokens;
use crate::{STORAGE_ACCESS_TOKEN, STORAGE_DONOR_ID, STORAGE_RECIPIENT_ID};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

/// 键值会话存储
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    /// 清空全部键（登出）
    fn clear(&self) -> bool;

    fn donor_id(&self) -> Option<String> {
        self.get(STORAGE_DONOR_ID).filter(|v| !v.is_empty())
    }

    fn access_token(&self) -> Option<String> {
        self.get(STORAGE_ACCESS_TOKEN).filter(|v| !v.is_empty())
    }

    fn recipient_id(&self) -> Option<String> {
        self.get(STORAGE_RECIPIENT_ID).filter(|v| !v.is_empty())
    }

    fn is_signed_in(&self) -> bool {
        self.donor_id().is_some() && self.access_token().is_some()
    }

    fn store_tokens(&self, tokens: &AuthTokens) -> bool {
        self.set(STORAGE_DONOR_ID, &tokens.donor_id.as_string())
            && self.set(STORAGE_ACCESS_TOKEN, &tokens.access_token)
    }
}

// =========================================================
// Cookie 清理
// =========================================================

const EXPIRED: &str = "expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/";

/// 从 `document.cookie` 文本中取出全部 Cookie 名称
pub fn cookie_names(cookies: &str) -> Vec<String> {
    cookies
        .split(';')
        .map(|pair| pair.split_once('=').map_or(pair, |(name, _)| name).trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// 使单个 Cookie 过期的写入串
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; {}", name, EXPIRED)
}

/// 过期写入串：无域、当前主机、主机的上级通配域
///
/// Cookie 可能以任一种 domain 属性写入，需要逐一覆盖。
pub fn expired_cookie_variants(name: &str, hostname: &str) -> [String; 3] {
    [
        expired_cookie(name),
        format!("{}=; {}; domain={}", name, EXPIRED, hostname),
        format!("{}=; {}; domain=.{}", name, EXPIRED, hostname),
    ]
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(donor_id: &str, token: &str) -> Self {
        let store = Self::new();
        store.set(STORAGE_DONOR_ID, donor_id);
        store.set(STORAGE_ACCESS_TOKEN, token);
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn clear(&self) -> bool {
        self.entries.borrow_mut().clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    #[test]
    fn tokens_round_into_the_expected_keys() {
        let store = MemoryStore::new();
        assert!(!store.is_signed_in());

        store.store_tokens(&AuthTokens {
            donor_id: RecordId::from(42),
            access_token: "abc".to_string(),
        });

        assert_eq!(store.get("donor_id").as_deref(), Some("42"));
        assert_eq!(store.get("access_token").as_deref(), Some("abc"));
        assert!(store.is_signed_in());
    }

    #[test]
    fn cookie_names_are_trimmed_and_blanks_skipped() {
        assert_eq!(
            cookie_names("refresh_token=abc; theme=dark;  flag ; "),
            vec!["refresh_token", "theme", "flag"]
        );
        assert!(cookie_names("").is_empty());
    }

    #[test]
    fn every_domain_variant_is_expired() {
        let [plain, host, parent] = expired_cookie_variants("sid", "app.example.org");

        assert_eq!(plain, "sid=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/");
        assert!(host.ends_with("; domain=app.example.org"));
        assert!(parent.ends_with("; domain=.app.example.org"));
        assert!(parent.starts_with(&plain));
    }
}
