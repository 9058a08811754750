//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 两个应用各自定义路由枚举，共用同一套守卫语义。

use std::fmt::Display;

/// 路由守卫与路径映射
pub trait Route: Clone + PartialEq + Display + Send + Sync + 'static {
    /// 将 URL path 解析为路由
    fn from_path(path: &str) -> Self;

    /// 路由对应的规范 URL path
    fn to_path(&self) -> &'static str;

    /// **核心守卫逻辑：该路由是否需要认证**
    fn requires_auth(&self) -> bool;

    /// 已认证用户是否应该离开此路由（如登录页）
    fn should_redirect_when_authenticated(&self) -> bool;

    /// 认证失败时的重定向目标
    fn auth_failure_redirect() -> Self;

    /// 认证成功时的重定向目标
    fn auth_success_redirect() -> Self;
}

// =========================================================
// 捐赠者应用
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DonorRoute {
    #[default]
    Login,
    Signup,
    /// `/home` 的默认子页面
    DonationHistory,
    CreateDonation,
    Settings,
    NotFound,
}

impl DonorRoute {
    /// 侧边栏中的页面
    pub const HOME_PAGES: [DonorRoute; 3] = [
        DonorRoute::DonationHistory,
        DonorRoute::CreateDonation,
        DonorRoute::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Sign Up",
            Self::DonationHistory => "Donation History",
            Self::CreateDonation => "Create Donation",
            Self::Settings => "Settings",
            Self::NotFound => "Not Found",
        }
    }
}

impl Route for DonorRoute {
    fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/home" | "/home/" | "/home/donation-history" => Self::DonationHistory,
            "/home/create-donation" => Self::CreateDonation,
            "/home/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::DonationHistory => "/home/donation-history",
            Self::CreateDonation => "/home/create-donation",
            Self::Settings => "/home/settings",
            Self::NotFound => "/404",
        }
    }

    fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::DonationHistory | Self::CreateDonation | Self::Settings
        )
    }

    fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    fn auth_failure_redirect() -> Self {
        Self::Login
    }

    fn auth_success_redirect() -> Self {
        Self::DonationHistory
    }
}

impl Display for DonorRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 接收方应用
// =========================================================

/// 接收方应用没有登录流程，注册后写入 `recipient-id` 即进入 `/home`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipientRoute {
    #[default]
    AddRecipient,
    Inventory,
    NotFound,
}

impl RecipientRoute {
    pub fn title(&self) -> &'static str {
        match self {
            Self::AddRecipient => "Register Recipient",
            Self::Inventory => "Inventory",
            Self::NotFound => "Not Found",
        }
    }
}

impl Route for RecipientRoute {
    fn from_path(path: &str) -> Self {
        match path {
            "/" | "/add-recipient" => Self::AddRecipient,
            "/home" | "/home/" | "/home/inventory" => Self::Inventory,
            _ => Self::NotFound,
        }
    }

    fn to_path(&self) -> &'static str {
        match self {
            Self::AddRecipient => "/add-recipient",
            Self::Inventory => "/home/inventory",
            Self::NotFound => "/404",
        }
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn should_redirect_when_authenticated(&self) -> bool {
        false
    }

    fn auth_failure_redirect() -> Self {
        Self::AddRecipient
    }

    fn auth_success_redirect() -> Self {
        Self::Inventory
    }
}

impl Display for RecipientRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donor_paths_resolve_to_canonical_routes() {
        assert_eq!(DonorRoute::from_path("/"), DonorRoute::Login);
        assert_eq!(DonorRoute::from_path("/login"), DonorRoute::Login);
        assert_eq!(DonorRoute::from_path("/home"), DonorRoute::DonationHistory);
        assert_eq!(
            DonorRoute::from_path("/home/create-donation"),
            DonorRoute::CreateDonation
        );
        assert_eq!(DonorRoute::from_path("/nope"), DonorRoute::NotFound);

        for route in DonorRoute::HOME_PAGES {
            assert_eq!(DonorRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn home_pages_are_guarded() {
        for route in DonorRoute::HOME_PAGES {
            assert!(route.requires_auth(), "{route} should require auth");
        }
        assert!(!DonorRoute::Login.requires_auth());
        assert!(DonorRoute::Signup.should_redirect_when_authenticated());
        assert_eq!(DonorRoute::auth_failure_redirect(), DonorRoute::Login);
        assert_eq!(
            DonorRoute::auth_success_redirect().to_string(),
            "/home/donation-history"
        );
    }

    #[test]
    fn recipient_routes_are_open() {
        assert_eq!(RecipientRoute::from_path("/"), RecipientRoute::AddRecipient);
        assert_eq!(RecipientRoute::from_path("/home"), RecipientRoute::Inventory);
        assert!(!RecipientRoute::Inventory.requires_auth());
        assert_eq!(RecipientRoute::from_path("/x"), RecipientRoute::NotFound);
    }
}
