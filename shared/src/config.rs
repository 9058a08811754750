//! 服务地址配置
//!
//! 地址在构建时通过环境变量注入（`option_env!`），未设置时使用本地开发默认值。

// =========================================================
// 默认值
// =========================================================

const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";
const DEFAULT_RECIPIENT_URL: &str = "http://localhost:9898";
const DEFAULT_INVENTORY_URL: &str = "http://localhost:8009";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// 请求的目标服务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// API 网关（认证、捐赠者、捐赠、匹配）
    Gateway,
    /// 接收方服务（注册、候选搜索）
    Recipient,
    /// 库存服务
    Inventory,
}

/// 运行时服务地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub gateway_url: String,
    pub recipient_url: String,
    pub inventory_url: String,
    pub geocoder_url: String,
}

impl ServiceConfig {
    pub fn new(
        gateway_url: impl Into<String>,
        recipient_url: impl Into<String>,
        inventory_url: impl Into<String>,
        geocoder_url: impl Into<String>,
    ) -> Self {
        Self {
            gateway_url: normalize(gateway_url.into()),
            recipient_url: normalize(recipient_url.into()),
            inventory_url: normalize(inventory_url.into()),
            geocoder_url: normalize(geocoder_url.into()),
        }
    }

    /// 读取构建时变量 `MEALMATCH_*_URL`
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("MEALMATCH_GATEWAY_URL").unwrap_or(DEFAULT_GATEWAY_URL),
            option_env!("MEALMATCH_RECIPIENT_URL").unwrap_or(DEFAULT_RECIPIENT_URL),
            option_env!("MEALMATCH_INVENTORY_URL").unwrap_or(DEFAULT_INVENTORY_URL),
            option_env!("MEALMATCH_GEOCODER_URL").unwrap_or(DEFAULT_GEOCODER_URL),
        )
    }

    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Gateway => &self.gateway_url,
            Service::Recipient => &self.recipient_url,
            Service::Inventory => &self.inventory_url,
        }
    }

    /// 拼接服务地址与路径
    pub fn url(&self, service: Service, path: &str) -> String {
        join(self.base_url(service), path)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_GATEWAY_URL,
            DEFAULT_RECIPIENT_URL,
            DEFAULT_INVENTORY_URL,
            DEFAULT_GEOCODER_URL,
        )
    }
}

/// 构建时日志级别（`MEALMATCH_LOG`），默认 info
pub fn log_level() -> log::LevelFilter {
    option_env!("MEALMATCH_LOG")
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

pub(crate) fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_before_joining() {
        let config = ServiceConfig::new("http://gw/", "http://rs//", "http://inv", "http://geo/");
        assert_eq!(
            config.url(Service::Gateway, "/auth/v1/login"),
            "http://gw/auth/v1/login"
        );
        assert_eq!(
            config.url(Service::Recipient, "recipient/v1/findRecipients"),
            "http://rs/recipient/v1/findRecipients"
        );
        assert_eq!(config.geocoder_url, "http://geo");
    }
}
