//! 原生 Web API 封装
//!
//! 对浏览器原生 API 的轻量级封装（fetch、LocalStorage、定时器、History），
//! 替代 gloo-* 系列 crate 以减小 WASM 体积；两个应用共用。

mod address_picker;
mod console;
mod dialog;
mod http;
pub mod router;
mod session;
mod storage;
mod timer;

pub use address_picker::AddressPicker;
pub use console::init_logging;
pub use dialog::alert;
pub use http::FetchClient;
pub use session::{clear_site_data, sign_out};
pub use storage::BrowserStorage;
pub use timer::{Debouncer, reset_after};

use mealmatch_shared::{Gateway, ServiceConfig};

/// 浏览器环境下的请求入口
pub type BrowserGateway = Gateway<FetchClient, BrowserStorage>;

pub fn gateway() -> BrowserGateway {
    Gateway::new(FetchClient, BrowserStorage, ServiceConfig::from_build_env())
}

/// 按构建时的 `MEALMATCH_LOG` 安装控制台日志
pub fn init_console_logging() {
    init_logging(mealmatch_shared::config::log_level());
}
