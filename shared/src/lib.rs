//! MealMatch 共享层
//!
//! 与浏览器无关的领域逻辑，两个前端共同依赖：
//! - `model`: 请求/响应 DTO
//! - `protocol`: 端点定义 (`ApiRequest`)
//! - `gateway`: 带身份头与错误分类的请求入口
//! - `validation` / `date`: 表单校验与取件时间规范化
//! - `geocode` / `address`: 地理编码客户端与地址输入的时序规则
//! - `workflow`: 捐赠匹配多步流程
//! - `route`: 两个应用的路由定义

pub mod address;
pub mod config;
pub mod date;
pub mod error;
pub mod gateway;
pub mod geocode;
pub mod model;
pub mod protocol;
pub mod request;
pub mod route;
pub mod session;
pub mod validation;
pub mod workflow;

pub use config::{Service, ServiceConfig};
pub use error::{ClientError, ClientResult, ValidationError};
pub use gateway::Gateway;
pub use model::*;
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use session::SessionStore;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 键：捐赠者 ID
pub const STORAGE_DONOR_ID: &str = "donor_id";
/// LocalStorage 键：访问令牌
pub const STORAGE_ACCESS_TOKEN: &str = "access_token";
/// LocalStorage 键：接收方 ID
pub const STORAGE_RECIPIENT_ID: &str = "recipient-id";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_DONOR_ID: &str = "donor_id";
pub const HEADER_RECIPIENT_ID: &str = "recipient-id";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// 登出时需要过期的 Cookie
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
