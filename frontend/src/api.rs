//! 请求错误的统一处理

use crate::auth::{AuthContext, logout};
use mealmatch_browser::alert;
use mealmatch_shared::ClientError;

/// 401 时登出（路由随后跳转登录页），其他错误以提示框展示
pub fn report_error(auth: &AuthContext, err: &ClientError, prefix: &str) {
    if err.is_unauthorized() {
        logout(auth);
        return;
    }
    log::error!("{}: {}", prefix, err);
    let message = match err {
        ClientError::InvalidStep(_) | ClientError::Validation(_) => err.to_string(),
        _ => format!("{}: {}", prefix, err),
    };
    alert(&message);
}

/// 同上，但优先展示服务端 `error` 字段
pub fn report_server_message(auth: &AuthContext, err: &ClientError, fallback: &str) {
    if err.is_unauthorized() {
        logout(auth);
        return;
    }
    log::error!("{}: {}", fallback, err);
    alert(&err.server_message_or(fallback));
}
