use thiserror::Error;

// =========================================================
// 表单校验错误
// =========================================================

/// 表单提交前的同步校验失败
///
/// `Display` 即展示给用户的提示文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter both name and password.")]
    MissingCredentials,
    #[error("Please fill in all required fields.")]
    MissingRequiredFields,
    #[error("Please enter a valid name.")]
    InvalidName,
    #[error("Please enter both old and new passwords.")]
    MissingPasswords,
    #[error("Please enter valid latitude and longitude values.")]
    InvalidCoordinates,
    #[error("Please provide open hours for at least one day.")]
    MissingOpenHours,
    #[error("Please enter a donation name.")]
    MissingDonationName,
    #[error("Please enter a valid quantity.")]
    InvalidQuantity,
    #[error("Pickup time is required.")]
    PickupTimeRequired,
    #[error("Invalid pickup time format.")]
    InvalidPickupTime,
}

// =========================================================
// 客户端错误
// =========================================================

/// 所有后端调用与流程步骤的错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// 401：会话已被清除，调用方应跳转登录页
    #[error("Unauthorized")]
    Unauthorized,
    /// 409：资源已存在，消息取自服务端 `error` 字段
    #[error("{0}")]
    Conflict(String),
    /// 其他非 2xx 响应，保留服务端原文
    #[error("Server Error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 本地存储中缺少身份信息
    #[error("{0} not found in localStorage.")]
    MissingIdentity(&'static str),
    /// 当前流程阶段不允许该操作
    #[error("{0}")]
    InvalidStep(&'static str),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// 按状态码分类非成功响应（401 的登出语义由 `Gateway` 处理）
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            // 没有 `error` 字段时留空，由调用方给出默认提示
            409 => ClientError::Conflict(server_error_field(body).unwrap_or_default()),
            _ => ClientError::Server {
                status,
                message: body.to_string(),
            },
        }
    }

    /// 服务端提供的错误文本（`error` 字段优先），否则使用 `fallback`
    pub fn server_message_or(&self, fallback: &str) -> String {
        match self {
            ClientError::Conflict(message) if !message.is_empty() => message.clone(),
            ClientError::Server { message, .. } => {
                server_error_field(message).unwrap_or_else(|| fallback.to_string())
            }
            _ => fallback.to_string(),
        }
    }
}

/// 从 JSON 响应体中提取 `error` 字段
pub fn server_error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_carries_the_server_error_field() {
        let err = ClientError::from_status(409, r#"{"error":"Recipient already exists: Food Bank"}"#);
        assert_eq!(
            err,
            ClientError::Conflict("Recipient already exists: Food Bank".to_string())
        );
        assert_eq!(err.to_string(), "Recipient already exists: Food Bank");
    }

    #[test]
    fn conflict_without_error_field_falls_back_to_the_default() {
        let err = ClientError::from_status(409, r#"{"message":"duplicate key"}"#);
        assert_eq!(err, ClientError::Conflict(String::new()));
        assert_eq!(
            err.server_message_or("Recipient already exists"),
            "Recipient already exists"
        );

        let err = ClientError::from_status(409, "duplicate key");
        assert_eq!(err.server_message_or("User already exists"), "User already exists");
    }

    #[test]
    fn server_errors_keep_the_body_verbatim() {
        let err = ClientError::from_status(500, "database unavailable");
        assert_eq!(err.to_string(), "Server Error 500: database unavailable");
        assert_eq!(err.server_message_or("Login failed"), "Login failed");

        let err = ClientError::from_status(400, r#"{"error":"bad password"}"#);
        assert_eq!(err.server_message_or("Login failed"), "bad password");
    }
}
