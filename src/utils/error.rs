use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// 單一欄位的驗證違規
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.field, self.reason)
        }
    }
}

/// 遠端錯誤回應的內容
///
/// 平台有兩種錯誤格式：`{"code","message","details"}` 與
/// `{"error":{"code","message","data"}}`，兩者都會解析；無法解析時只保留原始文字。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<Value>,
    pub raw: String,
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Self {
        let mut body = ErrorBody {
            raw: raw.to_string(),
            ..Default::default()
        };

        let Ok(Value::Object(root)) = serde_json::from_str::<Value>(raw) else {
            return body;
        };

        let source = match root.get("error") {
            Some(Value::Object(inner)) => inner,
            _ => &root,
        };

        body.code = source.get("code").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        body.message = source
            .get("message")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        body.details = source
            .get("details")
            .or_else(|| source.get("data"))
            .cloned();

        body
    }

    /// 是否成功解析出結構化的錯誤內容
    pub fn is_structured(&self) -> bool {
        self.code.is_some() || self.message.is_some()
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{}: {}", code, message),
            (Some(code), None) => write!(f, "{}", code),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "{}", self.raw),
        }
    }
}

/// 非 2xx 回應：狀態碼加上錯誤內容
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub status: u16,
    pub body: ErrorBody,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.body)
    }
}

#[derive(Error, Debug)]
pub enum SellerError {
    #[error("Validation failed: {}", join_violations(.violations))]
    ValidationFailed { violations: Vec<Violation> },

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Bad request ({0})")]
    BadRequest(ApiFailure),

    #[error("Unauthorized ({0})")]
    Unauthorized(ApiFailure),

    #[error("Not found ({0})")]
    NotFound(ApiFailure),

    #[error("Rate limited ({0})")]
    RateLimited(ApiFailure),

    #[error("Server error ({0})")]
    ServerError(ApiFailure),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response decoding error: {message}")]
    Decode { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 送出前就被擋下（驗證、參數、設定）
    Local,
    /// 遠端回傳的錯誤狀態碼
    Remote,
    /// 連線層級失敗
    Transport,
}

impl SellerError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SellerError::ValidationFailed {
            violations: vec![Violation::new(field, reason)],
        }
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SellerError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        SellerError::Configuration {
            message: message.into(),
        }
    }

    /// 遠端錯誤的內容（僅限狀態碼衍生的錯誤）
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            SellerError::BadRequest(f)
            | SellerError::Unauthorized(f)
            | SellerError::NotFound(f)
            | SellerError::RateLimited(f)
            | SellerError::ServerError(f) => Some(f),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SellerError::Transport(e) => e.status().map(|s| s.as_u16()),
            other => other.api_failure().map(|f| f.status),
        }
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            SellerError::ValidationFailed { violations } => violations,
            _ => &[],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SellerError::BadRequest(_)
            | SellerError::Unauthorized(_)
            | SellerError::NotFound(_)
            | SellerError::RateLimited(_)
            | SellerError::ServerError(_)
            | SellerError::Decode { .. } => ErrorCategory::Remote,
            SellerError::Transport(_) => ErrorCategory::Transport,
            _ => ErrorCategory::Local,
        }
    }

    /// 呼叫端可以稍後重試的錯誤；本函式庫本身不做重試
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SellerError::RateLimited(_) | SellerError::ServerError(_) | SellerError::Transport(_)
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SellerError::ValidationFailed { .. } => "Fix the listed fields and resend the request",
            SellerError::InvalidInput { .. } => "Check the call arguments (limit must be in 1..=1000)",
            SellerError::Configuration { .. } => "Check client_id, api_key and base_url settings",
            SellerError::BadRequest(_) => "Inspect the error body returned by the API",
            SellerError::Unauthorized(_) => "Verify the Client-Id and Api-Key credentials",
            SellerError::NotFound(_) => "Check that the requested entity exists",
            SellerError::RateLimited(_) => "Slow down and retry after a pause",
            SellerError::ServerError(_) => "Retry later; the platform reported an internal error",
            SellerError::Transport(_) => "Check network connectivity and the API URL",
            SellerError::Decode { .. } => "The API returned a non-JSON success body",
            SellerError::Serialization(_) | SellerError::Io(_) => "Check the local input data",
        }
    }
}

pub type Result<T> = std::result::Result<T, SellerError>;
