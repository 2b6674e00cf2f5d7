use crate::domain::model::{ApiRequest, HttpOutcome, LogLevel};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// 送出 HTTP 請求。任何收到的狀態碼都是合法的 `HttpOutcome`，
/// 只有連線、DNS、逾時等失敗才回傳錯誤。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<HttpOutcome>;
}

/// 記錄每次呼叫的 request / response / error 事件
pub trait RequestLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, context: &Value);
}
