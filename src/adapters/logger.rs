use crate::domain::model::LogLevel;
use crate::domain::ports::RequestLogger;
use serde_json::Value;

/// 把 request / response / error 事件轉成 `tracing` 事件
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRequestLogger;

impl RequestLogger for TracingRequestLogger {
    fn log(&self, level: LogLevel, message: &str, context: &Value) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "ozon_seller::http", context = %context, "{}", message),
            LogLevel::Info => tracing::info!(target: "ozon_seller::http", context = %context, "{}", message),
            LogLevel::Warn => tracing::warn!(target: "ozon_seller::http", context = %context, "{}", message),
            LogLevel::Error => tracing::error!(target: "ozon_seller::http", context = %context, "{}", message),
        }
    }
}
