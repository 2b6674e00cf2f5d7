//! 各資源群組的服務入口
//!
//! 每個服務都包一個 [`ServiceCore`]，由它負責送出請求、解讀狀態碼與記錄事件。
//! 服務方法本身只做欄位挑選、正規化、驗證與組 body。

pub mod categories;
pub mod crossborder;
pub mod products;
pub mod warehouse;

use crate::adapters::http::{join_url, ReqwestTransport};
use crate::config::ServiceConfig;
use crate::core::response::{interpret, unwrap_result};
use crate::core::rulesets::default_registry;
use crate::core::validator::{ItemValidator, RulesetRegistry};
use crate::domain::model::{ApiRequest, LogLevel};
use crate::domain::ports::{RequestLogger, Transport};
use crate::utils::error::{Result, SellerError, Violation};
use crate::utils::validation::Validate;
use serde_json::{json, Value};
use std::sync::Arc;

pub use categories::CategoriesService;
pub use crossborder::CrossborderService;
pub use products::ProductService;
pub use warehouse::WarehouseService;

/// 所有服務共用的請求管線
///
/// 可在多個 task 間 clone 共用；併發安全取決於 transport 與 logger 本身
/// （兩個 trait 都要求 `Send + Sync`）。
#[derive(Clone)]
pub struct ServiceCore {
    config: Arc<ServiceConfig>,
    transport: Arc<dyn Transport>,
    registry: Arc<RulesetRegistry>,
    logger: Option<Arc<dyn RequestLogger>>,
}

impl ServiceCore {
    /// 驗證設定後建立 reqwest transport 與內建規則表
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        let registry = default_registry()?;
        Ok(Self::with_transport(config, Arc::new(transport), Arc::new(registry)))
    }

    pub fn with_transport(
        config: ServiceConfig,
        transport: Arc<dyn Transport>,
        registry: Arc<RulesetRegistry>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            registry,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn set_logger(&mut self, logger: Arc<dyn RequestLogger>) {
        self.logger = Some(logger);
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn validator(&self, operation: &str, version: u32) -> Result<ItemValidator> {
        ItemValidator::new(&self.registry, operation, version)
    }

    /// 送出請求並回傳完整解碼後的 body
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        let target = format!("{} {}", request.method, request.path);

        if let Some(logger) = &self.logger {
            let body = request.body_json()?;
            logger.log(LogLevel::Debug, &format!("request {}", target), &json!({ "body": body }));
        }

        let result = match self.transport.send(&request).await {
            Ok(outcome) => interpret(outcome),
            Err(err) => Err(err),
        };

        match result {
            Ok(body) => {
                if let Some(logger) = &self.logger {
                    logger.log(LogLevel::Debug, &format!("response {}", target), &body);
                }
                Ok(body)
            }
            Err(err) => {
                let resolved = format!("{} {}", request.method, join_url(&self.config.base_url, &request.path));
                tracing::error!("❌ {} failed: {}", resolved, err);
                if let Some(logger) = &self.logger {
                    let (message, context) = describe_failure(&resolved, &err);
                    logger.log(LogLevel::Error, &message, &context);
                }
                Err(err)
            }
        }
    }

    /// 同 [`send`](Self::send)，但取出外層的 `result`
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        self.send(request).await.map(unwrap_result)
    }
}

fn describe_failure(target: &str, err: &SellerError) -> (String, Value) {
    match err.api_failure() {
        Some(failure) => {
            let kind = if failure.status >= 500 { "Server error" } else { "Client error" };
            let reason = reqwest::StatusCode::from_u16(failure.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("Unknown");
            let message = format!(
                "{}: `{}` resulted in a `{} {}` response:\n{}",
                kind, target, failure.status, reason, failure.body.raw
            );
            (message, json!({ "status": failure.status }))
        }
        None => (err.to_string(), json!({})),
    }
}

/// 逐筆驗證，違規欄位加上 `prefix[index].` 前綴後一起回報
pub(crate) fn validate_items(validator: &ItemValidator, items: Vec<Value>, prefix: &str) -> Result<Vec<Value>> {
    let mut normalized = Vec::with_capacity(items.len());
    let mut violations = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validator.validate_item(item) {
            Ok(payload) => normalized.push(Value::Object(payload)),
            Err(SellerError::ValidationFailed { violations: found }) => {
                let item_path = format!("{}[{}]", prefix, index);
                violations.extend(found.into_iter().map(|v| {
                    let field = if v.field.is_empty() {
                        item_path.clone()
                    } else {
                        format!("{}.{}", item_path, v.field)
                    };
                    Violation::new(field, v.reason)
                }));
            }
            Err(other) => return Err(other),
        }
    }

    if violations.is_empty() {
        Ok(normalized)
    } else {
        Err(SellerError::ValidationFailed { violations })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::domain::model::HttpOutcome;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 記錄收到的請求，回傳固定的回應
    pub struct MockTransport {
        pub requests: Mutex<Vec<ApiRequest>>,
        status: u16,
        body: String,
    }

    impl MockTransport {
        pub fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                status,
                body: body.to_string(),
            })
        }

        pub fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: &ApiRequest) -> Result<HttpOutcome> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(HttpOutcome::new(self.status, self.body.as_bytes().to_vec()))
        }
    }

    #[derive(Default)]
    pub struct RecordingLogger {
        pub records: Mutex<Vec<(LogLevel, String, Value)>>,
    }

    impl RequestLogger for RecordingLogger {
        fn log(&self, level: LogLevel, message: &str, context: &Value) {
            self.records
                .lock()
                .unwrap()
                .push((level, message.to_string(), context.clone()));
        }
    }

    pub fn mock_core(transport: Arc<MockTransport>) -> ServiceCore {
        ServiceCore::with_transport(
            ServiceConfig::new("836", "key", "http://localhost"),
            transport,
            Arc::new(default_registry().unwrap()),
        )
    }

    pub fn body_of(request: &ApiRequest) -> String {
        request.body_json().unwrap()
    }
}
