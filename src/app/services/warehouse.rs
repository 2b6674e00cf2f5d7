use super::ServiceCore;
use crate::config::ServiceConfig;
use crate::core::request::{OffsetPagination, RequestBuilder};
use crate::domain::model::HttpMethod;
use crate::domain::ports::RequestLogger;
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct WarehouseService {
    core: ServiceCore,
}

impl WarehouseService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self::from_core(ServiceCore::new(config)?))
    }

    pub fn from_core(core: ServiceCore) -> Self {
        Self { core }
    }

    pub fn with_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.core.set_logger(logger);
        self
    }

    pub fn set_logger(&mut self, logger: Arc<dyn RequestLogger>) {
        self.core.set_logger(logger);
    }

    pub async fn list(&self) -> Result<Value> {
        let request = RequestBuilder::new().build(HttpMethod::Post, "/v1/warehouse/list");
        self.core.request(request).await
    }

    /// 各倉庫的商品庫存，以頁碼分頁
    ///
    /// `offset` 不是 `limit` 的整數倍時回傳 `InvalidInput`，不送出請求。
    pub async fn stocks(&self, pagination: &OffsetPagination) -> Result<Value> {
        let request = RequestBuilder::new()
            .with_field("page", pagination.page()?)
            .with_field("page_size", pagination.limit())
            .build(HttpMethod::Post, "/v2/product/info/stocks");

        self.core.request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::utils::error::SellerError;
    use serde_json::json;

    #[tokio::test]
    async fn test_list() {
        let transport = MockTransport::new(200, r#"{"result":[{"warehouse_id":1,"name":"Main"}]}"#);
        let service = WarehouseService::from_core(mock_core(transport.clone()));

        let result = service.list().await.unwrap();
        assert_eq!(result, json!([{"warehouse_id": 1, "name": "Main"}]));
        assert_eq!(body_of(&transport.sent()[0]), "{}");
    }

    #[tokio::test]
    async fn test_stocks_page_from_offset() {
        let transport = MockTransport::new(200, r#"{"result":{"items":[],"total":0}}"#);
        let service = WarehouseService::from_core(mock_core(transport.clone()));

        service.stocks(&OffsetPagination::new(200, 100).unwrap()).await.unwrap();
        assert_eq!(body_of(&transport.sent()[0]), r#"{"page":3,"page_size":100}"#);
    }

    #[tokio::test]
    async fn test_stocks_rejects_unaligned_offset() {
        let transport = MockTransport::new(200, r#"{"result":{"items":[],"total":0}}"#);
        let service = WarehouseService::from_core(mock_core(transport.clone()));

        let err = service
            .stocks(&OffsetPagination::new(50, 100).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, SellerError::InvalidInput { ref field, .. } if field == "offset"));
        assert!(transport.sent().is_empty());
    }
}
