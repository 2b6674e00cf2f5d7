use super::{validate_items, ServiceCore};
use crate::config::ServiceConfig;
use crate::core::normalize::normalize_fields;
use crate::core::picker::pick;
use crate::core::request::{ensure_collection, OffsetPagination, RequestBuilder};
use crate::core::rulesets::POSTING_SHIP_ITEM;
use crate::domain::enums::{SortDirection, POSTING_STATUS};
use crate::domain::model::{HttpMethod, Payload};
use crate::domain::ports::RequestLogger;
use crate::utils::error::{Result, SellerError};
use serde_json::Value;
use std::sync::Arc;

const BASE_PATH: &str = "/v2/posting/crossborder";

/// 跨境訂單（posting）操作
#[derive(Clone)]
pub struct CrossborderService {
    core: ServiceCore,
}

impl CrossborderService {
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

    /// 訂單列表
    ///
    /// `filter` 只保留 `since`、`to`、`status`；日期轉成 UTC ISO-8601，
    /// 狀態需屬於 posting status 列表。
    pub async fn list(&self, dir: SortDirection, pagination: &OffsetPagination, filter: &Payload) -> Result<Value> {
        let mut filter = pick(filter, &["since", "to", "status"]);
        normalize_fields(&mut filter, &["since", "to"], &[("status", &POSTING_STATUS)])?;

        let request = RequestBuilder::new()
            .with_filter(filter)
            .with_dir(dir)
            .with_offset_pagination(pagination)
            .build(HttpMethod::Post, &path("list"));

        self.core.request(request).await
    }

    pub async fn get(&self, posting_number: &str) -> Result<Value> {
        self.posting_action("get", posting_number).await
    }

    /// 未完成訂單；`status` 可以是單一狀態字串或狀態陣列
    pub async fn unfulfilled_list(
        &self,
        status: Value,
        dir: SortDirection,
        pagination: &OffsetPagination,
    ) -> Result<Value> {
        let statuses = match status {
            Value::Array(items) => Value::Array(items),
            single => Value::Array(vec![single]),
        };

        let mut filter = Payload::new();
        filter.insert("status".to_string(), statuses);
        normalize_fields(&mut filter, &[], &[("status", &POSTING_STATUS)])?;
        let statuses = filter.remove("status").unwrap_or(Value::Null);

        let request = RequestBuilder::new()
            .with_field("status", statuses)
            .with_dir(dir)
            .with_offset_pagination(pagination)
            .build(HttpMethod::Post, &path("unfulfilled/list"));

        self.core.request(request).await
    }

    pub async fn approve(&self, posting_number: &str) -> Result<Value> {
        self.posting_action("approve", posting_number).await
    }

    pub async fn cancel(&self, posting_number: &str, sku: u64, reason_id: u64, reason_message: &str) -> Result<Value> {
        require_posting_number(posting_number)?;

        let request = RequestBuilder::new()
            .with_field("posting_number", posting_number)
            .with_field("sku", sku)
            .with_field("cancel_reason_id", reason_id)
            .with_field("cancel_reason_message", reason_message)
            .build(HttpMethod::Post, &path("cancel"));

        self.core.request(request).await
    }

    pub async fn cancel_reasons(&self) -> Result<Value> {
        let request = RequestBuilder::new().build(HttpMethod::Post, &path("cancel-reason/list"));
        self.core.request(request).await
    }

    /// 出貨；`validate` 為 true 時每筆 `items` 以 `posting.ship_item` v2 驗證
    pub async fn ship(
        &self,
        posting_number: &str,
        tracking_number: &str,
        shipping_provider_id: u64,
        items: Value,
        validate: bool,
    ) -> Result<Value> {
        require_posting_number(posting_number)?;

        let mut items = ensure_collection(items)?;
        if items.is_empty() {
            return Err(SellerError::invalid_input("items", "at least one item is required"));
        }
        if validate {
            let validator = self.core.validator(POSTING_SHIP_ITEM, 2)?;
            items = validate_items(&validator, items, "items")?;
        }

        let request = RequestBuilder::new()
            .with_field("posting_number", posting_number)
            .with_field("tracking_number", tracking_number)
            .with_field("shipping_provider_id", shipping_provider_id)
            .with_items(items)
            .build(HttpMethod::Post, &path("ship"));

        self.core.request(request).await
    }

    pub async fn shipping_providers(&self) -> Result<Value> {
        let request = RequestBuilder::new().build(HttpMethod::Post, &path("shipping-provider/list"));
        self.core.request(request).await
    }

    async fn posting_action(&self, action: &str, posting_number: &str) -> Result<Value> {
        require_posting_number(posting_number)?;

        let request = RequestBuilder::new()
            .with_field("posting_number", posting_number)
            .build(HttpMethod::Post, &path(action));

        self.core.request(request).await
    }
}

fn path(action: &str) -> String {
    format!("{}/{}", BASE_PATH, action)
}

fn require_posting_number(posting_number: &str) -> Result<()> {
    if posting_number.trim().is_empty() {
        return Err(SellerError::invalid_input("posting_number", "must not be empty"));
    }
    Ok(())
}
