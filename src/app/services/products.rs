use super::{validate_items, ServiceCore};
use crate::config::ServiceConfig;
use crate::core::normalize::normalize_fields;
use crate::core::picker::pick;
use crate::core::request::{ensure_collection, Pagination, RequestBuilder, Sort};
use crate::core::rulesets::{PRODUCT_CREATE, PRODUCT_STOCKS, PRODUCT_UPDATE};
use crate::domain::enums::VISIBILITY;
use crate::domain::model::{HttpMethod, Payload};
use crate::domain::ports::RequestLogger;
use crate::utils::error::{Result, SellerError};
use serde_json::Value;
use std::sync::Arc;

const FILTER_FIELDS: &[&str] = &["offer_id", "product_id", "visibility"];

/// 商品相關操作（匯入、庫存、屬性）
#[derive(Clone)]
pub struct ProductService {
    core: ServiceCore,
}

impl ProductService {
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

    /// 建立商品頁面
    ///
    /// `income` 可以是 `{"items": [...]}`、商品陣列或單一商品物件；
    /// 單一商品會先包成陣列再驗證。
    pub async fn import(&self, income: Value, validate: bool) -> Result<Value> {
        let items = self.prepare_items(income, validate, PRODUCT_CREATE)?;
        let request = RequestBuilder::new()
            .with_items(items)
            .build(HttpMethod::Post, "/v3/product/import");

        self.core.request(request).await
    }

    /// 更新既有商品，只有 `offer_id` 為必填
    pub async fn update(&self, income: Value, validate: bool) -> Result<Value> {
        let items = self.prepare_items(income, validate, PRODUCT_UPDATE)?;
        let request = RequestBuilder::new()
            .with_items(items)
            .build(HttpMethod::Post, "/v3/product/import");

        self.core.request(request).await
    }

    /// 匯入任務的處理狀態
    pub async fn import_info(&self, task_id: u64) -> Result<Value> {
        let request = RequestBuilder::new()
            .with_field("task_id", task_id)
            .build(HttpMethod::Post, "/v1/product/import/info");

        self.core.request(request).await
    }

    pub async fn import_stocks(&self, filter: &Payload, pagination: &Pagination) -> Result<Value> {
        let request = RequestBuilder::new()
            .with_filter(product_filter(filter)?)
            .with_pagination(pagination)
            .build(HttpMethod::Post, "/v3/products/stocks");

        self.core.request(request).await
    }

    /// 商品屬性，游標分頁
    ///
    /// 回傳完整 body：`result` 旁的 `last_id` 與 `total` 是取下一頁所需。
    pub async fn info_attributes(&self, filter: &Payload, pagination: &Pagination, sort: &Sort) -> Result<Value> {
        let request = RequestBuilder::new()
            .with_filter(product_filter(filter)?)
            .with_pagination(pagination)
            .with_sort(sort)
            .build(HttpMethod::Post, "/v3/products/info/attributes");

        self.core.send(request).await
    }

    /// 更新庫存數量，每筆需要 `offer_id` 或 `product_id` 其中之一
    pub async fn update_stocks(&self, stocks: Value, validate: bool) -> Result<Value> {
        let mut stocks = ensure_collection(stocks)?;
        if stocks.is_empty() {
            return Err(SellerError::invalid_input("stocks", "at least one stock row is required"));
        }
        if validate {
            let validator = self.core.validator(PRODUCT_STOCKS, 1)?;
            stocks = validate_items(&validator, stocks, "stocks")?;
        }

        let request = RequestBuilder::new()
            .with_field("stocks", Value::Array(stocks))
            .build(HttpMethod::Post, "/v1/product/import/stocks");

        self.core.request(request).await
    }

    fn prepare_items(&self, income: Value, validate: bool, operation: &str) -> Result<Vec<Value>> {
        let income = match income {
            Value::Object(map) if map.contains_key("items") => map,
            other => {
                let mut wrapped = Payload::new();
                wrapped.insert("items".to_string(), Value::Array(ensure_collection(other)?));
                wrapped
            }
        };

        let income = pick(&income, &["items"]);
        let items = ensure_collection(income.get("items").cloned().unwrap_or(Value::Null))?;
        if items.is_empty() {
            return Err(SellerError::invalid_input("items", "at least one item is required"));
        }

        if !validate {
            return Ok(items);
        }

        let validator = self.core.validator(operation, 2)?;
        validate_items(&validator, items, "items")
    }
}

fn product_filter(filter: &Payload) -> Result<Payload> {
    let mut filter = pick(filter, FILTER_FIELDS);
    normalize_fields(&mut filter, &[], &[("visibility", &VISIBILITY)])?;
    Ok(filter)
}
