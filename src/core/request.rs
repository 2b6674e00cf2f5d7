use crate::domain::enums::SortDirection;
use crate::domain::model::{ApiRequest, HttpMethod, Payload};
use crate::utils::error::{Result, SellerError};
use crate::utils::validation::validate_range;
use serde_json::Value;

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

/// 游標分頁：`last_id` 為空字串代表從頭開始
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    last_id: String,
    limit: u32,
}

impl Pagination {
    /// `limit` 必須在 (0, 1000] 之間，否則在送出前就回傳 `InvalidInput`
    pub fn new(last_id: impl Into<String>, limit: u32) -> Result<Self> {
        validate_range("limit", limit, 1, MAX_LIMIT)?;
        Ok(Self {
            last_id: last_id.into(),
            limit,
        })
    }

    pub fn last_id(&self) -> &str {
        &self.last_id
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            last_id: String::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// 位移分頁（posting 列表使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPagination {
    offset: u64,
    limit: u32,
}

impl OffsetPagination {
    pub fn new(offset: u64, limit: u32) -> Result<Self> {
        validate_range("limit", limit, 1, MAX_LIMIT)?;
        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// 換算成從 1 開始的頁碼；`offset` 必須是 `limit` 的整數倍，否則無法對齊頁界
    pub fn page(&self) -> Result<u64> {
        let limit = u64::from(self.limit);
        if self.offset % limit != 0 {
            return Err(SellerError::invalid_input(
                "offset",
                format!("{} is not a multiple of limit {}", self.offset, self.limit),
            ));
        }
        Ok(self.offset / limit + 1)
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub by: String,
    pub dir: SortDirection,
}

impl Sort {
    pub fn new(by: impl Into<String>, dir: SortDirection) -> Self {
        Self { by: by.into(), dir }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new("product_id", SortDirection::Desc)
    }
}

/// 單筆物件包成一個元素的陣列；陣列原樣回傳
///
/// 依據值的形狀判斷，不是依據數量。
pub fn ensure_collection(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) => Ok(vec![Value::Object(map)]),
        other => Err(SellerError::invalid_input(
            "items",
            format!("expected an object or a list of objects, got {}", other),
        )),
    }
}

/// 依端點契約組出有順序的 request body
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    body: Payload,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.body.insert(name.to_string(), value.into());
        self
    }

    pub fn with_filter(self, filter: Payload) -> Self {
        self.with_field("filter", Value::Object(filter))
    }

    pub fn with_items(self, items: Vec<Value>) -> Self {
        self.with_field("items", Value::Array(items))
    }

    pub fn with_pagination(self, pagination: &Pagination) -> Self {
        self.with_field("last_id", pagination.last_id())
            .with_field("limit", pagination.limit())
    }

    pub fn with_offset_pagination(self, pagination: &OffsetPagination) -> Self {
        self.with_field("offset", pagination.offset())
            .with_field("limit", pagination.limit())
    }

    pub fn with_sort(self, sort: &Sort) -> Self {
        self.with_field("sort_by", sort.by.as_str())
            .with_field("sort_dir", sort.dir.as_str())
    }

    pub fn with_dir(self, dir: SortDirection) -> Self {
        self.with_field("dir", dir.as_str())
    }

    pub fn build(self, method: HttpMethod, path: &str) -> ApiRequest {
        ApiRequest::new(method, path).with_body(self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_limit_bounds() {
        assert!(Pagination::new("", 1).is_ok());
        assert!(Pagination::new("", 1000).is_ok());
        assert!(matches!(
            Pagination::new("", 0).unwrap_err(),
            SellerError::InvalidInput { .. }
        ));
        assert!(matches!(
            OffsetPagination::new(0, 1001).unwrap_err(),
            SellerError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.last_id(), "");
        assert_eq!(pagination.limit(), 100);
        assert_eq!(Sort::default(), Sort::new("product_id", SortDirection::Desc));
    }

    #[test]
    fn test_page_from_offset() {
        assert_eq!(OffsetPagination::new(0, 50).unwrap().page().unwrap(), 1);
        assert_eq!(OffsetPagination::new(100, 50).unwrap().page().unwrap(), 3);

        let err = OffsetPagination::new(50, 100).unwrap().page().unwrap_err();
        assert!(matches!(err, SellerError::InvalidInput { ref field, .. } if field == "offset"));
    }

    #[test]
    fn test_ensure_collection() {
        let single = ensure_collection(json!({"sku": 1})).unwrap();
        assert_eq!(single, vec![json!({"sku": 1})]);

        let many = ensure_collection(json!([{"sku": 1}, {"sku": 2}])).unwrap();
        assert_eq!(many.len(), 2);

        assert!(ensure_collection(json!("sku")).is_err());
    }

    #[test]
    fn test_builder_keeps_field_order() {
        let filter = json!({"offer_id": "ABC"}).as_object().cloned().unwrap();
        let request = RequestBuilder::new()
            .with_filter(filter)
            .with_pagination(&Pagination::default())
            .with_sort(&Sort::default())
            .build(HttpMethod::Post, "/v3/products/info/attributes");

        assert_eq!(
            request.body_json().unwrap(),
            r#"{"filter":{"offer_id":"ABC"},"last_id":"","limit":100,"sort_by":"product_id","sort_dir":"desc"}"#
        );
    }
}
