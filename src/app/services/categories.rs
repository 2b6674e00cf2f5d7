use super::ServiceCore;
use crate::config::ServiceConfig;
use crate::core::normalize::normalize_enum;
use crate::core::request::RequestBuilder;
use crate::domain::enums::{ATTRIBUTE_TYPE, LANGUAGE};
use crate::domain::model::HttpMethod;
use crate::domain::ports::RequestLogger;
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct CategoriesService {
    core: ServiceCore,
}

impl CategoriesService {
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

    /// 類目樹；沒給 `category_id` 時回傳整棵樹
    pub async fn tree(&self, category_id: Option<u64>, language: &str) -> Result<Value> {
        let language = normalize_enum(&Value::from(language), &LANGUAGE)?;

        let mut builder = RequestBuilder::new();
        if let Some(id) = category_id {
            builder = builder.with_field("category_id", id);
        }
        let request = builder
            .with_field("language", language)
            .build(HttpMethod::Post, "/v1/category/tree");

        self.core.request(request).await
    }

    pub async fn attributes(&self, category_id: u64, language: &str, attribute_type: &str) -> Result<Value> {
        let language = normalize_enum(&Value::from(language), &LANGUAGE)?;
        let attribute_type = normalize_enum(&Value::from(attribute_type), &ATTRIBUTE_TYPE)?;

        let request = RequestBuilder::new()
            .with_field("category_id", category_id)
            .with_field("language", language)
            .with_field("attribute_type", attribute_type)
            .build(HttpMethod::Post, "/v1/category/attribute");

        self.core.request(request).await
    }
}
