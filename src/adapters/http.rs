use crate::config::ServiceConfig;
use crate::domain::model::{ApiRequest, HttpMethod, HttpOutcome};
use crate::domain::ports::Transport;
use crate::utils::error::{Result, SellerError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::time::Duration;

const USER_AGENT: &str = concat!("ozon-seller/", env!("CARGO_PKG_VERSION"));

/// 以 reqwest 實作的 transport，所有請求都帶 `Client-Id` 與 `Api-Key`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Client-Id", header_value("client_id", &config.client_id)?);
        headers.insert("Api-Key", header_value("api_key", &config.api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

/// 把端點路徑接到 base URL 後面，兩邊的斜線只保留一個
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        SellerError::configuration(format!("{} is not a valid header value: {}", field, e))
    })
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<HttpOutcome> {
        let url = self.url(&request.path);
        tracing::debug!("📡 Sending {} {}", request.method, url);

        let mut builder = self.client.request(to_reqwest_method(request.method), &url);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!("📡 {} {} -> {} ({} bytes)", request.method, url, status, body.len());

        Ok(HttpOutcome {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ServiceConfig {
        ServiceConfig::new("123", "secret", base_url)
    }

    #[test]
    fn test_url_join() {
        let transport = ReqwestTransport::new(&config("http://localhost:8080/")).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080");
        assert_eq!(transport.url("/v1/warehouse/list"), "http://localhost:8080/v1/warehouse/list");
        assert_eq!(transport.url("v1/warehouse/list"), "http://localhost:8080/v1/warehouse/list");
        assert_eq!(join_url("https://api-seller.ozon.ru/", "/v1/warehouse/list"), "https://api-seller.ozon.ru/v1/warehouse/list");
    }

    #[test]
    fn test_invalid_header_value() {
        let err = ReqwestTransport::new(&ServiceConfig::new("1\n2", "key", "http://localhost")).unwrap_err();
        assert!(matches!(err, SellerError::Configuration { .. }));
    }
}
