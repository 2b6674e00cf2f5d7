use crate::utils::error::{Result, SellerError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api-seller.ozon.ru";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TIMEOUT_SECONDS: u64 = 300;

pub const ENV_CLIENT_ID: &str = "OZON_CLIENT_ID";
pub const ENV_API_KEY: &str = "OZON_API_KEY";
pub const ENV_API_URL: &str = "OZON_API_URL";

/// 賣家 API 的連線設定，建立後不可變
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(deserialize_with = "string_or_number")]
    pub client_id: String,
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

// client_id 在後台顯示為數字，TOML 裡常直接寫成整數
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("client_id", &self.client_id)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ServiceConfig {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定，支援 `${VAR}` 環境變數替換
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| SellerError::configuration(format!("TOML parsing error: {}", e)))
    }

    /// 從 `OZON_CLIENT_ID`、`OZON_API_KEY`、`OZON_API_URL` 讀取設定
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|_| SellerError::configuration(format!("environment variable {} is not set", name)))
        };

        let client_id = read(ENV_CLIENT_ID)?;
        let api_key = read(ENV_API_KEY)?;
        let base_url = std::env::var(ENV_API_URL).unwrap_or_else(|_| default_base_url());

        Ok(Self::new(client_id, api_key, base_url))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| SellerError::configuration(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("client_id", &self.client_id)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_url("base_url", &self.base_url)?;

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(SellerError::configuration(format!(
                "timeout_seconds must be between 1 and {}",
                MAX_TIMEOUT_SECONDS
            )));
        }

        Ok(())
    }
}
