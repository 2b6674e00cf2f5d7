use crate::config::service_config::{ServiceConfig, DEFAULT_BASE_URL, ENV_API_KEY, ENV_API_URL, ENV_CLIENT_ID};
use crate::utils::error::{Result, SellerError};
use crate::utils::logger::LogFormat;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ozon-seller")]
#[command(about = "Command line access to the Ozon Seller API")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with client_id / api_key / base_url")]
    pub config: Option<String>,

    #[arg(long, env = ENV_CLIENT_ID)]
    pub client_id: Option<String>,

    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = ENV_API_URL, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    #[arg(long, help = "Print request and response events")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 類目樹
    Categories {
        #[arg(long)]
        category_id: Option<u64>,
        #[arg(long, default_value = "DEFAULT")]
        language: String,
    },
    /// 倉庫列表
    Warehouses,
    /// 跨境訂單可用的取消原因
    CancelReasons,
    /// 查詢單一跨境訂單
    Posting { posting_number: String },
    /// 商品庫存
    Stocks {
        #[arg(long)]
        offer_id: Option<String>,
        #[arg(long, default_value = "")]
        last_id: String,
        #[arg(long, default_value = "100")]
        limit: u32,
    },
}

impl CliConfig {
    pub fn log_format(&self) -> LogFormat {
        if self.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }

    /// 設定檔優先，命令列 / 環境變數可覆寫憑證
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => {
                let client_id = self
                    .client_id
                    .clone()
                    .ok_or_else(|| SellerError::configuration("--client-id or OZON_CLIENT_ID is required"))?;
                let api_key = self
                    .api_key
                    .clone()
                    .ok_or_else(|| SellerError::configuration("--api-key or OZON_API_KEY is required"))?;
                return Ok(ServiceConfig::new(client_id, api_key, self.api_url.clone()));
            }
        };

        if let Some(client_id) = &self.client_id {
            config.client_id = client_id.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }

        Ok(config)
    }
}
