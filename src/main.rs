use anyhow::Context;
use clap::Parser;
use ozon_seller::config::cli::Command;
use ozon_seller::utils::error::ErrorCategory;
use ozon_seller::utils::{logger, validation::Validate};
use ozon_seller::{
    CategoriesService, CliConfig, CrossborderService, Pagination, ProductService, SellerError, ServiceCore,
    TracingRequestLogger, WarehouseService,
};
use serde_json::{Map, Value};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.log_format())?;

    tracing::info!("Starting ozon-seller CLI");

    let config = match cli.service_config().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::debug!("Service config: {:?}", config);

    let mut core = ServiceCore::new(config)?;
    if cli.verbose {
        core.set_logger(Arc::new(TracingRequestLogger));
    }

    match run(core, cli.command).await {
        Ok(result) => {
            let output = serde_json::to_string_pretty(&result).context("failed to render response")?;
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!("❌ Request failed: {} (Category: {:?})", e, e.category());

            eprintln!("❌ {}", e);
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 本地錯誤不重試，遠端錯誤可能可以重試
            let exit_code = match e.category() {
                ErrorCategory::Local => 1,
                ErrorCategory::Remote => 2,
                ErrorCategory::Transport => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(core: ServiceCore, command: Command) -> Result<Value, SellerError> {
    match command {
        Command::Categories { category_id, language } => {
            CategoriesService::from_core(core).tree(category_id, &language).await
        }
        Command::Warehouses => WarehouseService::from_core(core).list().await,
        Command::CancelReasons => CrossborderService::from_core(core).cancel_reasons().await,
        Command::Posting { posting_number } => CrossborderService::from_core(core).get(&posting_number).await,
        Command::Stocks { offer_id, last_id, limit } => {
            let mut filter = Map::new();
            if let Some(offer_id) = offer_id {
                filter.insert("offer_id".to_string(), Value::String(offer_id));
            }
            let pagination = Pagination::new(last_id, limit)?;
            ProductService::from_core(core).import_stocks(&filter, &pagination).await
        }
    }
}
