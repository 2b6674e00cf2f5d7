use crate::utils::error::{Result, SellerError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日誌輸出格式；JSON 適合收進集中式日誌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// 沒有設定 `RUST_LOG` 時使用的過濾規則
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "ozon_seller=debug,info"
    } else {
        "ozon_seller=info"
    }
}

/// 安裝全域 subscriber，每個行程只能呼叫一次
pub fn init_logger(verbose: bool, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    let installed = match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init(),
    };

    installed.map_err(|e| SellerError::configuration(format!("logger already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "ozon_seller=info");
        assert!(default_directive(true).starts_with("ozon_seller=debug"));
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    #[test]
    fn test_second_init_is_an_error() {
        // 第一次可能已被其他測試安裝，只檢查第二次一定失敗
        let _ = init_logger(false, LogFormat::Json);
        let err = init_logger(false, LogFormat::Compact).unwrap_err();
        assert!(matches!(err, SellerError::Configuration { .. }));
    }
}
