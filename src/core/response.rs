use crate::domain::model::HttpOutcome;
use crate::utils::error::{ApiFailure, ErrorBody, Result, SellerError};
use serde_json::Value;

/// 依狀態碼把 `HttpOutcome` 轉成解碼後的 JSON 或對應的錯誤
///
/// | 狀態 | 結果 |
/// |---|---|
/// | 2xx | 成功，空 body 回傳 `Null` |
/// | 400 | `BadRequest` |
/// | 401 | `Unauthorized` |
/// | 404 | `NotFound` |
/// | 429 | `RateLimited` |
/// | 500-599 | `ServerError` |
/// | 其他 | `BadRequest`（保留原始狀態碼） |
pub fn interpret(outcome: HttpOutcome) -> Result<Value> {
    let raw = outcome.body_text();

    if outcome.is_success() {
        if raw.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(&raw).map_err(|e| SellerError::Decode {
            message: format!(
                "status {} body is not JSON (content-type: {}): {}",
                outcome.status,
                outcome.header("content-type").unwrap_or("unknown"),
                e
            ),
        });
    }

    let failure = ApiFailure {
        status: outcome.status,
        body: ErrorBody::parse(&raw),
    };

    Err(match outcome.status {
        401 => SellerError::Unauthorized(failure),
        404 => SellerError::NotFound(failure),
        429 => SellerError::RateLimited(failure),
        500..=599 => SellerError::ServerError(failure),
        _ => SellerError::BadRequest(failure),
    })
}

/// 取出平台回應外層的 `result`；沒有時回傳整個 body
pub fn unwrap_result(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}
