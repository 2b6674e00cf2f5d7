use crate::domain::enums::EnumDomain;
use crate::domain::model::Payload;
use crate::utils::error::{Result, SellerError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// 轉成 UTC、秒精度、帶 `+00:00` 的 ISO-8601 字串
pub fn format_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    value
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// 解析日期時間並輸出標準格式
///
/// 接受 RFC 3339（任意時區）、`YYYY-MM-DD`、不帶時區的日期時間（視為 UTC）
/// 以及整數 Unix 秒數。
pub fn normalize_date(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => parse_date_str(s.trim())
            .map(|dt| format_datetime(&dt))
            .ok_or_else(|| SellerError::invalid_input("date", format!("unparseable date/time '{}'", s))),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| format_datetime(&dt))
            .ok_or_else(|| SellerError::invalid_input("date", format!("invalid unix timestamp {}", n))),
        other => Err(SellerError::invalid_input(
            "date",
            format!("expected date string or timestamp, got {}", other),
        )),
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 檢查值是否屬於 `domain`，回傳標準寫法
pub fn normalize_enum(value: &Value, domain: &EnumDomain) -> Result<String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(SellerError::invalid_input(
                domain.name,
                format!("expected string code, got {}", other),
            ))
        }
    };

    domain
        .canonical(&raw)
        .map(str::to_string)
        .ok_or_else(|| {
            SellerError::invalid_input(
                domain.name,
                format!("'{}' is not one of [{}]", raw, domain.codes.join(", ")),
            )
        })
}

/// 就地正規化 payload 的日期與列舉欄位；不存在的欄位略過，列舉陣列逐一處理
pub fn normalize_fields(
    payload: &mut Payload,
    dates: &[&str],
    enums: &[(&str, &EnumDomain)],
) -> Result<()> {
    for field in dates {
        if let Some(value) = payload.get_mut(*field) {
            let normalized = normalize_date(value).map_err(|e| rename_field(e, field))?;
            *value = Value::String(normalized);
        }
    }

    for (field, domain) in enums {
        if let Some(value) = payload.get_mut(*field) {
            *value = match &*value {
                Value::Array(items) => Value::Array(
                    items
                        .iter()
                        .map(|item| normalize_enum(item, domain).map(Value::String))
                        .collect::<Result<Vec<_>>>()
                        .map_err(|e| rename_field(e, field))?,
                ),
                single => Value::String(normalize_enum(single, domain).map_err(|e| rename_field(e, field))?),
            };
        }
    }

    Ok(())
}

fn rename_field(err: SellerError, field: &str) -> SellerError {
    match err {
        SellerError::InvalidInput { reason, .. } => SellerError::invalid_input(field, reason),
        other => other,
    }
}
