//! 送出前的欄位驗證
//!
//! 每個 (operation, version) 對應一份 [`ValidationRuleset`]，集中在
//! [`RulesetRegistry`]。[`ItemValidator`] 依規則檢查單筆資料：缺少必填欄位、
//! 型別或範圍錯誤都會收集成 `ValidationFailed`；未宣告的欄位一律丟棄。

use crate::core::normalize::normalize_enum;
use crate::domain::enums::EnumDomain;
use crate::domain::model::Payload;
use crate::utils::error::{Result, SellerError, Violation};
use regex::Regex;
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum FieldKind {
    String {
        max_len: Option<usize>,
        pattern: Option<Regex>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Boolean,
    Enum(EnumDomain),
    Object(Arc<ValidationRuleset>),
    List {
        item: Box<FieldKind>,
        min_items: usize,
    },
}

impl FieldKind {
    pub fn string() -> Self {
        FieldKind::String {
            max_len: None,
            pattern: None,
        }
    }

    pub fn string_max(max_len: usize) -> Self {
        FieldKind::String {
            max_len: Some(max_len),
            pattern: None,
        }
    }

    pub fn string_pattern(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| SellerError::configuration(format!("invalid field pattern '{}': {}", pattern, e)))?;
        Ok(FieldKind::String {
            max_len: None,
            pattern: Some(re),
        })
    }

    pub fn integer() -> Self {
        FieldKind::Integer { min: None, max: None }
    }

    pub fn integer_min(min: i64) -> Self {
        FieldKind::Integer {
            min: Some(min),
            max: None,
        }
    }

    pub fn number_range(min: Option<f64>, max: Option<f64>) -> Self {
        FieldKind::Number { min, max }
    }

    pub fn object(ruleset: ValidationRuleset) -> Self {
        FieldKind::Object(Arc::new(ruleset))
    }

    pub fn list_of(item: FieldKind) -> Self {
        FieldKind::List {
            item: Box::new(item),
            min_items: 0,
        }
    }

    pub fn non_empty_list_of(item: FieldKind) -> Self {
        FieldKind::List {
            item: Box::new(item),
            min_items: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: String,
    pub required: bool,
    pub kind: FieldKind,
}

/// 一組欄位規則，欄位順序即輸出順序
#[derive(Debug, Clone, Default)]
pub struct ValidationRuleset {
    fields: Vec<FieldRule>,
    one_of: Vec<Vec<String>>,
}

impl ValidationRuleset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &str, kind: FieldKind) -> Self {
        self.push(name, true, kind);
        self
    }

    pub fn optional(mut self, name: &str, kind: FieldKind) -> Self {
        self.push(name, false, kind);
        self
    }

    /// 跨欄位條件：`names` 中至少要有一個欄位
    pub fn require_one_of(mut self, names: &[&str]) -> Self {
        self.one_of
            .push(names.iter().map(|name| name.to_string()).collect());
        self
    }

    /// 複製一份規則，除了 `keep_required` 以外全部改成選填
    pub fn relaxed(&self, keep_required: &[&str]) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|rule| FieldRule {
                required: rule.required && keep_required.contains(&rule.name.as_str()),
                ..rule.clone()
            })
            .collect();
        Self {
            fields,
            one_of: self.one_of.clone(),
        }
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    fn push(&mut self, name: &str, required: bool, kind: FieldKind) {
        self.fields.retain(|rule| rule.name != name);
        self.fields.push(FieldRule {
            name: name.to_string(),
            required,
            kind,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RulesetKey {
    pub operation: String,
    pub version: u32,
}

impl RulesetKey {
    pub fn new(operation: &str, version: u32) -> Self {
        Self {
            operation: operation.to_string(),
            version,
        }
    }
}

impl fmt::Display for RulesetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.operation, self.version)
    }
}

/// 以 (operation, version) 為鍵的規則表，建立一次後以 `Arc` 共用
#[derive(Debug, Clone, Default)]
pub struct RulesetRegistry {
    rulesets: HashMap<RulesetKey, Arc<ValidationRuleset>>,
}

impl RulesetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, operation: &str, version: u32, ruleset: ValidationRuleset) {
        self.rulesets
            .insert(RulesetKey::new(operation, version), Arc::new(ruleset));
    }

    pub fn get(&self, operation: &str, version: u32) -> Option<Arc<ValidationRuleset>> {
        self.rulesets
            .get(&RulesetKey::new(operation, version))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }
}

pub struct ItemValidator {
    key: RulesetKey,
    ruleset: Arc<ValidationRuleset>,
}

impl ItemValidator {
    /// 找不到規則時回傳 `Configuration`：這是程式錯誤，不是使用者輸入錯誤
    pub fn new(registry: &RulesetRegistry, operation: &str, version: u32) -> Result<Self> {
        let ruleset = registry.get(operation, version).ok_or_else(|| {
            SellerError::configuration(format!(
                "no validation ruleset registered for {} v{}",
                operation, version
            ))
        })?;

        Ok(Self {
            key: RulesetKey::new(operation, version),
            ruleset,
        })
    }

    pub fn validate_item(&self, record: &Value) -> Result<Payload> {
        let Value::Object(map) = record else {
            // 空路徑代表整筆紀錄本身
            return Err(SellerError::validation("", "expected object"));
        };

        let mut violations = Vec::new();
        let normalized = validate_record(&self.ruleset, map, "", &mut violations);

        if violations.is_empty() {
            Ok(normalized)
        } else {
            tracing::debug!(
                "Validation against {} failed with {} violation(s)",
                self.key,
                violations.len()
            );
            Err(SellerError::ValidationFailed { violations })
        }
    }
}

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn validate_record(
    ruleset: &ValidationRuleset,
    record: &Payload,
    prefix: &str,
    violations: &mut Vec<Violation>,
) -> Payload {
    let mut normalized = Payload::new();

    for rule in &ruleset.fields {
        let path = field_path(prefix, &rule.name);
        match record.get(&rule.name) {
            None | Some(Value::Null) => {
                if rule.required {
                    violations.push(Violation::new(path, "missing"));
                }
            }
            Some(value) => {
                if let Some(coerced) = check_value(&path, &rule.kind, value, violations) {
                    normalized.insert(rule.name.clone(), coerced);
                }
            }
        }
    }

    for group in &ruleset.one_of {
        let present = group
            .iter()
            .any(|name| matches!(record.get(name), Some(v) if !v.is_null()));
        if !present {
            violations.push(Violation::new(
                field_path(prefix, &group.join("|")),
                format!("one of [{}] is required", group.join(", ")),
            ));
        }
    }

    normalized
}

fn check_value(path: &str, kind: &FieldKind, value: &Value, violations: &mut Vec<Violation>) -> Option<Value> {
    let result = match kind {
        FieldKind::String { max_len, pattern } => check_string(value, *max_len, pattern.as_ref()),
        FieldKind::Integer { min, max } => check_integer(value, *min, *max),
        FieldKind::Number { min, max } => check_number(value, *min, *max),
        FieldKind::Boolean => check_boolean(value),
        FieldKind::Enum(domain) => normalize_enum(value, domain)
            .map(Value::String)
            .map_err(|_| format!("not one of [{}]", domain.codes.join(", "))),
        FieldKind::Object(ruleset) => match value {
            Value::Object(map) => {
                let before = violations.len();
                let nested = validate_record(ruleset, map, path, violations);
                return (violations.len() == before).then_some(Value::Object(nested));
            }
            _ => Err("expected object".to_string()),
        },
        FieldKind::List { item, min_items } => match value {
            Value::Array(items) if items.len() < *min_items => {
                Err(format!("expected at least {} item(s)", min_items))
            }
            Value::Array(items) => {
                let before = violations.len();
                let checked: Vec<Value> = items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, element)| {
                        check_value(&format!("{}[{}]", path, index), item, element, violations)
                    })
                    .collect();
                return (violations.len() == before).then_some(Value::Array(checked));
            }
            _ => Err("expected list".to_string()),
        },
    };

    match result {
        Ok(value) => Some(value),
        Err(reason) => {
            violations.push(Violation::new(path, reason));
            None
        }
    }
}

fn check_string(value: &Value, max_len: Option<usize>, pattern: Option<&Regex>) -> std::result::Result<Value, String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err("expected string".to_string()),
    };

    if let Some(max) = max_len {
        if text.chars().count() > max {
            return Err(format!("longer than {} characters", max));
        }
    }
    if let Some(re) = pattern {
        if !re.is_match(&text) {
            return Err(format!("does not match pattern {}", re.as_str()));
        }
    }

    Ok(Value::String(text))
}

fn check_integer(value: &Value, min: Option<i64>, max: Option<i64>) -> std::result::Result<Value, String> {
    let number = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| "expected integer".to_string())?;

    if let Some(min) = min {
        if number < min {
            return Err(format!("must be >= {}", min));
        }
    }
    if let Some(max) = max {
        if number > max {
            return Err(format!("must be <= {}", max));
        }
    }

    Ok(Value::Number(number.into()))
}

fn check_number(value: &Value, min: Option<f64>, max: Option<f64>) -> std::result::Result<Value, String> {
    let (number, as_value) = match value {
        Value::Number(n) => (n.as_f64(), Some(Value::Number(n.clone()))),
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(i) => (Some(i as f64), Some(Value::Number(i.into()))),
                Err(_) => {
                    let parsed = trimmed.parse::<f64>().ok();
                    (parsed, parsed.and_then(Number::from_f64).map(Value::Number))
                }
            }
        }
        _ => (None, None),
    };

    let (Some(number), Some(as_value)) = (number, as_value) else {
        return Err("expected number".to_string());
    };

    if let Some(min) = min {
        if number < min {
            return Err(format!("must be >= {}", min));
        }
    }
    if let Some(max) = max {
        if number > max {
            return Err(format!("must be <= {}", max));
        }
    }

    Ok(as_value)
}

fn check_boolean(value: &Value) -> std::result::Result<Value, String> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err("expected boolean".to_string()),
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(Value::Bool(true)),
            Some(0) => Ok(Value::Bool(false)),
            _ => Err("expected boolean".to_string()),
        },
        _ => Err("expected boolean".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::WEIGHT_UNIT;
    use serde_json::json;

    fn registry() -> RulesetRegistry {
        let mut registry = RulesetRegistry::new();
        registry.register(
            "item",
            1,
            ValidationRuleset::new()
                .required("name", FieldKind::string_max(5))
                .required("quantity", FieldKind::integer_min(1))
                .optional("weight_unit", FieldKind::Enum(WEIGHT_UNIT))
                .optional("active", FieldKind::Boolean)
                .optional(
                    "dims",
                    FieldKind::object(
                        ValidationRuleset::new().required("height", FieldKind::number_range(Some(0.0), None)),
                    ),
                ),
        );
        registry
    }

    #[test]
    fn test_unknown_ruleset_is_configuration_error() {
        let err = ItemValidator::new(&registry(), "item", 9).err().unwrap();
        assert!(matches!(err, SellerError::Configuration { .. }));
    }

    #[test]
    fn test_missing_required_field() {
        let validator = ItemValidator::new(&registry(), "item", 1).unwrap();
        let err = validator.validate_item(&json!({"name": "abc"})).unwrap_err();

        assert_eq!(err.violations(), &[Violation::new("quantity", "missing")]);
    }

    #[test]
    fn test_coercion_and_unknown_fields_dropped() {
        let validator = ItemValidator::new(&registry(), "item", 1).unwrap();
        let result = validator
            .validate_item(&json!({
                "extra": "dropped",
                "quantity": "3",
                "name": 12,
                "weight_unit": "KG",
                "active": "true"
            }))
            .unwrap();

        assert_eq!(
            Value::Object(result),
            json!({"name": "12", "quantity": 3, "weight_unit": "kg", "active": true})
        );
    }

    #[test]
    fn test_collects_all_violations_with_paths() {
        let validator = ItemValidator::new(&registry(), "item", 1).unwrap();
        let err = validator
            .validate_item(&json!({
                "name": "too long name",
                "quantity": 0,
                "dims": {"height": "tall"}
            }))
            .unwrap_err();

        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "quantity", "dims.height"]);
    }

    #[test]
    fn test_list_and_one_of() {
        let mut registry = RulesetRegistry::new();
        registry.register(
            "rows",
            1,
            ValidationRuleset::new()
                .optional("offer_id", FieldKind::string())
                .optional("product_id", FieldKind::integer_min(1))
                .required("tags", FieldKind::non_empty_list_of(FieldKind::integer()))
                .require_one_of(&["offer_id", "product_id"]),
        );
        let validator = ItemValidator::new(&registry, "rows", 1).unwrap();

        let err = validator
            .validate_item(&json!({"tags": [1, "x"]}))
            .unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["tags[1]", "offer_id|product_id"]);

        let ok = validator
            .validate_item(&json!({"product_id": "7", "tags": ["1"]}))
            .unwrap();
        assert_eq!(Value::Object(ok), json!({"product_id": 7, "tags": [1]}));
    }

    #[test]
    fn test_relaxed_keeps_only_named_required() {
        let ruleset = ValidationRuleset::new()
            .required("offer_id", FieldKind::string())
            .required("name", FieldKind::string());
        let relaxed = ruleset.relaxed(&["offer_id"]);

        assert!(relaxed.rule("offer_id").unwrap().required);
        assert!(!relaxed.rule("name").unwrap().required);
    }

    #[test]
    fn test_non_object_record() {
        let validator = ItemValidator::new(&registry(), "item", 1).unwrap();
        let err = validator.validate_item(&json!([1])).unwrap_err();
        assert_eq!(err.violations(), &[Violation::new("", "expected object")]);
    }
}
