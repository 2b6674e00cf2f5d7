use crate::core::validator::{FieldKind, RulesetRegistry, ValidationRuleset};
use crate::domain::enums::{DIMENSION_UNIT, VAT, WEIGHT_UNIT};
use crate::utils::error::Result;

pub const PRODUCT_CREATE: &str = "product.create";
pub const PRODUCT_UPDATE: &str = "product.update";
pub const PRODUCT_STOCKS: &str = "product.stocks";
pub const POSTING_SHIP_ITEM: &str = "posting.ship_item";

// 平台要求價格以字串傳送
const PRICE_PATTERN: &str = r"^\d+(\.\d{1,2})?$";

/// 內建的規則表
pub fn default_registry() -> Result<RulesetRegistry> {
    let mut registry = RulesetRegistry::new();

    let create_v2 = product_create_v2()?;
    registry.register(PRODUCT_UPDATE, 2, create_v2.relaxed(&["offer_id"]));
    registry.register(PRODUCT_CREATE, 2, create_v2);
    registry.register(PRODUCT_CREATE, 1, product_create_v1()?);
    registry.register(PRODUCT_STOCKS, 1, product_stocks_v1());
    registry.register(POSTING_SHIP_ITEM, 2, posting_ship_item_v2());

    Ok(registry)
}

/// v1 與 v2 共用的尺寸、重量、價格欄位
fn product_base() -> Result<ValidationRuleset> {
    Ok(ValidationRuleset::new()
        .required("offer_id", FieldKind::string_max(50))
        .required("name", FieldKind::string_max(500))
        .required("category_id", FieldKind::integer_min(1))
        .required("price", FieldKind::string_pattern(PRICE_PATTERN)?)
        .optional("old_price", FieldKind::string_pattern(PRICE_PATTERN)?)
        .optional("premium_price", FieldKind::string_pattern(PRICE_PATTERN)?)
        .optional("barcode", FieldKind::string_max(100))
        .required("height", FieldKind::integer_min(1))
        .required("depth", FieldKind::integer_min(1))
        .required("width", FieldKind::integer_min(1))
        .required("dimension_unit", FieldKind::Enum(DIMENSION_UNIT))
        .required("weight", FieldKind::integer_min(1))
        .required("weight_unit", FieldKind::Enum(WEIGHT_UNIT)))
}

fn product_create_v1() -> Result<ValidationRuleset> {
    let attribute = ValidationRuleset::new()
        .required("id", FieldKind::integer_min(1))
        .optional("value", FieldKind::string())
        .optional("collection", FieldKind::list_of(FieldKind::string()));

    Ok(product_base()?
        .optional("description", FieldKind::string_max(6000))
        .optional("vat", FieldKind::Enum(VAT))
        .required("images", FieldKind::non_empty_list_of(FieldKind::string()))
        .required("attributes", FieldKind::non_empty_list_of(FieldKind::object(attribute))))
}

fn product_create_v2() -> Result<ValidationRuleset> {
    let value = ValidationRuleset::new()
        .optional("dictionary_value_id", FieldKind::integer_min(0))
        .optional("value", FieldKind::string())
        .require_one_of(&["dictionary_value_id", "value"]);

    let attribute = ValidationRuleset::new()
        .required("complex_id", FieldKind::integer_min(0))
        .required("id", FieldKind::integer_min(1))
        .required("values", FieldKind::non_empty_list_of(FieldKind::object(value)));

    let pdf = ValidationRuleset::new()
        .optional("index", FieldKind::integer_min(0))
        .required("name", FieldKind::string())
        .required("src_url", FieldKind::string());

    Ok(product_base()?
        .required("vat", FieldKind::Enum(VAT))
        .optional("primary_image", FieldKind::string())
        .optional("color_image", FieldKind::string())
        .required("images", FieldKind::non_empty_list_of(FieldKind::string()))
        .optional("images360", FieldKind::list_of(FieldKind::string()))
        .optional("pdf_list", FieldKind::list_of(FieldKind::object(pdf)))
        .required("attributes", FieldKind::non_empty_list_of(FieldKind::object(attribute)))
        .optional(
            "complex_attributes",
            FieldKind::list_of(FieldKind::object(
                ValidationRuleset::new().optional("attributes", FieldKind::list_of(FieldKind::object(
                    ValidationRuleset::new()
                        .required("complex_id", FieldKind::integer_min(0))
                        .required("id", FieldKind::integer_min(1))
                        .optional("values", FieldKind::list_of(FieldKind::object(
                            ValidationRuleset::new()
                                .optional("dictionary_value_id", FieldKind::integer_min(0))
                                .optional("value", FieldKind::string()),
                        ))),
                ))),
            )),
        ))
}

fn product_stocks_v1() -> ValidationRuleset {
    ValidationRuleset::new()
        .optional("offer_id", FieldKind::string_max(50))
        .optional("product_id", FieldKind::integer_min(1))
        .required("stock", FieldKind::integer_min(0))
        .require_one_of(&["offer_id", "product_id"])
}

fn posting_ship_item_v2() -> ValidationRuleset {
    ValidationRuleset::new()
        .required("quantity", FieldKind::integer_min(1))
        .required("sku", FieldKind::integer_min(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validator::ItemValidator;
    use crate::utils::error::SellerError;
    use serde_json::{json, Value};

    fn product_v2() -> Value {
        json!({
            "offer_id": "ABC-1",
            "name": "Kettle",
            "category_id": 17036076,
            "price": 1200,
            "vat": "0.1",
            "height": 250,
            "depth": 200,
            "width": "150",
            "dimension_unit": "mm",
            "weight": 900,
            "weight_unit": "g",
            "images": ["https://cdn.example.com/kettle.jpg"],
            "attributes": [
                {"complex_id": 0, "id": 85, "values": [{"value": "Acme"}]}
            ],
            "internal_note": "never sent"
        })
    }

    #[test]
    fn test_registry_has_builtin_rulesets() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), 5);
        assert!(registry.get(PRODUCT_CREATE, 2).is_some());
        assert!(registry.get(PRODUCT_CREATE, 3).is_none());
    }

    #[test]
    fn test_product_create_v2_normalizes() {
        let registry = default_registry().unwrap();
        let validator = ItemValidator::new(&registry, PRODUCT_CREATE, 2).unwrap();
        let item = validator.validate_item(&product_v2()).unwrap();

        assert_eq!(item["price"], json!("1200"));
        assert_eq!(item["width"], json!(150));
        assert!(!item.contains_key("internal_note"));
    }

    #[test]
    fn test_vat_required_in_v2_but_not_v1() {
        let registry = default_registry().unwrap();
        let mut item = product_v2();
        item.as_object_mut().unwrap().remove("vat");

        let v2 = ItemValidator::new(&registry, PRODUCT_CREATE, 2).unwrap();
        let err = v2.validate_item(&item).unwrap_err();
        assert!(matches!(err, SellerError::ValidationFailed { .. }));
        assert_eq!(err.violations()[0].field, "vat");

        item["attributes"] = json!([{"id": 85, "value": "Acme"}]);
        let v1 = ItemValidator::new(&registry, PRODUCT_CREATE, 1).unwrap();
        assert!(v1.validate_item(&item).is_ok());
    }

    #[test]
    fn test_update_requires_only_offer_id() {
        let registry = default_registry().unwrap();
        let validator = ItemValidator::new(&registry, PRODUCT_UPDATE, 2).unwrap();

        let item = validator
            .validate_item(&json!({"offer_id": "ABC-1", "price": "99.90"}))
            .unwrap();
        assert_eq!(Value::Object(item), json!({"offer_id": "ABC-1", "price": "99.90"}));

        let err = validator.validate_item(&json!({"price": "1"})).unwrap_err();
        assert_eq!(err.violations()[0].field, "offer_id");
    }

    #[test]
    fn test_price_pattern() {
        let registry = default_registry().unwrap();
        let validator = ItemValidator::new(&registry, PRODUCT_UPDATE, 2).unwrap();
        let err = validator
            .validate_item(&json!({"offer_id": "A", "price": "12,50"}))
            .unwrap_err();
        assert_eq!(err.violations()[0].field, "price");
    }
}
