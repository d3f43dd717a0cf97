//! Integration tests for runtime schemas, JSON payloads and configuration.

use serde_json::json;
use tagval::{
    Error, FieldRules, FieldValue, Locale, Schema, Validate, Validator, ValidatorConfig,
};

pub struct Shipment {
    pub tracking: String,
    pub weight_grams: u32,
    pub origin_ip: String,
    pub tags: Vec<String>,
}

fn shipment_schema() -> Schema<Shipment> {
    Schema::new()
        .field("tracking", "required,alphanum,len=12", |s: &Shipment| &s.tracking)
        .label("Tracking number")
        .field("weight_grams", "gt=0,lte=30000", |s: &Shipment| &s.weight_grams)
        .field("origin_ip", "ip", |s: &Shipment| &s.origin_ip)
        .field("tags", "max=2", |s: &Shipment| &s.tags)
}

fn shipment() -> Shipment {
    Shipment {
        tracking: "ZX1234567890".to_string(),
        weight_grams: 1200,
        origin_ip: "10.0.0.1".to_string(),
        tags: vec!["fragile".to_string()],
    }
}

#[test]
fn schema_validates_foreign_type() {
    assert!(shipment_schema().validate(&shipment()).is_ok());

    let bad = Shipment {
        tracking: "ZX12".to_string(),
        weight_grams: 0,
        origin_ip: "300.1.1.1".to_string(),
        tags: vec!["a".into(), "b".into(), "c".into()],
    };
    let errors = shipment_schema().validate(&bad).unwrap_err();
    assert_eq!(
        errors.field_names(),
        vec!["tracking", "weight_grams", "origin_ip", "tags"]
    );
    assert_eq!(
        errors.first().unwrap().message,
        "Tracking number must have length 12"
    );
}

#[test]
fn bound_schema_uses_validate_trait() {
    let schema = shipment_schema();
    let value = shipment();
    assert!(schema.bind(&value).validate().is_ok());
}

#[test]
fn json_payload_validation() {
    let rules = FieldRules::new()
        .labeled("name", "Name", "required,range=2-20")
        .field("email", "required,email")
        .field("age", "gte=18");

    let validator = Validator::new();
    assert!(validator
        .validate_json(&json!({"name": "Li", "email": "li@example.cn", "age": 18}), &rules)
        .is_ok());

    let err = validator
        .validate_json(&json!({"name": "L", "age": 17.5}), &rules)
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.field_names(), vec!["name", "email", "age"]);
    assert_eq!(errors.to_string(), "Name must be between 2 and 20");
    assert_eq!(err.to_string(), "Name must be between 2 and 20");
}

#[test]
fn json_non_object_is_structural_error() {
    let err = tagval::validate_json(&json!(["a"]), &FieldRules::new()).unwrap_err();
    assert!(matches!(err, Error::NotARecord { found: "array" }));
    assert_eq!(err.to_string(), "validator: expected a record, got array");
}

#[test]
fn config_from_json_drives_messages() {
    let config = ValidatorConfig::from_json(
        r#"{
            "locale": "zh-CN",
            "messages": { "gte": "{field}不能小于{param}" }
        }"#,
    )
    .unwrap();
    let validator = Validator::with_config(config);
    let rules = FieldRules::new()
        .labeled("age", "年龄", "gte=18")
        .labeled("email", "邮箱", "email");

    let err = validator
        .validate_json(&json!({"age": 3, "email": "x"}), &rules)
        .unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().messages(),
        vec!["年龄不能小于18", "邮箱必须是有效的邮箱地址"]
    );
}

#[test]
fn builder_config_and_overrides_compose() {
    let validator = Validator::builder()
        .config(ValidatorConfig::new().locale(Locale::ZhCn))
        .fallback_message("{field} is invalid")
        .rule("even", |v: &FieldValue<'_>, _: &str| {
            matches!(v, FieldValue::Int(n) if n % 2 == 0)
        })
        .build();

    let err = validator
        .validate_json(&json!({"n": 3}), &FieldRules::new().field("n", "even"))
        .unwrap_err();
    assert_eq!(err.validation_errors().unwrap().messages(), vec!["n is invalid"]);
}

#[test]
fn invalid_config_surfaces_as_error() {
    let err = ValidatorConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
