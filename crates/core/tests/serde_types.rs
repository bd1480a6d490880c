//! Serialized forms of the shared types.
//!
//! Declared with `required-features = ["serde"]`; run with `cargo test --all-features`.

use tally_core::{ColumnConfig, FieldType, NullValueMode};

#[test]
fn test_field_type_names() {
    assert_eq!(serde_json::to_string(&FieldType::Number).unwrap(), r#""number""#);
    assert_eq!(serde_json::to_string(&FieldType::Time).unwrap(), r#""time""#);
    let parsed: FieldType = serde_json::from_str(r#""boolean""#).unwrap();
    assert_eq!(parsed, FieldType::Boolean);
}

#[test]
fn test_column_config_camel_case() {
    let json = r#"{ "displayName": "Load", "decimals": 2, "nullValueMode": "asZero" }"#;
    let config: ColumnConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.display_name.as_deref(), Some("Load"));
    assert_eq!(config.decimals, Some(2));
    assert_eq!(config.null_value_mode, Some(NullValueMode::AsZero));
    assert_eq!(config.unit, None);
}
