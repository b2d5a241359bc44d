//! Masking behavior on realistic request payloads.
//!
//! These tests focus on nested objects and arrays, character counting across
//! multi-byte strings, and the guarantees callers rely on when logging masked
//! output (shape preserved, input untouched, idempotence).

use devops_logger::{mask, Masker, SensitiveKeys};
use serde_json::json;

#[test]
fn test_mask_function_masks_the_required_values() {
    let payload = json!({
        "id": "123456",
        "payload": {
            "key": "mask-this-value",
            "users": [
                {"id": 1, "password": "1"},
                {"id": 2, "password": "22"},
                {"id": 3, "password": "333"},
            ],
        },
    });

    let expected = json!({
        "id": "123456",
        "payload": {
            "key": "***************",
            "users": [
                {"id": 1, "password": "*"},
                {"id": 2, "password": "**"},
                {"id": 3, "password": "***"},
            ],
        },
    });

    assert_eq!(mask(&payload, ["key", "password"]), expected);
}

#[test]
fn test_mask_counts_characters_not_bytes() {
    // Chinese characters (3 bytes each in UTF-8)
    let masked = mask(&json!({"secret": "秘密数据"}), ["secret"]);
    assert_eq!(masked, json!({"secret": "****"}));

    let masked = mask(&json!({"secret": "secret🔒data"}), ["secret"]);
    assert_eq!(masked, json!({"secret": "***********"}));
}

#[test]
fn test_mask_of_empty_string_is_empty() {
    assert_eq!(mask(&json!({"key": ""}), ["key"]), json!({"key": ""}));
}

#[test]
fn test_mask_of_null_uses_its_string_length() {
    assert_eq!(mask(&json!({"key": null}), ["key"]), json!({"key": "****"}));
}

#[test]
fn test_mask_applies_inside_nested_arrays() {
    let payload = json!([[{"token": "abcd"}], {"items": [[{"token": "ab"}]]}]);
    assert_eq!(
        mask(&payload, ["token"]),
        json!([[{"token": "****"}], {"items": [[{"token": "**"}]]}])
    );
}

#[test]
fn test_mask_is_idempotent_on_request_payload() {
    let request = json!({
        "id": "PR-1",
        "asset": {
            "params": [
                {"id": "api_key", "value": "sk_live_123", "password": 987654},
                {"id": "region", "value": "eu"},
            ],
        },
    });
    let masker = Masker::new(["value", "password"]);

    let once = masker.mask(&request);
    let twice = masker.mask(&once);

    assert_eq!(once, twice);
    assert_eq!(once["asset"]["params"][0]["value"], json!("***********"));
    assert_eq!(once["asset"]["params"][0]["password"], json!("******"));
    assert_eq!(once["asset"]["params"][1]["id"], json!("region"));
}

#[test]
fn test_sensitive_keys_can_be_collected_and_extended() {
    let mut keys: SensitiveKeys = ["password"].into_iter().collect();
    keys.extend(vec!["key".to_string()]);

    assert!(keys.contains("password"));
    assert!(keys.contains("key"));
    assert!(!keys.contains("id"));

    let masker = Masker::new(["password", "key"]);
    assert_eq!(masker.keys(), &keys);
}

#[test]
fn test_masked_output_preserves_shape() {
    let payload = json!({"a": [1, {"b": [true, null]}], "c": {"password": [1, 2, 3]}});
    let masked = mask(&payload, ["password"]);

    assert_eq!(masked["a"], payload["a"]);
    assert_eq!(masked["c"]["password"], json!("*******"));
}
