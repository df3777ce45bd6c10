// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Input variable encoding.
//!
//! Terraform's `-var key=<expr>` flag takes an expression in Terraform's own syntax.
//! JSON literals (strings, numbers, bools, `null`, arrays, objects with `"key": value`
//! pairs) are a valid subset of that syntax, so every [`serde_json::Value`] can be
//! passed through verbatim as its JSON encoding. This is how nested structures like a
//! list of endpoint objects travel to the module without a `.tfvars` file on disk.

use serde_json::Value;

/// Encode one variable as the argument text for `-var`, ie `key=<expr>`.
#[must_use]
pub fn encode_var(key: &str, value: &Value) -> String {
    format!("{key}={value}")
}

/// Expand a variable map into the flag sequence `-var k1=v1 -var k2=v2 ...`. An empty
/// map produces no flags at all.
#[must_use]
pub fn var_args(vars: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut acc = Vec::with_capacity(vars.len() * 2);
    for (key, value) in vars {
        acc.push("-var".to_string());
        acc.push(encode_var(key, value));
    }
    acc
}

#[cfg(test)]
mod tests_vars {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_encode_string_var() {
        let encoded = encode_var("region", &json!("us-central1"));
        assert_eq!(encoded, r#"region="us-central1""#);
    }

    #[test]
    fn test_encode_null_and_bool_vars() {
        assert_eq!(encode_var("ip", &json!(null)), "ip=null");
        assert_eq!(encode_var("enabled", &json!(true)), "enabled=true");
    }

    #[test]
    fn test_encode_nested_list_of_objects() {
        let value = json!([{ "network_name": "default", "ip_address_literal": null }]);
        let encoded = encode_var("psc_endpoints", &value);
        assert_eq!(
            encoded,
            r#"psc_endpoints=[{"ip_address_literal":null,"network_name":"default"}]"#
        );
    }

    #[test]
    fn test_empty_map_produces_no_flags() {
        let vars = serde_json::Map::new();
        assert!(var_args(&vars).is_empty());
    }

    #[test]
    fn test_var_args_interleaves_flags() {
        let mut vars = serde_json::Map::new();
        vars.insert("region".to_string(), json!("us-central1"));
        vars.insert("count".to_string(), json!(4));
        let args = var_args(&vars);
        // serde_json::Map is keyed on a BTreeMap, so flags come out in key order.
        assert_eq!(
            args,
            [
                "-var",
                "count=4",
                "-var",
                r#"region="us-central1""#,
            ]
        );
    }
}
