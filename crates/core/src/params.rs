//! Pure helper functions for extracting typed options from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail, so a partially filled config object is always usable.

use serde_json::Value;

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_bool --

    #[test]
    fn param_bool_extracts_true() {
        let params = json!({"enable_alpha": true});
        assert!(param_bool(&params, "enable_alpha", false));
    }

    #[test]
    fn param_bool_returns_default_when_key_missing() {
        let params = json!({});
        assert!(param_bool(&params, "enable_alpha", true));
    }

    #[test]
    fn param_bool_returns_default_for_wrong_type() {
        let params = json!({"enable_alpha": 1});
        assert!(!param_bool(&params, "enable_alpha", false));
    }

    #[test]
    fn param_bool_returns_default_for_non_object() {
        let params = json!("not an object");
        assert!(param_bool(&params, "enable_alpha", true));
    }

    // -- param_string --

    #[test]
    fn param_string_extracts_existing_string() {
        let params = json!({"color_model": "hsl"});
        assert_eq!(param_string(&params, "color_model", "rgb"), "hsl");
    }

    #[test]
    fn param_string_returns_default_for_wrong_type() {
        let params = json!({"color_model": 42});
        assert_eq!(param_string(&params, "color_model", "rgb"), "rgb");
    }
}
