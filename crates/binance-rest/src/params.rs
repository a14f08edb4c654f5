//! Request parameters, sanitization and query-string encoding
//!
//! Every request goes through the same pipeline: the caller's parameters are
//! collected into a [`Params`] map (insertion order preserved), empty values
//! are dropped by [`sanitize`], and the survivors are rendered by
//! [`build_query_string`]. For signed requests the rendered string is exactly
//! what the signer hashes, so encoding must be deterministic.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{RestError, RestResult};

/// Characters left unescaped in a query value: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Ordered request parameters
///
/// Keys keep the order in which they were first inserted. Values are JSON
/// values so that options structs can be merged in through `serde`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a parameter, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, returning the previous value for that key
    ///
    /// Replacing a value keeps the key at its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Merge a serializable options struct into the map
    ///
    /// Keys already present win, so required arguments inserted first can
    /// never be overridden by an options field of the same name. The options
    /// value must serialize to an object (or `null`, which adds nothing).
    pub fn merge_options<T: Serialize + ?Sized>(mut self, options: &T) -> RestResult<Self> {
        match serde_json::to_value(options) {
            Ok(Value::Object(fields)) => {
                for (key, value) in fields {
                    if !self.0.contains_key(&key) {
                        self.0.insert(key, value);
                    }
                }
                Ok(self)
            }
            Ok(Value::Null) => Ok(self),
            Ok(other) => Err(RestError::InvalidParameter(format!(
                "options must serialize to an object, got {other}"
            ))),
            Err(e) => Err(RestError::InvalidParameter(e.to_string())),
        }
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Parameter names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Check whether a value counts as absent
///
/// Absent means `null`, an empty or whitespace-only string, an empty array or
/// an empty object. `false` and `0` are real values and are kept.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Drop every empty entry, keeping the relative order of the rest
///
/// Idempotent: `sanitize(&sanitize(p)) == sanitize(p)`.
pub fn sanitize(params: &Params) -> Params {
    params
        .0
        .iter()
        .filter(|(_, value)| !is_empty_value(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Render parameters as `k1=v1&k2=v2`
///
/// Keys are emitted as-is. Values are stringified then percent-encoded with
/// the `encodeURIComponent` character set. Arrays of scalars render as
/// `["a","b"]` before encoding; arrays holding objects and bare objects render
/// as compact JSON. An empty map yields an empty string.
pub fn build_query_string(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| {
            let raw = stringify(value);
            format!("{key}={}", utf8_percent_encode(&raw, QUERY_VALUE))
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(is_scalar) => {
            let joined = items
                .iter()
                .map(scalar_text)
                .collect::<Vec<_>>()
                .join("\",\"");
            format!("[\"{joined}\"]")
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_values() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!("   ")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));

        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!("0")));
        assert!(!is_empty_value(&json!(["x"])));
    }

    #[test]
    fn test_sanitize_drops_empty_and_keeps_order() {
        let params = Params::new()
            .with("a", 1)
            .with("b", Value::Null)
            .with("c", "")
            .with("d", false)
            .with("e", 0)
            .with("f", "x");

        let clean = sanitize(&params);
        assert_eq!(clean.keys().collect::<Vec<_>>(), vec!["a", "d", "e", "f"]);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let params = Params::new()
            .with("a", "  ")
            .with("b", json!([]))
            .with("c", 5)
            .with("d", json!({"k": 1}));

        let once = sanitize(&params);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_query_string_basic() {
        let params = Params::new().with("symbol", "BNBUSDT").with("limit", 5);
        assert_eq!(build_query_string(&params), "symbol=BNBUSDT&limit=5");
    }

    #[test]
    fn test_query_string_empty() {
        assert_eq!(build_query_string(&Params::new()), "");
    }

    #[test]
    fn test_query_string_array_value() {
        let params = Params::new().with("k", json!(["a", "b"]));
        assert_eq!(build_query_string(&params), "k=%5B%22a%22%2C%22b%22%5D");
    }

    #[test]
    fn test_query_string_object_array_as_json() {
        let params = Params::new().with("batchOrders", json!([{"symbol": "BTCUSDT"}]));
        assert_eq!(
            build_query_string(&params),
            "batchOrders=%5B%7B%22symbol%22%3A%22BTCUSDT%22%7D%5D"
        );
    }

    #[test]
    fn test_query_string_reserved_characters() {
        let params = Params::new().with("note", "a b&c=d/é");
        assert_eq!(build_query_string(&params), "note=a%20b%26c%3Dd%2F%C3%A9");
    }

    #[test]
    fn test_query_string_unreserved_marks_survive() {
        let params = Params::new().with("v", "-_.!~*'()");
        assert_eq!(build_query_string(&params), "v=-_.!~*'()");
    }

    #[test]
    fn test_query_string_booleans_and_numbers() {
        let params = Params::new()
            .with("flag", false)
            .with("qty", 0.1)
            .with("n", -3);
        assert_eq!(build_query_string(&params), "flag=false&qty=0.1&n=-3");
    }

    #[test]
    fn test_query_string_decodes_back_to_scalars() {
        let params = Params::new()
            .with("symbol", "BTCUSDT")
            .with("note", "a b&c=d/é?#+%")
            .with("label", "日本 ü")
            .with("qty", 0.25)
            .with("count", 0)
            .with("flag", false)
            .with("on", true)
            .with("n", -42);

        let query = build_query_string(&params);
        let decoded: Vec<(String, String)> = query
            .split('&')
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap();
                let value = percent_encoding::percent_decode_str(value)
                    .decode_utf8()
                    .unwrap()
                    .into_owned();
                (key.to_string(), value)
            })
            .collect();

        let source: Vec<(String, String)> = params
            .iter()
            .map(|(key, value)| (key.clone(), stringify(value)))
            .collect();
        assert_eq!(decoded, source);
        assert_eq!(decoded[1].1, "a b&c=d/é?#+%");
        assert_eq!(decoded[5].1, "false");
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Opts {
        symbol: Option<String>,
        from_id: Option<u64>,
        limit: Option<u32>,
    }

    #[test]
    fn test_merge_options_required_args_win() {
        let opts = Opts {
            symbol: Some("ETHUSDT".into()),
            from_id: Some(7),
            limit: None,
        };
        let params = Params::new()
            .with("symbol", "BTCUSDT")
            .merge_options(&opts)
            .unwrap();

        assert_eq!(params.get("symbol"), Some(&json!("BTCUSDT")));
        assert_eq!(params.get("fromId"), Some(&json!(7)));
        assert_eq!(
            build_query_string(&sanitize(&params)),
            "symbol=BTCUSDT&fromId=7"
        );
    }

    #[test]
    fn test_merge_options_rejects_non_object() {
        let err = Params::new().merge_options(&5u32).unwrap_err();
        assert!(matches!(err, RestError::InvalidParameter(_)));
    }

    #[test]
    fn test_insert_replacement_keeps_position() {
        let mut params = Params::new().with("a", 1).with("b", 2);
        params.insert("a", 3);
        assert_eq!(build_query_string(&params), "a=3&b=2");
    }
}
