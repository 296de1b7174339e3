//! Home info payload and its cached envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque home info payload.
///
/// The provider never interprets the payload beyond its truthiness, which
/// follows the browser's rules: `null`, `false`, `0` and `""` are falsy,
/// everything else (including empty objects and arrays) is truthy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeInfo(Value);

impl HomeInfo {
    /// Wrap a raw JSON value. `null` has no payload and yields `None`.
    pub fn new(value: Value) -> Option<Self> {
        if value.is_null() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Wrap a freshly fetched value, rejecting falsy payloads.
    pub fn from_fetched(value: Value) -> Option<Self> {
        Self::new(value).filter(Self::is_truthy)
    }

    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Look up a top-level field of an object payload.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The `title` field, if the payload carries one as a string.
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Cache entry persisted as JSON text: `{ "data": ..., "timestamp": ... }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CachedEnvelope {
    pub data: Option<HomeInfo>,
    /// Milliseconds since the Unix epoch when the entry was written.
    pub timestamp: Option<u64>,
}

impl CachedEnvelope {
    pub fn new(data: HomeInfo, timestamp: u64) -> Self {
        Self {
            data: Some(data),
            timestamp: Some(timestamp),
        }
    }

    /// Parse a stored envelope.
    ///
    /// Any valid JSON document is accepted. `data` is read from the `data`
    /// field of an object; a missing field, `null`, or a non-object document
    /// all produce `data: None`.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self {
            data: value.get("data").cloned().and_then(HomeInfo::new),
            timestamp: value.get("timestamp").and_then(Value::as_u64),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_follows_browser_rules() {
        let falsy = [json!(false), json!(0), json!(0.0), json!("")];
        for value in falsy {
            assert!(!HomeInfo::new(value).unwrap().is_truthy());
        }

        let truthy = [json!(true), json!(1), json!("x"), json!([]), json!({})];
        for value in truthy {
            assert!(HomeInfo::new(value).unwrap().is_truthy());
        }

        assert!(HomeInfo::new(Value::Null).is_none());
    }

    #[test]
    fn test_from_fetched_rejects_falsy() {
        assert!(HomeInfo::from_fetched(json!(null)).is_none());
        assert!(HomeInfo::from_fetched(json!("")).is_none());
        assert!(HomeInfo::from_fetched(json!(0)).is_none());
        assert!(HomeInfo::from_fetched(json!({"title": "Home"})).is_some());
    }

    #[test]
    fn test_parse_envelope_with_data() {
        let env = CachedEnvelope::parse(r#"{"data":{"title":"My Home"},"timestamp":1000}"#)
            .unwrap();
        assert_eq!(env.data.as_ref().and_then(HomeInfo::title), Some("My Home"));
        assert_eq!(env.timestamp, Some(1000));
    }

    #[test]
    fn test_parse_envelope_without_data() {
        assert_eq!(CachedEnvelope::parse(r#"{"timestamp":5}"#).unwrap().data, None);
        assert_eq!(CachedEnvelope::parse(r#"{"data":null}"#).unwrap().data, None);
        assert_eq!(CachedEnvelope::parse("42").unwrap().data, None);
        assert_eq!(CachedEnvelope::parse("null").unwrap().data, None);
    }

    #[test]
    fn test_parse_envelope_keeps_falsy_data() {
        let env = CachedEnvelope::parse(r#"{"data":0}"#).unwrap();
        assert_eq!(env.data, HomeInfo::new(json!(0)));
    }

    #[test]
    fn test_parse_envelope_rejects_invalid_json() {
        assert!(CachedEnvelope::parse("{not json").is_err());
        assert!(CachedEnvelope::parse("").is_err());
    }

    #[test]
    fn test_envelope_json_shape() {
        let info = HomeInfo::new(json!({"title": "Home"})).unwrap();
        let json = CachedEnvelope::new(info, 1000).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, json!({"data": {"title": "Home"}, "timestamp": 1000}));
    }
}
