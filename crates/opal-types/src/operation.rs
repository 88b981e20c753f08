use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;

/// Kind of a structured store operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpKind {
    /// Set a key to a value (key-value stores).
    Put,
    /// Delete a key (key-value stores).
    Del,
    /// Increment by an amount (counter stores).
    Inc,
}

/// Payload convention for structured store types.
///
/// Event-log stores treat entry payloads as opaque bytes; key-value and
/// counter stores encode an `Operation` as JSON instead. A payload that
/// does not parse as an `Operation` is simply not addressed to a
/// structured index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// What to do.
    pub kind: OpKind,
    /// Target key, when the kind addresses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Value argument, when the kind carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Operation {
    /// A `PUT key = value` operation.
    pub fn put(key: impl Into<String>, value: Value) -> Self {
        Self {
            kind: OpKind::Put,
            key: Some(key.into()),
            value: Some(value),
        }
    }

    /// A `DEL key` operation.
    pub fn del(key: impl Into<String>) -> Self {
        Self {
            kind: OpKind::Del,
            key: Some(key.into()),
            value: None,
        }
    }

    /// An `INC amount` operation.
    pub fn inc(amount: i64) -> Self {
        Self {
            kind: OpKind::Inc,
            key: None,
            value: Some(Value::from(amount)),
        }
    }

    /// Encode for use as an entry payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Payload(e.to_string()))
    }

    /// Decode from an entry payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Payload(e.to_string()))
    }

    /// The increment amount, for `INC` operations. Defaults to 1 when the
    /// value is absent or not an integer.
    pub fn amount(&self) -> i64 {
        self.value
            .as_ref()
            .and_then(Value::as_i64)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_roundtrip() {
        let op = Operation::put("name", Value::from("ada"));
        let parsed = Operation::from_bytes(&op.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, op);
        assert_eq!(parsed.kind, OpKind::Put);
        assert_eq!(parsed.key.as_deref(), Some("name"));
    }

    #[test]
    fn del_has_no_value() {
        let op = Operation::del("name");
        assert_eq!(op.kind, OpKind::Del);
        assert!(op.value.is_none());
    }

    #[test]
    fn inc_amount() {
        assert_eq!(Operation::inc(5).amount(), 5);
        assert_eq!(Operation::inc(-3).amount(), -3);
    }

    #[test]
    fn amount_defaults_to_one() {
        let op = Operation {
            kind: OpKind::Inc,
            key: None,
            value: None,
        };
        assert_eq!(op.amount(), 1);
    }

    #[test]
    fn kind_serializes_uppercase() {
        let json = serde_json::to_string(&Operation::del("k")).unwrap();
        assert!(json.contains("\"DEL\""));
    }

    #[test]
    fn garbage_payload_is_rejected() {
        assert!(matches!(
            Operation::from_bytes(b"\x00\x01not json"),
            Err(TypeError::Payload(_))
        ));
    }
}
