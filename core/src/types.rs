//! Adapters for the API's JSON conventions.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Boolean in the API's integer convention: `1` is true, `0` is false.
///
/// Accepts a plain JSON boolean on input as well; any other integer is
/// rejected rather than coerced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ApiBool(pub bool);

impl From<bool> for ApiBool {
    fn from(value: bool) -> Self {
        ApiBool(value)
    }
}

impl From<ApiBool> for bool {
    fn from(value: ApiBool) -> Self {
        value.0
    }
}

impl fmt::Display for ApiBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "1" } else { "0" })
    }
}

impl Serialize for ApiBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(self.0))
    }
}

impl<'de> Deserialize<'de> for ApiBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ApiBoolVisitor;

        impl<'de> Visitor<'de> for ApiBoolVisitor {
            type Value = ApiBool;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("0 or 1")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ApiBool, E> {
                match v {
                    0 => Ok(ApiBool(false)),
                    1 => Ok(ApiBool(true)),
                    other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ApiBool, E> {
                match v {
                    0 => Ok(ApiBool(false)),
                    1 => Ok(ApiBool(true)),
                    other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
                }
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ApiBool, E> {
                Ok(ApiBool(v))
            }
        }

        deserializer.deserialize_any(ApiBoolVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        value: ApiBool,
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&Holder { value: ApiBool(true) }).unwrap();
        assert_eq!(json, r#"{"value":1}"#);
        let json = serde_json::to_string(&Holder { value: ApiBool(false) }).unwrap();
        assert_eq!(json, r#"{"value":0}"#);
    }

    #[test]
    fn deserializes_from_one_and_zero() {
        let h: Holder = serde_json::from_str(r#"{"value":1}"#).unwrap();
        assert!(h.value.0);
        let h: Holder = serde_json::from_str(r#"{"value":0}"#).unwrap();
        assert!(!h.value.0);
    }

    #[test]
    fn accepts_plain_json_booleans() {
        let h: Holder = serde_json::from_str(r#"{"value":true}"#).unwrap();
        assert!(h.value.0);
    }

    #[test]
    fn rejects_other_integers() {
        assert!(serde_json::from_str::<Holder>(r#"{"value":9}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"value":-1}"#).is_err());
    }
}
