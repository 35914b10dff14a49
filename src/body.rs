//! Request body handling utilities.
use {
    crate::{constants::MSG_BODY_MUST_BE_OBJECT, ApiError},
    bytes::Bytes,
    serde_json::{Map, Value},
};

/// A trait for converting various body types into the JSON object sent with a request.
///
/// Only JSON objects are valid Intersight request bodies; an empty object means "no body" and
/// selects a `GET`.
pub trait IntoJsonBody {
    /// Convert this object into a JSON object map.
    fn into_json_body(self) -> Result<Map<String, Value>, ApiError>;
}

/// Identity transformation: return the map as-is.
impl IntoJsonBody for Map<String, Value> {
    fn into_json_body(self) -> Result<Map<String, Value>, ApiError> {
        Ok(self)
    }
}

/// Accept a JSON object. `null` is treated as an empty body; any other value is rejected.
impl IntoJsonBody for Value {
    fn into_json_body(self) -> Result<Map<String, Value>, ApiError> {
        match self {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            _ => Err(ApiError::Validation(MSG_BODY_MUST_BE_OBJECT.to_string())),
        }
    }
}

/// Convert the unit type `()` into an empty body.
impl IntoJsonBody for () {
    fn into_json_body(self) -> Result<Map<String, Value>, ApiError> {
        Ok(Map::new())
    }
}

/// Serialize a body into the exact bytes that are digested and sent. Serialization is compact
/// (no whitespace) and keeps the key order of the map; an empty map serializes to `{}`.
pub fn serialize_body(body: &Map<String, Value>) -> Result<Bytes, ApiError> {
    serde_json::to_vec(body).map(Bytes::from).map_err(ApiError::Serialization)
}

#[cfg(test)]
mod tests {
    use {
        super::{serialize_body, IntoJsonBody},
        serde_json::{json, Map, Value},
    };

    #[test_log::test]
    fn test_empty_body_serializes_to_braces() {
        assert_eq!(serialize_body(&Map::new()).unwrap().as_ref(), b"{}");
        assert_eq!(serialize_body(&().into_json_body().unwrap()).unwrap().as_ref(), b"{}");
        assert_eq!(serialize_body(&Value::Null.into_json_body().unwrap()).unwrap().as_ref(), b"{}");
    }

    #[test_log::test]
    fn test_key_order_is_preserved() {
        let body = json!({"Name": "x", "Description": "y", "Enabled": true}).into_json_body().unwrap();
        assert_eq!(serialize_body(&body).unwrap().as_ref(), br#"{"Name":"x","Description":"y","Enabled":true}"#);
    }

    #[test_log::test]
    fn test_non_object_rejected() {
        for value in [json!([1, 2]), json!("Name"), json!(3), json!(false)] {
            let e = value.into_json_body().unwrap_err();
            assert_eq!(e.error_code(), "ValidationError");
            assert_eq!(e.to_string(), "The *body* value must be of type \"Object\"");
        }
    }
}
