use {
    crate::{
        body::{serialize_body, IntoJsonBody},
        canonical::{encode_path, encode_path_segment, encode_query},
        constants::*,
        ApiError,
    },
    bytes::Bytes,
    http::Method,
    log::debug,
    serde_json::{Map, Value},
};

/// The kind of call made against an Intersight resource. Chosen from the shape of the request:
/// whether a body is present and whether a moid was supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read a resource collection or object (`GET`).
    Get,

    /// Create an object (`POST`).
    Create,

    /// Modify an existing object identified by its moid (`PATCH`).
    Update,
}

impl Operation {
    /// Choose the operation for a request shape.
    ///
    /// | body      | moid    | operation |
    /// |-----------|---------|-----------|
    /// | non-empty | present | `Update`  |
    /// | non-empty | absent  | `Create`  |
    /// | empty     | any     | `Get`     |
    pub fn from_shape(has_body: bool, has_moid: bool) -> Self {
        match (has_body, has_moid) {
            (true, true) => Self::Update,
            (true, false) => Self::Create,
            (false, _) => Self::Get,
        }
    }

    /// The HTTP method used for this operation.
    pub fn method(&self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Create => Method::POST,
            Self::Update => Method::PATCH,
        }
    }
}

/// A description of a single Intersight API call, before it is validated and signed.
///
/// `query_params` and `body` are JSON values; both must be objects (or `null`, meaning empty) when
/// the request is signed. Key order is preserved in the query string and the serialized body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    resource_path: String,
    query_params: Value,
    body: Value,
    moid: Option<String>,
}

impl ApiRequest {
    /// Create a request for `resource_path` (e.g. `/ntp/Policies`) with no query parameters, no body
    /// and no moid.
    pub fn new<S: Into<String>>(resource_path: S) -> Self {
        Self {
            resource_path: resource_path.into(),
            query_params: Value::Object(Map::new()),
            body: Value::Object(Map::new()),
            moid: None,
        }
    }

    /// Create a request that reads `resource_path`. Query parameters may be added with
    /// [`with_query_param`][Self::with_query_param].
    pub fn get<S: Into<String>>(resource_path: S) -> Self {
        Self::new(resource_path)
    }

    /// Create a request that creates an object under `resource_path`.
    ///
    /// An empty `body` makes this a read; the operation always follows the request shape.
    pub fn create<S: Into<String>>(resource_path: S, body: Value) -> Self {
        Self::new(resource_path).with_body(body)
    }

    /// Create a request that modifies the object `moid` under `resource_path`.
    pub fn update<S, M>(resource_path: S, moid: M, body: Value) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::new(resource_path).with_moid(moid).with_body(body)
    }

    /// Replace the query parameters.
    pub fn with_query_params(mut self, query_params: Value) -> Self {
        self.query_params = query_params;
        self
    }

    /// Append a single query parameter. If the existing query parameters are not an object they are
    /// replaced.
    pub fn with_query_param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        if !self.query_params.is_object() {
            self.query_params = Value::Object(Map::new());
        }

        if let Value::Object(ref mut map) = self.query_params {
            map.insert(key.into(), value.into());
        }

        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Set the moid of the object to modify.
    pub fn with_moid<M: Into<String>>(mut self, moid: M) -> Self {
        self.moid = Some(moid.into());
        self
    }

    /// The resource path, relative to the base URL.
    #[inline(always)]
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// The query parameters.
    #[inline(always)]
    pub fn query_params(&self) -> &Value {
        &self.query_params
    }

    /// The body.
    #[inline(always)]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The moid, if any.
    #[inline(always)]
    pub fn moid(&self) -> Option<&str> {
        self.moid.as_deref()
    }

    /// Validate the request and resolve it into the operation, the path (relative to the base
    /// path, including the moid suffix or query string) and the exact body bytes to digest and send.
    ///
    /// The resource path and moid are percent-encoded here, once. The resolved path is used verbatim
    /// both in the signed request target and in the URL that is sent.
    ///
    /// # Errors
    /// Returns [`ApiError::Validation`] if the query parameters or body are not objects, if a query
    /// value is not a scalar, if the resource path has a `.` or `..` segment, or if the moid is not
    /// exactly 24 bytes long.
    pub(crate) fn resolve(&self) -> Result<ResolvedRequest, ApiError> {
        let query = query_pairs(&self.query_params)?;
        let body = self.body.clone().into_json_body()?;
        validate_resource_path(&self.resource_path)?;

        if let Some(moid) = self.moid.as_deref() {
            validate_moid(moid)?;
        }

        let resource_path = encode_path(&self.resource_path);
        let operation = Operation::from_shape(!body.is_empty(), self.moid.is_some());
        let path = match (operation, self.moid.as_deref()) {
            (Operation::Update, Some(moid)) => format!("{}/{}", resource_path, encode_path_segment(moid)),
            (Operation::Get, _) if !query.is_empty() => format!("{}?{}", resource_path, encode_query(&query)),
            _ => resource_path,
        };

        debug!("Resolved {} request to {:?} {}", self.resource_path, operation, path);

        Ok(ResolvedRequest {
            operation,
            path,
            body: serialize_body(&body)?,
        })
    }
}

/// A validated request: operation chosen, path built, body serialized.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ResolvedRequest {
    pub(crate) operation: Operation,
    pub(crate) path: String,
    pub(crate) body: Bytes,
}

/// Reject `.` and `..` path segments. HTTP clients collapse them before sending, which would make
/// the path on the wire differ from the signed one.
pub(crate) fn validate_resource_path(resource_path: &str) -> Result<(), ApiError> {
    if resource_path.split('/').any(|segment| segment == "." || segment == "..") {
        Err(ApiError::Validation(MSG_INVALID_RESOURCE_PATH.to_string()))
    } else {
        Ok(())
    }
}

/// Check that a moid is exactly 24 bytes long when UTF-8 encoded. The content is not inspected.
pub(crate) fn validate_moid(moid: &str) -> Result<(), ApiError> {
    if moid.len() == MOID_LENGTH {
        Ok(())
    } else {
        Err(ApiError::Validation(MSG_INVALID_MOID.to_string()))
    }
}

/// Convert query parameters into ordered `(key, value)` string pairs. `null` means no parameters.
/// Strings are used as-is; numbers and booleans use their JSON rendering.
fn query_pairs(query_params: &Value) -> Result<Vec<(String, String)>, ApiError> {
    let map = match query_params {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        _ => return Err(ApiError::Validation(MSG_QUERY_PARAMS_MUST_BE_OBJECT.to_string())),
    };

    let mut result = Vec::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Err(ApiError::Validation(format!("{}{:?}", MSG_QUERY_VALUE_MUST_BE_SCALAR, key))),
        };
        result.push((key.clone(), value));
    }

    Ok(result)
}
