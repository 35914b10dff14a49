use {
    crate::{
        constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
        endpoint::Endpoint,
        signature::{sign, sign_at, SignedRequest},
        signing_key::{ApiKey, KeyStore},
        ApiError, ApiRequest,
    },
    async_trait::async_trait,
    bytes::Bytes,
    chrono::{DateTime, Utc},
    derive_builder::Builder,
    http::{Request, Response},
    log::debug,
    serde_json::Value,
    std::time::Duration,
};

/// Configuration for an [`IntersightClient`].
///
/// ```rust
/// use intersight_signature::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .base_url("https://appliance.example.com/api/v1")
///     .timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url(), "https://appliance.example.com/api/v1");
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(derive(Debug))]
pub struct ClientConfig {
    /// Base URL of the API. Resource paths are appended to it.
    #[builder(setter(into), default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,

    /// Timeout applied to each HTTP call.
    #[builder(default = "DEFAULT_TIMEOUT")]
    timeout: Duration,
}

impl ClientConfig {
    /// Create a [`ClientConfigBuilder`] to construct a [`ClientConfig`].
    #[inline]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Retrieve the base URL.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieve the timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Sends a signed request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request`, returning the response status, headers, and body.
    ///
    /// # Errors
    /// Implementations return [`ApiError::Network`] when the request cannot be delivered or the
    /// response cannot be read. A non-2xx response is not an error at this level.
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, ApiError>;
}

/// A [`Transport`] backed by a `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose calls time out after `timeout`.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Configuration(format!("Unable to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, ApiError> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut result = Response::new(body);
        *result.status_mut() = status;
        *result.headers_mut() = headers;
        Ok(result)
    }
}

/// A client for the Intersight REST API.
///
/// Each client owns its keys; set them with [`set_public_key`][Self::set_public_key] and
/// [`set_private_key`][Self::set_private_key] (or [`set_key`][Self::set_key]) before making calls.
#[derive(Debug)]
pub struct IntersightClient<T = ReqwestTransport> {
    endpoint: Endpoint,
    keys: KeyStore,
    transport: T,
}

impl IntersightClient<ReqwestTransport> {
    /// Create a client for `https://intersight.com/api/v1` with a 30 second timeout.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client from `config`.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] if the base URL is invalid or the HTTP client cannot be
    /// built.
    pub fn with_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_transport(config, ReqwestTransport::new(config.timeout())?)
    }
}

impl<T: Transport> IntersightClient<T> {
    /// Create a client from `config` that sends requests through `transport`. The timeout in
    /// `config` is the transport's concern and is ignored here.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] if the base URL is invalid.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self, ApiError> {
        Ok(Self {
            endpoint: Endpoint::parse(config.base_url())?,
            keys: KeyStore::new(),
            transport,
        })
    }

    /// Set the API key identifier, replacing any previous value.
    pub fn set_public_key<S: Into<String>>(&mut self, key_id: S) {
        self.keys.set_public_key(key_id);
    }

    /// Set the PEM-encoded RSA private key, replacing any previous value.
    pub fn set_private_key<S: Into<String>>(&mut self, private_key_pem: S) {
        self.keys.set_private_key(private_key_pem);
    }

    /// Set both halves of the key.
    pub fn set_key(&mut self, key: ApiKey) {
        self.keys.set_key(key);
    }

    /// The keys used to sign requests.
    #[inline(always)]
    pub fn key_store(&self) -> &KeyStore {
        &self.keys
    }

    /// The endpoint requests are sent to.
    #[inline(always)]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The transport requests are sent through.
    #[inline(always)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sign `request` as of `timestamp` without sending it.
    ///
    /// # Errors
    /// See [`sign_at`][crate::sign_at].
    pub fn sign_at(&self, request: &ApiRequest, timestamp: &DateTime<Utc>) -> Result<SignedRequest, ApiError> {
        sign_at(&self.keys, &self.endpoint, request, timestamp)
    }

    /// Sign and send `request`, returning the parsed JSON response.
    ///
    /// A 2xx response with an empty body returns [`Value::Null`].
    ///
    /// # Errors
    /// * [`ApiError::Validation`], [`ApiError::Configuration`], [`ApiError::KeyFormat`]: the
    ///   request could not be signed. Nothing is sent.
    /// * [`ApiError::Network`]: the request could not be delivered.
    /// * [`ApiError::Server`]: the server returned a non-2xx status.
    /// * [`ApiError::MalformedResponse`]: a 2xx response body was not JSON.
    pub async fn call(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let signed = sign(&self.keys, &self.endpoint, request)?;
        debug!("Sending {} {}", signed.method(), signed.url());

        let response = self.transport.send(signed.into_http_request()?).await?;
        handle_response(response)
    }

    /// Invoke the API using the request shape to choose the method: a non-empty `body` with a
    /// `moid` is a `PATCH` of that object, a non-empty `body` alone is a `POST`, and anything
    /// else is a `GET` with `query_params` as the query string.
    ///
    /// `query_params` and `body` must be JSON objects; `null` is accepted as empty.
    ///
    /// # Errors
    /// See [`call`][Self::call].
    pub async fn intersight_call(
        &self,
        resource_path: &str,
        query_params: Value,
        body: Value,
        moid: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut request = ApiRequest::new(resource_path).with_query_params(query_params).with_body(body);
        if let Some(moid) = moid {
            request = request.with_moid(moid);
        }

        self.call(&request).await
    }
}

/// Map a response to the call result.
fn handle_response(response: Response<Bytes>) -> Result<Value, ApiError> {
    let status = response.status();
    let body = response.into_body();
    debug!("Received {} with {} byte body", status, body.len());

    if status.is_success() {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(ApiError::MalformedResponse)
    } else {
        let payload = serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
        Err(ApiError::Server {
            status,
            payload,
        })
    }
}
