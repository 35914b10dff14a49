//! Common constants used throughout the crate.
//!
//! Tests that are testing the content of an error code or message should not use these constants;
//! they should use hard-coded strings so the tests are also testing for misspellings.
//!
//! Please keep this file organized alphabetically.

use std::time::Duration;

/// Value sent in the `Accept` header.
pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Default base URL of the Intersight SaaS API.
pub(crate) const DEFAULT_BASE_URL: &str = "https://intersight.com/api/v1";

/// Default timeout applied to each HTTP call.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of the `Digest` header value.
pub(crate) const DIGEST_SHA256_PREFIX: &str = "SHA-256=";

/// Error code: ConfigurationError
pub(crate) const ERR_CODE_CONFIGURATION: &str = "ConfigurationError";

/// Error code: KeyFormatError
pub(crate) const ERR_CODE_KEY_FORMAT: &str = "KeyFormatError";

/// Error code: MalformedResponse
pub(crate) const ERR_CODE_MALFORMED_RESPONSE: &str = "MalformedResponse";

/// Error code: NetworkError
pub(crate) const ERR_CODE_NETWORK: &str = "NetworkError";

/// Error code: SerializationError
pub(crate) const ERR_CODE_SERIALIZATION: &str = "SerializationError";

/// Error code: ServerError
pub(crate) const ERR_CODE_SERVER: &str = "ServerError";

/// Error code: ValidationError
pub(crate) const ERR_CODE_VALIDATION: &str = "ValidationError";

/// Header for `accept`
pub(crate) const HDR_ACCEPT: &str = "Accept";

/// Header for `authorization`
pub(crate) const HDR_AUTHORIZATION: &str = "Authorization";

/// Header for `content-type`
pub(crate) const HDR_CONTENT_TYPE: &str = "Content-Type";

/// Header for `date`
pub(crate) const HDR_DATE: &str = "Date";

/// Header for `digest`
pub(crate) const HDR_DIGEST: &str = "Digest";

/// Header for `host`
pub(crate) const HDR_HOST: &str = "Host";

/// RFC 1123 date format, always rendered in GMT.
pub(crate) const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Required length of a moid, in bytes.
pub(crate) const MOID_LENGTH: usize = 24;

/// Error message: `"The *body* value must be of type \"Object\""`
pub(crate) const MSG_BODY_MUST_BE_OBJECT: &str = "The *body* value must be of type \"Object\"";

/// Error message: `"Invalid *moid* value!"`
pub(crate) const MSG_INVALID_MOID: &str = "Invalid *moid* value!";

/// Error message: `"Invalid *resource_path* value!"`
pub(crate) const MSG_INVALID_RESOURCE_PATH: &str = "Invalid *resource_path* value!";

/// Error message: `"Private Key not set!"`
pub(crate) const MSG_PRIVATE_KEY_NOT_SET: &str = "Private Key not set!";

/// Error message: `"Public Key not set!"`
pub(crate) const MSG_PUBLIC_KEY_NOT_SET: &str = "Public Key not set!";

/// Error message: `"The *query_params* value must be of type \"Object\""`
pub(crate) const MSG_QUERY_PARAMS_MUST_BE_OBJECT: &str = "The *query_params* value must be of type \"Object\"";

/// Error message: `"Invalid *query_params* value for key "`
pub(crate) const MSG_QUERY_VALUE_MUST_BE_SCALAR: &str = "Invalid *query_params* value for key ";

/// First entry of the `headers="..."` list and prefix of the first canonical line.
pub(crate) const REQUEST_TARGET: &str = "(request-target)";

/// Algorithm name advertised in the Authorization header.
pub(crate) const RSA_SHA256: &str = "rsa-sha256";

/// The length of a SHA-256 digest in bytes.
pub(crate) const SHA256_OUTPUT_LEN: usize = 32;

/// Scheme of the Authorization header.
pub(crate) const SIGNATURE_SCHEME: &str = "Signature";
