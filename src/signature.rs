//! The signing pipeline: validate a request, digest its body, build and sign the string to sign,
//! and produce everything needed to put the request on the wire.

use {
    crate::{
        auth::authorization_header,
        canonical::{request_target, string_to_sign, HeaderSet},
        chronoutil::FormatHttpDate,
        constants::*,
        crypto::{sha256, sha256_base64, sha256_hex},
        endpoint::Endpoint,
        request::Operation,
        signing_key::KeyStore,
        ApiError, ApiRequest,
    },
    bytes::Bytes,
    chrono::{DateTime, Utc},
    http::{
        header::{HeaderName, HeaderValue},
        Method, Request,
    },
    log::{debug, trace},
};

/// A request that has been validated and signed, ready to send.
#[derive(Clone, Debug)]
pub struct SignedRequest {
    operation: Operation,
    url: String,
    request_target: String,
    headers: HeaderSet,
    string_to_sign: String,
    authorization: String,
    body: Bytes,
}

impl SignedRequest {
    /// The operation chosen for the request.
    #[inline(always)]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The HTTP method.
    #[inline(always)]
    pub fn method(&self) -> Method {
        self.operation.method()
    }

    /// The absolute URL, including any moid suffix or query string.
    #[inline(always)]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request target, `"<METHOD> <path-and-query>"`, before it is lower-cased for signing.
    /// Its path and query are exactly those of [`url`][Self::url].
    #[inline(always)]
    pub fn request_target(&self) -> &str {
        &self.request_target
    }

    /// The signed headers (`Date`, `Host`, `Digest`) in signing order.
    #[inline(always)]
    pub fn signed_headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// The exact string that was signed.
    #[inline(always)]
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    /// The value of the `Authorization` header.
    #[inline(always)]
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// The serialized body. These are the bytes that were digested.
    #[inline(always)]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Convert into an [`http::Request`]. Headers are added in wire order: `Accept`, the signed
    /// headers in signing order, `Authorization`, then `Content-Type`. The body is included for
    /// every method.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] if the URL or a header value cannot be represented in
    /// an HTTP request (for example, a key identifier containing a newline).
    pub fn into_http_request(self) -> Result<Request<Bytes>, ApiError> {
        let mut builder = Request::builder().method(self.operation.method()).uri(&self.url);

        if let Some(headers) = builder.headers_mut() {
            for (name, value) in wire_headers(&self.headers, &self.authorization) {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| ApiError::Configuration(format!("Invalid header name {:?}: {}", name, e)))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|e| ApiError::Configuration(format!("Invalid value for header {}: {}", name, e)))?;
                headers.append(name, value);
            }
        }

        builder.body(self.body).map_err(|e| ApiError::Configuration(e.to_string()))
    }
}

/// The headers of a signed request in the order they are sent.
fn wire_headers<'a>(signed: &'a HeaderSet, authorization: &'a str) -> Vec<(&'a str, &'a str)> {
    let mut result = Vec::with_capacity(signed.len() + 3);
    result.push((HDR_ACCEPT, APPLICATION_JSON));
    result.extend(signed.iter());
    result.push((HDR_AUTHORIZATION, authorization));
    result.push((HDR_CONTENT_TYPE, APPLICATION_JSON));
    result
}

/// Sign `request` for `endpoint` using the keys in `keys` and the current time.
///
/// # Errors
/// See [`sign_at`].
pub fn sign(keys: &KeyStore, endpoint: &Endpoint, request: &ApiRequest) -> Result<SignedRequest, ApiError> {
    sign_at(keys, endpoint, request, &Utc::now())
}

/// Sign `request` for `endpoint` using the keys in `keys`, with `timestamp` as the `Date` header.
///
/// # Errors
/// * [`ApiError::Validation`] if the request is malformed (checked first).
/// * [`ApiError::Configuration`] if the key identifier or private key is not set.
/// * [`ApiError::KeyFormat`] if the private key cannot be parsed.
pub fn sign_at(
    keys: &KeyStore,
    endpoint: &Endpoint,
    request: &ApiRequest,
    timestamp: &DateTime<Utc>,
) -> Result<SignedRequest, ApiError> {
    let resolved = request.resolve()?;
    let (key_id, signer) = keys.signer()?;

    let method = resolved.operation.method();
    let target = request_target(&method, &format!("{}{}", endpoint.base_path(), resolved.path));
    debug!("Signing request: {}", target);

    trace!("Body digest (hex): {}", sha256_hex(&resolved.body));
    let mut headers = HeaderSet::new();
    headers.insert(HDR_DATE, timestamp.to_http_date());
    headers.insert(HDR_HOST, endpoint.host());
    headers.insert(HDR_DIGEST, format!("{}{}", DIGEST_SHA256_PREFIX, sha256_base64(&resolved.body)));

    let string_to_sign = string_to_sign(&target, &headers);
    let digest = sha256(string_to_sign.as_bytes());
    trace!("String to sign digest (hex): {}", hex::encode(digest));

    let signature = signer.sign_digest_base64(&digest)?;
    let authorization = authorization_header(key_id, &headers, &signature);

    Ok(SignedRequest {
        operation: resolved.operation,
        url: endpoint.url_for(&resolved.path),
        request_target: target,
        headers,
        string_to_sign,
        authorization,
        body: resolved.body,
    })
}
