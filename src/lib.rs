//! The `intersight_signature` crate signs and sends requests to the
//! [Cisco Intersight](https://intersight.com/apidocs/) REST API.
//!
//! Intersight authenticates API calls with an HTTP message signature. The client signs the
//! request target, `Date`, `Host` and `Digest` headers with the RSA private key that belongs to an
//! API key, and sends the signature in the `Authorization` header:
//!
//! ```text
//! Signature keyId="<key id>",algorithm="rsa-sha256",headers="(request-target) date host digest",signature="<base64>"
//! ```
//!
//! # Workflow
//! 1. Create an [`IntersightClient`], optionally from a [`ClientConfig`] for appliance deployments.
//! 2. Set the API key identifier and PEM-encoded private key on the client.
//! 3. Call [`IntersightClient::intersight_call`] with a resource path, query parameters, body and
//!    optional moid, or build an [`ApiRequest`] and pass it to [`IntersightClient::call`].
//!
//! The HTTP method follows the shape of the request: a non-empty body with a moid is a `PATCH`, a
//! non-empty body alone is a `POST`, and everything else is a `GET`.
//!
//! ## Example
//! ```rust,no_run
//! use intersight_signature::{ApiKey, ApiRequest, IntersightClient};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let mut client = IntersightClient::new().unwrap();
//! client.set_key(ApiKey::from_files("ApiKeyId.txt", "SecretKey.txt").unwrap());
//!
//! // GET /api/v1/ntp/Policies?$filter=Name eq 'default'
//! let policies = client
//!     .intersight_call("/ntp/Policies", json!({"$filter": "Name eq 'default'"}), json!({}), None)
//!     .await
//!     .unwrap();
//!
//! // PATCH /api/v1/ntp/Policies/<moid>
//! let moid = policies["Results"][0]["Moid"].as_str().unwrap();
//! let request = ApiRequest::update("/ntp/Policies", moid, json!({"Enabled": true}));
//! client.call(&request).await.unwrap();
//! # });
//! ```
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

#[cfg(feature = "unstable")]
pub mod auth;
#[cfg(not(feature = "unstable"))]
mod auth;

#[cfg(feature = "unstable")]
pub mod canonical;
#[cfg(not(feature = "unstable"))]
mod canonical;

mod body;
mod chronoutil;
mod client;
mod constants;
mod crypto;
mod endpoint;
mod error;
mod request;
mod signature;
mod signing_key;

pub use crate::{
    auth::authorization_header,
    body::{serialize_body, IntoJsonBody},
    canonical::{encode_path, encode_path_segment, encode_query, string_to_sign, HeaderSet},
    chronoutil::FormatHttpDate,
    client::{
        ClientConfig, ClientConfigBuilder, ClientConfigBuilderError, IntersightClient, ReqwestTransport, Transport,
    },
    crypto::{sha256, sha256_base64, sign_digest, RsaSigner},
    endpoint::Endpoint,
    error::ApiError,
    request::{ApiRequest, Operation},
    signature::{sign, sign_at, SignedRequest},
    signing_key::{ApiKey, KeyStore},
};
