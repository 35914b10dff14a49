//! Assembly of the `Authorization` header value.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.
//! The functions and types are subject to change in minor/patch versions. This is exposed for
//! testing purposes only.

use {
    crate::{
        canonical::HeaderSet,
        constants::{REQUEST_TARGET, RSA_SHA256, SIGNATURE_SCHEME},
    },
    qualifier_attr::qualifiers,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The parameters of an HTTP message signature as carried in the `Authorization` header.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct SignatureParameters<'a> {
    /// The API key identifier.
    key_id: &'a str,

    /// Lower-cased names of the signed headers, in signing order, not including `(request-target)`.
    signed_headers: Vec<String>,

    /// The base64-encoded signature.
    signature: &'a str,
}

impl<'a> SignatureParameters<'a> {
    /// Collect the parameters for `key_id`, the signed `headers`, and the base64 `signature`.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn new(key_id: &'a str, headers: &HeaderSet, signature: &'a str) -> Self {
        Self {
            key_id,
            signed_headers: headers.signed_header_names(),
            signature,
        }
    }

    /// The `headers="..."` value: `(request-target)` followed by each signed header name.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn headers_list(&self) -> String {
        let mut names = Vec::with_capacity(self.signed_headers.len() + 1);
        names.push(REQUEST_TARGET);
        names.extend(self.signed_headers.iter().map(String::as_str));
        names.join(" ")
    }
}

impl Display for SignatureParameters<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            r#"{} keyId="{}",algorithm="{}",headers="{}",signature="{}""#,
            SIGNATURE_SCHEME,
            self.key_id,
            RSA_SHA256,
            self.headers_list(),
            self.signature
        )
    }
}

/// Build the `Authorization` header value:
///
/// ```text
/// Signature keyId="<key_id>",algorithm="rsa-sha256",headers="(request-target) <h1> <h2> ...",signature="<signature>"
/// ```
///
/// Header names are lower-cased and listed in the same order as `headers`, which must be the order
/// used to build the string to sign.
pub fn authorization_header(key_id: &str, headers: &HeaderSet, signature: &str) -> String {
    SignatureParameters::new(key_id, headers, signature).to_string()
}
