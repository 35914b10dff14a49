use {
    crate::ApiError,
    http::Uri,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The base URL requests are sent to, split into the parts the signature needs.
///
/// For `https://intersight.com/api/v1` the host is `intersight.com` and the base path is
/// `/api/v1`; resource paths are appended to the base path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    scheme: String,
    host: String,
    base_path: String,
}

impl Endpoint {
    /// Parse a base URL. A trailing `/` on the path is ignored. Any query string is dropped.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] if the URL cannot be parsed or has no scheme or host.
    pub fn parse(base_url: &str) -> Result<Self, ApiError> {
        let invalid = |reason: &str| ApiError::Configuration(format!("Invalid base URL {:?}: {}", base_url, reason));

        let uri = Uri::from_str(base_url).map_err(|e| invalid(&e.to_string()))?;
        let scheme = uri.scheme_str().ok_or_else(|| invalid("missing scheme"))?;
        let host = uri.authority().ok_or_else(|| invalid("missing host"))?;

        Ok(Self {
            scheme: scheme.to_string(),
            host: host.as_str().to_string(),
            base_path: uri.path().trim_end_matches('/').to_string(),
        })
    }

    /// The value of the `Host` header: the authority of the base URL, including any port.
    #[inline(always)]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The path of the base URL without a trailing `/`; empty if the base URL has no path.
    #[inline(always)]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The absolute URL for `path` (a resource path, optionally with a moid suffix or query string).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}://{}{}{}", self.scheme, self.host, self.base_path, path)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "intersight.com".to_string(),
            base_path: "/api/v1".to_string(),
        }
    }
}

impl FromStr for Endpoint {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}://{}{}", self.scheme, self.host, self.base_path)
    }
}
