use {
    crate::constants::*,
    http::status::StatusCode,
    serde_json::Value,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
        io::Error as IOError,
    },
};

/// Error returned when an Intersight API call cannot be signed, sent, or completed.
#[derive(Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// The client is not configured well enough to sign a request. Sample messages:
    /// `Public Key not set!`
    /// `Private Key not set!`
    Configuration(/* message */ String),

    /// An argument did not have the expected shape. Sample messages:
    /// `The *body* value must be of type "Object"`
    /// `Invalid *moid* value!`
    Validation(/* message */ String),

    /// The private key could not be parsed as a PKCS#1 or PKCS#8 PEM-encoded RSA key, or could not
    /// produce a signature.
    KeyFormat(/* message */ String),

    /// The request could not be delivered or the response could not be read.
    Network(Box<dyn Error + Send + Sync>),

    /// The server answered with a non-2xx status. The payload is the parsed JSON error body, or
    /// the raw body as a JSON string if it was not JSON.
    Server {
        /// HTTP status returned by the server.
        status: StatusCode,

        /// The error payload.
        payload: Value,
    },

    /// The server answered with a 2xx status but the body was not JSON.
    MalformedResponse(serde_json::Error),

    /// The request body could not be serialized.
    Serialization(serde_json::Error),
}

impl ApiError {
    /// A stable identifier for the kind of error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => ERR_CODE_CONFIGURATION,
            Self::Validation(_) => ERR_CODE_VALIDATION,
            Self::KeyFormat(_) => ERR_CODE_KEY_FORMAT,
            Self::Network(_) => ERR_CODE_NETWORK,
            Self::Server {
                ..
            } => ERR_CODE_SERVER,
            Self::MalformedResponse(_) => ERR_CODE_MALFORMED_RESPONSE,
            Self::Serialization(_) => ERR_CODE_SERIALIZATION,
        }
    }

    /// The HTTP status returned by the server, if the error came from a server response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server {
                status,
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// The server's error payload, if the error came from a server response.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Server {
                payload,
                ..
            } => Some(payload),
            _ => None,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Configuration(msg) => f.write_str(msg),
            Self::Validation(msg) => f.write_str(msg),
            Self::KeyFormat(msg) => write!(f, "Invalid private key: {}", msg),
            Self::Network(ref e) => write!(f, "Network error: {}", e),
            Self::Server {
                status,
                payload,
            } => write!(f, "Server returned {}: {}", status, payload),
            Self::MalformedResponse(ref e) => write!(f, "Response body is not valid JSON: {}", e),
            Self::Serialization(ref e) => write!(f, "Unable to serialize request body: {}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(ref e) => Some(e.as_ref()),
            Self::MalformedResponse(ref e) | Self::Serialization(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<IOError> for ApiError {
    fn from(e: IOError) -> ApiError {
        ApiError::Configuration(e.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> ApiError {
        ApiError::Network(Box::new(e))
    }
}

impl From<rsa::Error> for ApiError {
    fn from(e: rsa::Error) -> ApiError {
        ApiError::KeyFormat(e.to_string())
    }
}
