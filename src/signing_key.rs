use {
    crate::{constants::*, crypto::RsaSigner, ApiError},
    log::debug,
    std::{
        fmt::{Debug, Formatter, Result as FmtResult},
        fs::read_to_string,
        path::Path,
    },
};

/// An Intersight API key: the key identifier issued by Intersight and the PEM-encoded RSA private
/// key generated alongside it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    /// The API key identifier, sent as `keyId` in the Authorization header.
    key_id: String,

    /// The PEM-encoded private key.
    private_key_pem: String,
}

impl ApiKey {
    /// Create an `ApiKey` from a key identifier and a PEM-encoded RSA private key. No validation is
    /// performed here; a malformed key is reported when the first request is signed.
    pub fn new<I, P>(key_id: I, private_key_pem: P) -> Self
    where
        I: Into<String>,
        P: Into<String>,
    {
        Self {
            key_id: key_id.into(),
            private_key_pem: private_key_pem.into(),
        }
    }

    /// Load an `ApiKey` from a file holding the key identifier and a file holding the PEM-encoded
    /// private key. Surrounding whitespace is stripped from the key identifier.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] if either file cannot be read.
    pub fn from_files<I, P>(key_id_path: I, private_key_path: P) -> Result<Self, ApiError>
    where
        I: AsRef<Path>,
        P: AsRef<Path>,
    {
        let key_id_path = key_id_path.as_ref();
        let private_key_path = private_key_path.as_ref();
        debug!("Loading API key id from {} and private key from {}", key_id_path.display(), private_key_path.display());

        let key_id = read_to_string(key_id_path)
            .map_err(|e| ApiError::Configuration(format!("Unable to read {}: {}", key_id_path.display(), e)))?;
        let private_key_pem = read_to_string(private_key_path)
            .map_err(|e| ApiError::Configuration(format!("Unable to read {}: {}", private_key_path.display(), e)))?;

        Ok(Self::new(key_id.trim(), private_key_pem))
    }

    /// Retrieve the key identifier.
    #[inline(always)]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Retrieve the PEM-encoded private key.
    #[inline(always)]
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ApiKey").field("key_id", &self.key_id).field("private_key_pem", &"[REDACTED]").finish()
    }
}

/// Holds the key identifier and private key used to sign requests. Each value may be set
/// independently; signing requires both.
#[derive(Clone, Default)]
pub struct KeyStore {
    public_key: Option<String>,
    private_key: Option<String>,
}

impl KeyStore {
    /// Create an empty `KeyStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `KeyStore` with both halves of `key` already set.
    pub fn with_key(key: ApiKey) -> Self {
        let mut store = Self::new();
        store.set_key(key);
        store
    }

    /// Set the key identifier, replacing any previous value.
    pub fn set_public_key<S: Into<String>>(&mut self, key_id: S) {
        self.public_key = Some(key_id.into());
    }

    /// Set the PEM-encoded private key, replacing any previous value. The key is not parsed until
    /// it is needed.
    pub fn set_private_key<S: Into<String>>(&mut self, private_key_pem: S) {
        self.private_key = Some(private_key_pem.into());
    }

    /// Set both the key identifier and private key from an [`ApiKey`].
    pub fn set_key(&mut self, key: ApiKey) {
        self.set_public_key(key.key_id);
        self.set_private_key(key.private_key_pem);
    }

    /// The key identifier, if set.
    #[inline(always)]
    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    /// Indicates whether the private key has been set.
    #[inline(always)]
    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Ensure both halves of the key are set.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] naming the first missing half (the public key is checked
    /// first).
    pub fn check(&self) -> Result<(), ApiError> {
        self.parts().map(|_| ())
    }

    fn parts(&self) -> Result<(&str, &str), ApiError> {
        let key_id =
            self.public_key.as_deref().ok_or_else(|| ApiError::Configuration(MSG_PUBLIC_KEY_NOT_SET.to_string()))?;
        let pem =
            self.private_key.as_deref().ok_or_else(|| ApiError::Configuration(MSG_PRIVATE_KEY_NOT_SET.to_string()))?;
        Ok((key_id, pem))
    }

    /// Return the key identifier and a signer for the private key. The PEM is parsed on every call.
    ///
    /// # Errors
    /// Returns [`ApiError::Configuration`] if either half is unset, or [`ApiError::KeyFormat`] if
    /// the private key cannot be parsed.
    pub fn signer(&self) -> Result<(&str, RsaSigner), ApiError> {
        let (key_id, pem) = self.parts()?;
        Ok((key_id, RsaSigner::from_pem(pem)?))
    }
}

impl Debug for KeyStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("KeyStore")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{ApiKey, KeyStore},
        std::{env, fs},
    };

    const PKCS1_PEM: &str = include_str!("../tests/data/private_key_pkcs1.pem");

    #[test_log::test]
    fn test_unset_keys() {
        let mut store = KeyStore::new();
        let e = store.signer().unwrap_err();
        assert_eq!(e.error_code(), "ConfigurationError");
        assert_eq!(e.to_string(), "Public Key not set!");

        store.set_public_key("key-id");
        let e = store.signer().unwrap_err();
        assert_eq!(e.to_string(), "Private Key not set!");

        // Private key alone is not enough either.
        let mut store = KeyStore::new();
        store.set_private_key(PKCS1_PEM);
        assert_eq!(store.check().unwrap_err().to_string(), "Public Key not set!");
    }

    #[test_log::test]
    fn test_setters_overwrite() {
        let mut store = KeyStore::new();
        store.set_public_key("first");
        store.set_public_key("second");
        assert_eq!(store.public_key(), Some("second"));

        // Setting an invalid key is accepted; the failure surfaces when signing.
        store.set_private_key("not a key");
        assert!(store.has_private_key());
        assert_eq!(store.signer().unwrap_err().error_code(), "KeyFormatError");

        store.set_private_key(PKCS1_PEM);
        let (key_id, _) = store.signer().unwrap();
        assert_eq!(key_id, "second");
    }

    #[test_log::test]
    fn test_debug_redacts_private_key() {
        let store = KeyStore::with_key(ApiKey::new("key-id", PKCS1_PEM));
        let debug_str = format!("{:?}", store);
        assert!(debug_str.contains("key-id"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("PRIVATE KEY"));

        let debug_str = format!("{:?}", ApiKey::new("key-id", PKCS1_PEM));
        assert!(!debug_str.contains("PRIVATE KEY"));
    }

    #[test_log::test]
    fn test_from_files() {
        let dir = env::temp_dir().join(format!("intersight-signature-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let key_id_path = dir.join("ApiKeyId.txt");
        let pem_path = dir.join("SecretKey.txt");
        fs::write(&key_id_path, "59c84e4a16267c0001c23428/59c84d2816267c0001c23421/5a1f6a6e16267c0001cdd2ba\n")
            .unwrap();
        fs::write(&pem_path, PKCS1_PEM).unwrap();

        let key = ApiKey::from_files(&key_id_path, &pem_path).unwrap();
        assert_eq!(key.key_id(), "59c84e4a16267c0001c23428/59c84d2816267c0001c23421/5a1f6a6e16267c0001cdd2ba");
        assert_eq!(key.private_key_pem(), PKCS1_PEM);

        let e = ApiKey::from_files(dir.join("missing.txt"), &pem_path).unwrap_err();
        assert_eq!(e.error_code(), "ConfigurationError");
        assert!(e.to_string().contains("missing.txt"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
