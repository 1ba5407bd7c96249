use scitt_crypto::{
    rand::{CryptoRng, RngCore},
    Digest, HashAlgorithm, SigningKey,
};

use crate::{
    sign, sign_with_rng, MetaMap, SignedStatement, StatementError, StatementHeader, DEFAULT_KEY_ID,
};

/// Builds and signs a hashed statement over some payload.
///
/// ```
/// use scitt_cose::{HashedStatementBuilder, SigningKey};
///
/// let key = SigningKey::generate();
/// let statement = HashedStatementBuilder::new("did:web:example.com", "sbom")
///     .signing_key(&key)
///     .sign(b"{\"name\": \"example\"}")
///     .unwrap();
///
/// statement.verify(None).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HashedStatementBuilder<'a> {
    issuer: String,
    subject: String,
    signing_key: Option<&'a SigningKey>,
    key_id: Vec<u8>,
    hash_algorithm: HashAlgorithm,
    payload_location: Option<String>,
    pre_image_content_type: Option<String>,
    meta_map: Option<MetaMap>,
}

impl<'a> HashedStatementBuilder<'a> {
    pub fn new(issuer: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            subject: subject.into(),
            signing_key: None,
            key_id: DEFAULT_KEY_ID.as_bytes().to_vec(),
            hash_algorithm: HashAlgorithm::default(),
            payload_location: None,
            pre_image_content_type: None,
            meta_map: None,
        }
    }

    pub fn signing_key(mut self, key: &'a SigningKey) -> Self {
        self.signing_key = Some(key);
        self
    }

    pub fn key_id(mut self, key_id: impl Into<Vec<u8>>) -> Self {
        self.key_id = key_id.into();
        self
    }

    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }

    /// Selects the hash algorithm by name (`SHA-256`, `SHA-384` or
    /// `SHA-512`).
    pub fn hash_algorithm_name(self, name: &str) -> Result<Self, StatementError> {
        Ok(self.hash_algorithm(name.parse()?))
    }

    pub fn payload_location(mut self, location: impl Into<String>) -> Self {
        self.payload_location = Some(location.into());
        self
    }

    pub fn pre_image_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.pre_image_content_type = Some(content_type.into());
        self
    }

    pub fn meta_map(mut self, meta_map: MetaMap) -> Self {
        self.meta_map = Some(meta_map);
        self
    }

    fn key(&self) -> Result<&'a SigningKey, StatementError> {
        self.signing_key.ok_or(StatementError::MissingKey)
    }

    /// Protected header the statement will carry.
    pub fn header(&self) -> Result<StatementHeader, StatementError> {
        let confirmation = self.key()?.public_coordinates()?;
        Ok(
            StatementHeader::builder(self.issuer.clone(), self.subject.clone(), confirmation)
                .key_id(self.key_id.clone())
                .hash_algorithm(self.hash_algorithm)
                .payload_location(self.payload_location.clone())
                .pre_image_content_type(self.pre_image_content_type.clone())
                .meta_map(self.meta_map.clone())
                .build(),
        )
    }

    /// Digests `payload` and signs the digest.
    pub fn sign(&self, payload: impl AsRef<[u8]>) -> Result<SignedStatement, StatementError> {
        self.sign_digest(&self.hash_algorithm.digest(payload))
    }

    /// Signs a precomputed digest.
    pub fn sign_digest(&self, digest: &Digest) -> Result<SignedStatement, StatementError> {
        let header = self.header()?;
        log::debug!(
            "signing statement for subject `{}` with {}",
            self.subject,
            self.hash_algorithm
        );
        sign(&header, digest, self.key()?)
    }

    pub fn sign_with_rng(
        &self,
        payload: impl AsRef<[u8]>,
        rng: &mut (impl CryptoRng + RngCore),
    ) -> Result<SignedStatement, StatementError> {
        let header = self.header()?;
        sign_with_rng(&header, &self.hash_algorithm.digest(payload), self.key()?, rng)
    }
}
