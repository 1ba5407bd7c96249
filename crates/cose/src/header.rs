//! Protected header of a hashed signed statement.
use coset::{iana, Algorithm, CborSerializable, CoseError, Header, Label, ProtectedHeader};
use scitt_crypto::{HashAlgorithm, PublicKeyPoint};

use crate::{
    label::CWT_CLAIMS, params::require_param, CwtClaims, DecodeError, HashEnvelopeParams,
    MetaMap,
};

/// Key identifier used when none is given.
pub const DEFAULT_KEY_ID: &str = "testkey";

/// Signature algorithm of every statement.
pub const STATEMENT_ALGORITHM: iana::Algorithm = iana::Algorithm::ES256;

/// Decoded protected header of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementHeader {
    key_id: Vec<u8>,
    cwt_claims: CwtClaims,
    envelope: HashEnvelopeParams,
}

impl StatementHeader {
    pub fn new(key_id: impl Into<Vec<u8>>, cwt_claims: CwtClaims, envelope: HashEnvelopeParams) -> Self {
        Self {
            key_id: key_id.into(),
            cwt_claims,
            envelope,
        }
    }

    pub fn builder(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        confirmation: PublicKeyPoint,
    ) -> StatementHeaderBuilder {
        StatementHeaderBuilder {
            key_id: DEFAULT_KEY_ID.as_bytes().to_vec(),
            cwt_claims: CwtClaims::new(issuer, subject, confirmation),
            envelope: HashEnvelopeParams::default(),
        }
    }

    pub fn key_id(&self) -> &[u8] {
        &self.key_id
    }

    /// Key identifier as text, if it is valid UTF-8.
    pub fn key_id_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.key_id).ok()
    }

    pub fn cwt_claims(&self) -> &CwtClaims {
        &self.cwt_claims
    }

    pub fn issuer(&self) -> &str {
        &self.cwt_claims.issuer
    }

    pub fn subject(&self) -> &str {
        &self.cwt_claims.subject
    }

    pub fn confirmation_key(&self) -> &PublicKeyPoint {
        &self.cwt_claims.confirmation
    }

    pub fn envelope(&self) -> &HashEnvelopeParams {
        &self.envelope
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.envelope.algorithm
    }

    /// Builds the COSE header: `alg`, `kid`, then the CWT claims and the
    /// hash envelope parameters.
    pub fn to_header(&self) -> Result<Header, CoseError> {
        let mut rest = vec![(Label::Int(CWT_CLAIMS), self.cwt_claims.to_cbor_value()?)];
        rest.extend(self.envelope.header_params());

        Ok(Header {
            alg: Some(Algorithm::Assigned(STATEMENT_ALGORITHM)),
            key_id: self.key_id.clone(),
            rest,
            ..Default::default()
        })
    }

    /// Builds the protected header with its serialized form fixed, so the
    /// exact same bytes are signed and emitted.
    pub fn to_protected(&self) -> Result<ProtectedHeader, CoseError> {
        let header = self.to_header()?;
        let original_data = header.clone().to_vec()?;
        Ok(ProtectedHeader {
            original_data: Some(original_data),
            header,
        })
    }

    pub fn from_header(header: &Header) -> Result<Self, DecodeError> {
        if header.alg != Some(Algorithm::Assigned(STATEMENT_ALGORITHM)) {
            return Err(DecodeError::UnsupportedAlgorithm);
        }

        let rest = header.rest.as_slice();
        let cwt_claims = CwtClaims::from_cbor_value(require_param(rest, CWT_CLAIMS)?)?;
        let envelope = HashEnvelopeParams::from_header_params(rest)?;

        Ok(Self {
            key_id: header.key_id.clone(),
            cwt_claims,
            envelope,
        })
    }
}

/// Builder for [`StatementHeader`].
#[derive(Debug, Clone)]
pub struct StatementHeaderBuilder {
    key_id: Vec<u8>,
    cwt_claims: CwtClaims,
    envelope: HashEnvelopeParams,
}

impl StatementHeaderBuilder {
    pub fn key_id(mut self, key_id: impl Into<Vec<u8>>) -> Self {
        self.key_id = key_id.into();
        self
    }

    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.envelope.algorithm = algorithm;
        self
    }

    pub fn payload_location(mut self, location: Option<String>) -> Self {
        self.envelope.location = location;
        self
    }

    pub fn pre_image_content_type(mut self, content_type: Option<String>) -> Self {
        self.envelope.pre_image_content_type = content_type;
        self
    }

    pub fn meta_map(mut self, meta_map: Option<MetaMap>) -> Self {
        self.envelope.meta_map = meta_map;
        self
    }

    pub fn build(self) -> StatementHeader {
        StatementHeader {
            key_id: self.key_id,
            cwt_claims: self.cwt_claims,
            envelope: self.envelope,
        }
    }
}
