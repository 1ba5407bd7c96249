use std::{borrow::Borrow, ops::Deref};

use coset::{
    iana, Algorithm, CborSerializable, CoseSign1, Header, TaggedCborSerializable,
};
use scitt_crypto::{
    rand::{rngs::OsRng, CryptoRng, RngCore},
    Digest, SigningKey,
};
use serde::{Deserialize, Serialize};

use crate::{DecodeError, StatementError, StatementHeader};

/// Initial byte of CBOR tag 18 (`COSE_Sign1`).
const COSE_SIGN1_TAG_BYTE: u8 = 0xd2;

/// Encoded hashed signed statement: a tagged `COSE_Sign1` object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedStatement(Vec<u8>);

impl SignedStatement {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decodes the `COSE_Sign1` object and its statement header.
    ///
    /// Untagged objects are accepted as well.
    pub fn decode(&self) -> Result<DecodedStatement, DecodeError> {
        let cose = if self.0.first() == Some(&COSE_SIGN1_TAG_BYTE) {
            CoseSign1::from_tagged_slice(&self.0)?
        } else {
            CoseSign1::from_slice(&self.0)?
        };

        DecodedStatement::new(cose)
    }
}

impl Deref for SignedStatement {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for SignedStatement {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for SignedStatement {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SignedStatement {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<SignedStatement> for Vec<u8> {
    fn from(value: SignedStatement) -> Self {
        value.0
    }
}

/// Signs `digest` as the payload of a statement with the given header.
pub fn sign(
    header: &StatementHeader,
    digest: &Digest,
    key: &SigningKey,
) -> Result<SignedStatement, StatementError> {
    sign_with_rng(header, digest, key, &mut OsRng)
}

/// Signs `digest` using `rng` to hedge the signature nonce.
pub fn sign_with_rng(
    header: &StatementHeader,
    digest: &Digest,
    key: &SigningKey,
    rng: &mut (impl CryptoRng + RngCore),
) -> Result<SignedStatement, StatementError> {
    // An empty `kid` would be dropped from the encoded header.
    if header.key_id().is_empty() {
        return Err(StatementError::EmptyKeyId);
    }

    if digest.algorithm() != header.hash_algorithm() {
        return Err(StatementError::DigestMismatch {
            digest: digest.algorithm(),
            header: header.hash_algorithm(),
        });
    }

    if &key.public_coordinates()? != header.confirmation_key() {
        return Err(StatementError::KeyMismatch);
    }

    let protected = header.to_protected()?;
    match &protected.header.alg {
        Some(Algorithm::Assigned(iana::Algorithm::ES256)) => (),
        other => return Err(StatementError::AlgorithmMismatch(format!("{other:?}"))),
    }

    let mut cose = CoseSign1 {
        protected,
        unprotected: Header::default(),
        payload: Some(digest.as_bytes().to_vec()),
        signature: Vec::new(),
    };

    let tbs = cose.tbs_data(&[]);
    cose.signature = key.sign_bytes_with_rng(rng, &tbs)?;

    log::debug!(
        "signed {} statement for subject `{}`",
        digest.algorithm(),
        header.subject()
    );

    Ok(SignedStatement(cose.to_tagged_vec()?))
}

/// Decoded statement, along with its header.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedStatement {
    header: StatementHeader,
    digest: Digest,
    cose: CoseSign1,
}

impl DecodedStatement {
    fn new(cose: CoseSign1) -> Result<Self, DecodeError> {
        let header = StatementHeader::from_header(&cose.protected.header)?;

        let payload = cose.payload.clone().ok_or(DecodeError::MissingPayload)?;
        let digest = Digest::from_bytes(header.hash_algorithm(), payload)
            .ok_or(DecodeError::PayloadLength(header.hash_algorithm()))?;

        Ok(Self {
            header,
            digest,
            cose,
        })
    }

    pub fn header(&self) -> &StatementHeader {
        &self.header
    }

    pub fn cose(&self) -> &CoseSign1 {
        &self.cose
    }

    pub fn into_cose(self) -> CoseSign1 {
        self.cose
    }

    /// Protected header exactly as it was encoded.
    pub fn protected_bytes(&self) -> Option<&[u8]> {
        self.cose.protected.original_data.as_deref()
    }

    pub fn payload(&self) -> &[u8] {
        self.digest.as_bytes()
    }

    /// Payload, checked against the header's hash algorithm.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn signature(&self) -> &[u8] {
        &self.cose.signature
    }

    /// `Sig_structure` bytes the signature covers.
    pub fn tbs_data(&self) -> Vec<u8> {
        self.cose.tbs_data(&[])
    }
}
