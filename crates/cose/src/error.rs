use coset::{CoseError, Label};
use scitt_crypto::{HashAlgorithm, KeyError, UnsupportedAlgorithm};

use crate::CborValue;

/// Statement construction or signing error.
#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    #[error("missing signing key")]
    MissingKey,

    #[error("key identifier must not be empty")]
    EmptyKeyId,

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnsupportedAlgorithm),

    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    #[error("encoding failed: {0}")]
    Encoding(CoseError),

    #[error("header algorithm `{0}` does not match the ES256 signing key")]
    AlgorithmMismatch(String),

    #[error("signing key does not match the confirmation key")]
    KeyMismatch,

    #[error("{digest} digest does not match the {header} header algorithm")]
    DigestMismatch {
        digest: HashAlgorithm,
        header: HashAlgorithm,
    },
}

impl From<CoseError> for StatementError {
    fn from(value: CoseError) -> Self {
        Self::Encoding(value)
    }
}

/// Statement decoding error.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid COSE_Sign1 object: {0}")]
    Cose(CoseError),

    #[error("missing parameter")]
    MissingParam(Label),

    #[error("invalid parameter")]
    InvalidParam(Label),

    #[error("duplicate parameter")]
    DuplicateParam(Label),

    #[error("unsupported parameter value")]
    UnsupportedParam(Label, CborValue),

    #[error("unsupported signature algorithm")]
    UnsupportedAlgorithm,

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("missing payload")]
    MissingPayload,

    #[error("payload length does not match the {0} digest size")]
    PayloadLength(HashAlgorithm),
}

impl From<CoseError> for DecodeError {
    fn from(value: CoseError) -> Self {
        Self::Cose(value)
    }
}
