//! Header label table.
//!
//! These values are a wire-format contract shared with every verifier of
//! hashed signed statements and must not change.
//!
//! - CWT claims header: draft-ietf-scitt-architecture-04, section
//!   "Issuer Identity".
//! - CWT claim keys: <https://www.rfc-editor.org/rfc/rfc8392#section-3.1>.
//! - Confirmation claim: <https://www.rfc-editor.org/rfc/rfc8747>.
//! - Hash envelope parameters: draft-steele-cose-hash-envelope, using the
//!   pre-adoption private range of the COSE header parameters registry.
use coset::{iana, Label};
use scitt_crypto::HashAlgorithm;

/// CWT claims set, nested in the protected header.
pub const CWT_CLAIMS: i64 = 13;

/// `iss` claim.
pub const CWT_ISSUER: i64 = 1;

/// `sub` claim.
pub const CWT_SUBJECT: i64 = 2;

/// `cnf` claim.
pub const CWT_CONFIRMATION: i64 = 8;

/// `COSE_Key` confirmation method, inside the `cnf` claim.
pub const CNF_COSE_KEY: i64 = 1;

/// Hash algorithm of the payload.
pub const PAYLOAD_HASH_ALGORITHM: i64 = -6800;

/// Location hint of the original content.
pub const PAYLOAD_LOCATION: i64 = -6801;

/// Content type of the original content.
pub const PAYLOAD_PRE_CONTENT_TYPE: i64 = -6802;

/// Free-form `tstr => tstr` metadata.
pub const META_MAP: i64 = -6804;

pub const COSE_ALG_SHA256: i64 = iana::Algorithm::SHA_256 as i64;
pub const COSE_ALG_SHA384: i64 = iana::Algorithm::SHA_384 as i64;
pub const COSE_ALG_SHA512: i64 = iana::Algorithm::SHA_512 as i64;

/// Registered for SHA-512/256 but not accepted: nothing produces it and
/// ledger support for it is unconfirmed.
pub const COSE_ALG_SHA512_256: i64 = iana::Algorithm::SHA_512_256 as i64;

/// Labels of the statement-specific protected header parameters, in
/// encoding order.
pub const STATEMENT_LABELS: [i64; 5] = [
    CWT_CLAIMS,
    PAYLOAD_HASH_ALGORITHM,
    PAYLOAD_LOCATION,
    PAYLOAD_PRE_CONTENT_TYPE,
    META_MAP,
];

pub fn label(value: i64) -> Label {
    Label::Int(value)
}

/// COSE algorithm identifier of a payload hash algorithm.
pub fn hash_algorithm_label(algorithm: HashAlgorithm) -> i64 {
    match algorithm {
        HashAlgorithm::Sha256 => COSE_ALG_SHA256,
        HashAlgorithm::Sha384 => COSE_ALG_SHA384,
        HashAlgorithm::Sha512 => COSE_ALG_SHA512,
    }
}

/// Payload hash algorithm for a COSE algorithm identifier.
pub fn hash_algorithm_from_label(value: i64) -> Option<HashAlgorithm> {
    match value {
        COSE_ALG_SHA256 => Some(HashAlgorithm::Sha256),
        COSE_ALG_SHA384 => Some(HashAlgorithm::Sha384),
        COSE_ALG_SHA512 => Some(HashAlgorithm::Sha512),
        _ => None,
    }
}
