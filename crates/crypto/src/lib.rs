#![cfg_attr(docsrs, feature(doc_auto_cfg))]
//! Key material and payload digests for hashed signed statements.
//!
//! Signing is ECDSA over NIST P-256 with SHA-256 (`ES256`) only.

pub mod hash;
pub use hash::{digest, Digest, HashAlgorithm, UnsupportedAlgorithm};

pub mod key;
pub use key::{KeyError, PublicKeyPoint, SigningKey, VerificationError, P256_FIELD_SIZE};

pub use rand;
