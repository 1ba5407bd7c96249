//! Hashed signed statements for Supply Chain Integrity, Transparency and
//! Trust ([SCITT]).
//!
//! A hashed signed statement is a `COSE_Sign1` object whose payload is the
//! digest of an artifact, not the artifact itself. Its protected header
//! binds the statement to an issuer, a subject and the public key of the
//! signer, so it can be checked without ever seeing the original content.
//!
//! [SCITT]: <https://datatracker.ietf.org/wg/scitt/about/>
//!
//! # Basic Usage
//!
//! ```
//! use scitt::cose::{HashedStatementBuilder, HashAlgorithm, SigningKey};
//!
//! // Create a random P-256 signing key.
//! let key = SigningKey::generate();
//!
//! // Sign the SHA-384 digest of some content.
//! let statement = HashedStatementBuilder::new("did:web:example.com", "sbom:acme")
//!     .signing_key(&key)
//!     .hash_algorithm(HashAlgorithm::Sha384)
//!     .payload_location("https://example.com/sbom.spdx.json")
//!     .sign(br#"{"spdxVersion": "SPDX-2.3"}"#)
//!     .expect("signature failed");
//!
//! // Verify it against the key of its confirmation claim.
//! let decoded = statement.verify(None).expect("verification failed");
//! assert_eq!(decoded.header().subject(), "sbom:acme");
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg), feature(doc_cfg))]

/// Key material and payload digests.
#[doc(inline)]
pub use scitt_crypto as crypto;

/// Hashed signed statements over COSE.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc9052>
#[doc(inline)]
pub use scitt_cose as cose;

/// DataTrails ledger client.
#[cfg(feature = "datatrails")]
#[doc(inline)]
pub use scitt_datatrails as datatrails;

pub use scitt_cose::{
    HashAlgorithm, HashedStatementBuilder, SignedStatement, SigningKey, StatementHeader,
};
