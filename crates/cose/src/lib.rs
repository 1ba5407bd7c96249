//! Hashed signed statements over CBOR Object Signing and Encryption
//! ([COSE]), based on [`coset`].
//!
//! A hashed signed statement is a tagged `COSE_Sign1` object whose payload
//! is the digest of some artifact rather than the artifact itself. Its
//! protected header carries:
//! - the `ES256` algorithm and a key identifier,
//! - CWT claims (issuer, subject and a confirmation key binding the
//!   statement to its signer),
//! - hash envelope parameters describing the digest and the original
//!   content.
//!
//! [COSE]: <https://datatracker.ietf.org/doc/html/rfc9052>
//! [`coset`]: <https://crates.io/crates/coset>
pub use coset;
pub use coset::{CoseError, CoseKey, CoseSign1, Header, Label, ProtectedHeader};

pub use ciborium;
pub use ciborium::Value as CborValue;

pub use scitt_crypto::{
    digest, Digest, HashAlgorithm, KeyError, PublicKeyPoint, SigningKey, UnsupportedAlgorithm,
};

pub mod label;

mod params;

mod error;
pub use error::*;

pub mod cwt;
pub use cwt::CwtClaims;

pub mod envelope;
pub use envelope::{HashEnvelopeParams, MetaMap};

pub mod header;
pub use header::{StatementHeader, StatementHeaderBuilder, DEFAULT_KEY_ID, STATEMENT_ALGORITHM};

mod sign1;
pub use sign1::*;

mod verification;
pub use verification::*;

mod statement;
pub use statement::*;
