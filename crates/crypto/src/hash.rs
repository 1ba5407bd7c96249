//! Payload digests.
//!
//! A hashed signed statement never carries the original content, only its
//! digest under one of the algorithms listed in [`HashAlgorithm`].
use std::{fmt, str::FromStr};

use sha2::Digest as _;

/// Hash algorithm used to digest a statement payload.
///
/// This is a closed set: an algorithm name outside of it is rejected with
/// [`UnsupportedAlgorithm`] instead of being carried around unresolved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    Sha256,

    /// SHA-384
    Sha384,

    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [Self; 3] = [Self::Sha256, Self::Sha384, Self::Sha512];

    /// Algorithm name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Output size in bytes.
    pub fn output_size(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Digests the given payload.
    pub fn digest(&self, payload: impl AsRef<[u8]>) -> Digest {
        let bytes: Box<[u8]> = match self {
            Self::Sha256 => sha2::Sha256::digest(payload).to_vec().into_boxed_slice(),
            Self::Sha384 => sha2::Sha384::digest(payload).to_vec().into_boxed_slice(),
            Self::Sha512 => sha2::Sha512::digest(payload).to_vec().into_boxed_slice(),
        };

        Digest {
            algorithm: *self,
            bytes,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unsupported hash algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported hash algorithm `{0}`")]
pub struct UnsupportedAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnsupportedAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA-256" => Ok(Self::Sha256),
            "SHA-384" => Ok(Self::Sha384),
            "SHA-512" => Ok(Self::Sha512),
            other => Err(UnsupportedAlgorithm(other.to_owned())),
        }
    }
}

/// Digests `payload` with `algorithm`.
pub fn digest(payload: impl AsRef<[u8]>, algorithm: HashAlgorithm) -> Digest {
    algorithm.digest(payload)
}

/// Payload digest.
///
/// Its length always matches [`HashAlgorithm::output_size`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: HashAlgorithm,
    bytes: Box<[u8]>,
}

impl Digest {
    /// Wraps digest bytes computed elsewhere.
    ///
    /// Returns `None` if the length does not match the algorithm output
    /// size.
    pub fn from_bytes(algorithm: HashAlgorithm, bytes: Vec<u8>) -> Option<Self> {
        (bytes.len() == algorithm.output_size()).then(|| Self {
            algorithm,
            bytes: bytes.into_boxed_slice(),
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_vec()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hexadecimal representation.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Digest({}:{})", self.algorithm, self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
