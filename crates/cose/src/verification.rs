use scitt_crypto::{PublicKeyPoint, VerificationError};

use crate::{DecodeError, DecodedStatement, SignedStatement};

/// Statement verification error.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Signature(#[from] VerificationError),
}

impl DecodedStatement {
    /// Verifies the signature against the given public key.
    pub fn verify(&self, key: &PublicKeyPoint) -> Result<(), VerificationError> {
        self.cose()
            .verify_signature(&[], |signature, signing_bytes| {
                key.verify(signing_bytes, signature)
            })
    }

    /// Verifies the signature against the key embedded in the statement's
    /// own confirmation claim.
    ///
    /// This only proves the statement was signed by whoever controls that
    /// key, not that the key belongs to the claimed issuer.
    pub fn verify_with_confirmation_key(&self) -> Result<(), VerificationError> {
        self.verify(self.header().confirmation_key())
    }
}

impl SignedStatement {
    /// Decodes the statement and verifies its signature.
    ///
    /// Without a `key`, the confirmation key of the statement is used.
    pub fn verify(&self, key: Option<&PublicKeyPoint>) -> Result<DecodedStatement, VerifyError> {
        let decoded = self.decode()?;
        match key {
            Some(key) => decoded.verify(key)?,
            None => decoded.verify_with_confirmation_key()?,
        }

        log::debug!("verified statement for subject `{}`", decoded.header().subject());
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sign, HashAlgorithm, SigningKey, StatementHeader};
    use coset::TaggedCborSerializable;

    fn signed(key: &SigningKey) -> SignedStatement {
        let header = StatementHeader::builder("iss", "sub", key.public_coordinates().unwrap()).build();
        sign(&header, &HashAlgorithm::Sha256.digest(b"content"), key).unwrap()
    }

    #[test]
    fn verify_confirmation_key() {
        let key = SigningKey::generate();
        let statement = signed(&key);
        statement.verify(None).unwrap();
        statement
            .verify(Some(&key.public_coordinates().unwrap()))
            .unwrap();
    }

    #[test]
    fn reject_other_key() {
        let statement = signed(&SigningKey::generate());
        let other = SigningKey::generate().public_coordinates().unwrap();
        assert!(matches!(
            statement.verify(Some(&other)),
            Err(VerifyError::Signature(VerificationError::Mismatch))
        ));
    }

    #[test]
    fn reject_tampered_payload() {
        let statement = signed(&SigningKey::generate());
        let mut cose = statement.decode().unwrap().into_cose();
        if let Some(payload) = &mut cose.payload {
            payload[0] ^= 1;
        }
        let tampered = SignedStatement::new(cose.to_tagged_vec().unwrap());
        assert!(matches!(
            tampered.verify(None),
            Err(VerifyError::Signature(VerificationError::Mismatch))
        ));
    }

    #[test]
    fn reject_malformed_signature() {
        let statement = signed(&SigningKey::generate());
        let mut cose = statement.decode().unwrap().into_cose();
        cose.signature.truncate(63);
        let tampered = SignedStatement::new(cose.to_tagged_vec().unwrap());
        assert!(matches!(
            tampered.verify(None),
            Err(VerifyError::Signature(VerificationError::SignatureMalformed))
        ));
    }
}
