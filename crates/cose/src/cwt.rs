//! CWT claims carried in the protected header.
use coset::{iana, AsCborValue, CoseError, CoseKey, CoseKeyBuilder, KeyType, Label};
use scitt_crypto::PublicKeyPoint;

use crate::{
    label::{CNF_COSE_KEY, CWT_CONFIRMATION, CWT_ISSUER, CWT_SUBJECT},
    params::{fetch_param, parse_required_param, require_param, text},
    CborValue, DecodeError,
};

pub const EC2_CRV: Label = Label::Int(iana::Ec2KeyParameter::Crv as i64);
pub const EC2_X: Label = Label::Int(iana::Ec2KeyParameter::X as i64);
pub const EC2_Y: Label = Label::Int(iana::Ec2KeyParameter::Y as i64);

/// CWT claims set of a statement.
///
/// The confirmation claim embeds the signer's public key so that a
/// verifier can check the signature against the very key the issuer
/// asserts, without consulting a key registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CwtClaims {
    /// `iss` claim.
    pub issuer: String,

    /// `sub` claim.
    pub subject: String,

    /// Public key of the `cnf` claim.
    pub confirmation: PublicKeyPoint,
}

impl CwtClaims {
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        confirmation: PublicKeyPoint,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            subject: subject.into(),
            confirmation,
        }
    }

    /// Confirmation key as an EC2 P-256 `COSE_Key`.
    pub fn confirmation_key(&self) -> CoseKey {
        CoseKeyBuilder::new_ec2_pub_key(
            iana::EllipticCurve::P_256,
            self.confirmation.x().to_vec(),
            self.confirmation.y().to_vec(),
        )
        .build()
    }

    /// Encodes the claims set as `{1: iss, 2: sub, 8: {1: COSE_Key}}`.
    pub fn to_cbor_value(&self) -> Result<CborValue, CoseError> {
        let cose_key = self.confirmation_key().to_cbor_value()?;
        Ok(CborValue::Map(vec![
            (CWT_ISSUER.into(), self.issuer.as_str().into()),
            (CWT_SUBJECT.into(), self.subject.as_str().into()),
            (
                CWT_CONFIRMATION.into(),
                CborValue::Map(vec![(CNF_COSE_KEY.into(), cose_key)]),
            ),
        ]))
    }

    pub fn from_cbor_value(value: &CborValue) -> Result<Self, DecodeError> {
        let claims = value
            .as_map()
            .ok_or(DecodeError::InvalidParam(Label::Int(crate::label::CWT_CLAIMS)))?;

        let claims = claims.as_slice();

        let issuer = parse_required_param(claims, CWT_ISSUER, text)?;
        let subject = parse_required_param(claims, CWT_SUBJECT, text)?;

        let cnf = parse_required_param(claims, CWT_CONFIRMATION, CborValue::as_map)?;
        let cose_key = require_param(cnf.as_slice(), CNF_COSE_KEY)?;
        let cose_key = CoseKey::from_cbor_value(cose_key.clone())
            .map_err(|_| DecodeError::InvalidParam(Label::Int(CNF_COSE_KEY)))?;

        Ok(Self {
            issuer,
            subject,
            confirmation: decode_p256_key(&cose_key)?,
        })
    }
}

/// Extracts the public point of an EC2 P-256 `COSE_Key`.
pub fn decode_p256_key(key: &CoseKey) -> Result<PublicKeyPoint, DecodeError> {
    if key.kty != KeyType::Assigned(iana::KeyType::EC2) {
        return Err(DecodeError::UnsupportedParam(
            Label::Int(iana::KeyParameter::Kty as i64),
            kty_value(&key.kty),
        ));
    }

    let crv = fetch_key_param(key, &EC2_CRV)?
        .as_integer()
        .and_then(|i| i64::try_from(i).ok())
        .ok_or(DecodeError::InvalidParam(EC2_CRV))?;
    if crv != iana::EllipticCurve::P_256 as i64 {
        return Err(DecodeError::UnsupportedParam(EC2_CRV, crv.into()));
    }

    let x = fetch_key_param(key, &EC2_X)?
        .as_bytes()
        .ok_or(DecodeError::InvalidParam(EC2_X))?;
    let y = fetch_key_param(key, &EC2_Y)?
        .as_bytes()
        .ok_or(DecodeError::InvalidParam(EC2_Y))?;

    PublicKeyPoint::new(x.clone(), y.clone()).map_err(Into::into)
}

fn fetch_key_param<'a>(key: &'a CoseKey, label: &Label) -> Result<&'a CborValue, DecodeError> {
    let value = match label {
        Label::Int(i) => fetch_param(key.params.as_slice(), *i)?,
        Label::Text(_) => None,
    };

    value.ok_or_else(|| DecodeError::MissingParam(label.clone()))
}

fn kty_value(kty: &KeyType) -> CborValue {
    match kty {
        KeyType::Assigned(t) => (*t as i64).into(),
        KeyType::Text(t) => t.as_str().into(),
    }
}
