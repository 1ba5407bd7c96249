//! Hash envelope parameters.
//!
//! See: <https://github.com/OR13/draft-steele-cose-hash-envelope>
use std::collections::BTreeMap;

use coset::Label;
use scitt_crypto::HashAlgorithm;
use serde::{Deserialize, Serialize};

use crate::{
    label::{
        hash_algorithm_from_label, hash_algorithm_label, META_MAP, PAYLOAD_HASH_ALGORITHM,
        PAYLOAD_LOCATION, PAYLOAD_PRE_CONTENT_TYPE,
    },
    params::{fetch_param, int, parse_optional_param, parse_required_param, text},
    CborValue, DecodeError, StatementError,
};

/// Free-form `tstr => tstr` metadata attached to a statement.
///
/// Entries are kept sorted by key so the encoded header is deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaMap(BTreeMap<String, String>);

impl MetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object whose values are all strings.
    pub fn from_json(json: &str) -> Result<Self, StatementError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| StatementError::MalformedMetadata(e.to_string()))?;

        let serde_json::Value::Object(object) = value else {
            return Err(StatementError::MalformedMetadata(
                "expected a JSON object".to_owned(),
            ));
        };

        object
            .into_iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(value) => Ok((key, value)),
                _ => Err(StatementError::MalformedMetadata(format!(
                    "value of `{key}` is not a string"
                ))),
            })
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_cbor_value(&self) -> CborValue {
        CborValue::Map(
            self.0
                .iter()
                .map(|(k, v)| (k.as_str().into(), v.as_str().into()))
                .collect(),
        )
    }

    pub fn from_cbor_value(value: &CborValue) -> Option<Self> {
        value
            .as_map()?
            .iter()
            .map(|(k, v)| Some((k.as_text()?.to_owned(), v.as_text()?.to_owned())))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetaMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Hash envelope parameters of a statement.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HashEnvelopeParams {
    /// Algorithm used to digest the payload.
    pub algorithm: HashAlgorithm,

    /// Where the original content can be found.
    pub location: Option<String>,

    /// Content type of the original content.
    pub pre_image_content_type: Option<String>,

    /// Indexed metadata.
    pub meta_map: Option<MetaMap>,
}

impl HashEnvelopeParams {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Header parameters, in label order. Absent fields are omitted.
    pub fn header_params(&self) -> Vec<(Label, CborValue)> {
        let mut params = vec![(
            Label::Int(PAYLOAD_HASH_ALGORITHM),
            hash_algorithm_label(self.algorithm).into(),
        )];

        if let Some(location) = &self.location {
            params.push((Label::Int(PAYLOAD_LOCATION), location.as_str().into()));
        }

        if let Some(content_type) = &self.pre_image_content_type {
            params.push((
                Label::Int(PAYLOAD_PRE_CONTENT_TYPE),
                content_type.as_str().into(),
            ));
        }

        if let Some(meta_map) = &self.meta_map {
            params.push((Label::Int(META_MAP), meta_map.to_cbor_value()));
        }

        params
    }

    pub fn from_header_params(params: &[(Label, CborValue)]) -> Result<Self, DecodeError> {
        let code = parse_required_param(params, PAYLOAD_HASH_ALGORITHM, int)?;
        let algorithm = hash_algorithm_from_label(code).ok_or_else(|| {
            DecodeError::UnsupportedParam(Label::Int(PAYLOAD_HASH_ALGORITHM), code.into())
        })?;

        // Accept an explicit null for absent fields, which some producers emit.
        let optional_text = |label: i64| -> Result<Option<String>, DecodeError> {
            match fetch_param(params, label)? {
                Some(CborValue::Null) => Ok(None),
                _ => parse_optional_param(params, label, text),
            }
        };

        let meta_map = match fetch_param(params, META_MAP)? {
            Some(CborValue::Null) | None => None,
            Some(value) => Some(
                MetaMap::from_cbor_value(value)
                    .ok_or(DecodeError::InvalidParam(Label::Int(META_MAP)))?,
            ),
        };

        Ok(Self {
            algorithm,
            location: optional_text(PAYLOAD_LOCATION)?,
            pre_image_content_type: optional_text(PAYLOAD_PRE_CONTENT_TYPE)?,
            meta_map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_map_from_json() {
        let map = MetaMap::from_json(r#"{"version": "1.2", "build": "42"}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("version"), Some("1.2"));
        // Sorted by key.
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            [("build", "42"), ("version", "1.2")]
        );
    }

    #[test]
    fn meta_map_rejects_non_strings() {
        assert!(matches!(
            MetaMap::from_json(r#"{"count": 3}"#),
            Err(StatementError::MalformedMetadata(_))
        ));
        assert!(matches!(
            MetaMap::from_json(r#"["a", "b"]"#),
            Err(StatementError::MalformedMetadata(_))
        ));
        assert!(matches!(
            MetaMap::from_json("{"),
            Err(StatementError::MalformedMetadata(_))
        ));
    }

    #[test]
    fn minimal_params() {
        let params = HashEnvelopeParams::new(HashAlgorithm::Sha384).header_params();
        assert_eq!(params, [(Label::Int(-6800), CborValue::from(-43))]);
    }

    #[test]
    fn full_params() {
        let envelope = HashEnvelopeParams {
            algorithm: HashAlgorithm::Sha256,
            location: Some("https://example.com/sbom.json".to_owned()),
            pre_image_content_type: Some("application/spdx+json".to_owned()),
            meta_map: Some([("k", "v")].into_iter().collect()),
        };
        let params = envelope.header_params();
        let labels: Vec<_> = params.iter().map(|(l, _)| l.clone()).collect();
        assert_eq!(
            labels,
            [
                Label::Int(-6800),
                Label::Int(-6801),
                Label::Int(-6802),
                Label::Int(-6804)
            ]
        );

        assert_eq!(HashEnvelopeParams::from_header_params(&params).unwrap(), envelope);
    }

    #[test]
    fn null_fields_are_absent() {
        let params = vec![
            (Label::Int(-6800), CborValue::from(-16)),
            (Label::Int(-6801), CborValue::Null),
            (Label::Int(-6802), CborValue::Null),
            (Label::Int(-6804), CborValue::Null),
        ];
        assert_eq!(
            HashEnvelopeParams::from_header_params(&params).unwrap(),
            HashEnvelopeParams::new(HashAlgorithm::Sha256)
        );
    }

    #[test]
    fn reject_unknown_hash_algorithm() {
        let params = vec![(Label::Int(-6800), CborValue::from(-17))];
        assert!(matches!(
            HashEnvelopeParams::from_header_params(&params),
            Err(DecodeError::UnsupportedParam(Label::Int(-6800), _))
        ));
    }
}
