//! Lookup of integer-labeled parameters in decoded CBOR maps.
use coset::Label;

use crate::{CborValue, DecodeError};

pub(crate) trait ParamKey {
    fn as_int(&self) -> Option<i64>;
}

impl ParamKey for CborValue {
    fn as_int(&self) -> Option<i64> {
        self.as_integer().and_then(|i| i64::try_from(i).ok())
    }
}

impl ParamKey for Label {
    fn as_int(&self) -> Option<i64> {
        match self {
            Label::Int(i) => Some(*i),
            Label::Text(_) => None,
        }
    }
}

/// Finds the parameter with the given label, rejecting duplicates.
pub(crate) fn fetch_param<K: ParamKey>(
    params: &[(K, CborValue)],
    label: i64,
) -> Result<Option<&CborValue>, DecodeError> {
    let mut found = None;
    for (key, value) in params {
        if key.as_int() == Some(label) && found.replace(value).is_some() {
            return Err(DecodeError::DuplicateParam(Label::Int(label)));
        }
    }

    Ok(found)
}

pub(crate) fn require_param<K: ParamKey>(
    params: &[(K, CborValue)],
    label: i64,
) -> Result<&CborValue, DecodeError> {
    fetch_param(params, label)?.ok_or(DecodeError::MissingParam(Label::Int(label)))
}

pub(crate) fn parse_required_param<'a, K: ParamKey, T>(
    params: &'a [(K, CborValue)],
    label: i64,
    f: impl FnOnce(&'a CborValue) -> Option<T>,
) -> Result<T, DecodeError> {
    f(require_param(params, label)?).ok_or(DecodeError::InvalidParam(Label::Int(label)))
}

pub(crate) fn parse_optional_param<'a, K: ParamKey, T>(
    params: &'a [(K, CborValue)],
    label: i64,
    f: impl FnOnce(&'a CborValue) -> Option<T>,
) -> Result<Option<T>, DecodeError> {
    match fetch_param(params, label)? {
        Some(value) => f(value)
            .map(Some)
            .ok_or(DecodeError::InvalidParam(Label::Int(label))),
        None => Ok(None),
    }
}

pub(crate) fn text(value: &CborValue) -> Option<String> {
    value.as_text().map(ToOwned::to_owned)
}

pub(crate) fn int(value: &CborValue) -> Option<i64> {
    value.as_int()
}
