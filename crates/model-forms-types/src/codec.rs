// File: model-forms-types/src/codec.rs
// Purpose: Conversion between concrete field types and FieldValue

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

use crate::facts::{DeclaredType, TypeFacts};
use crate::value::FieldValue;

/// Failure converting a [`FieldValue`] back into a field type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("expected {expected} value, got {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value is required but absent")]
    Missing,

    #[error("value {value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("'{case}' is not a case of {case_set}")]
    UnknownCase { case_set: String, case: String },

    #[error("cannot parse '{text}': {reason}")]
    Parse { text: String, reason: String },
}

/// A type that can be stored in a model property and edited through a form.
///
/// Implemented for the primitive types below, for `Option<T>`, and by
/// `#[derive(Enumeration)]` for fieldless enums.
pub trait FieldCodec: Sized {
    /// Raw facts about this type, reported to the property analyzer
    fn declared_type() -> DeclaredType;

    /// Current value, `None` when absent
    fn encode(&self) -> Option<FieldValue>;

    /// Rebuild a value from the form's store entry
    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError>;
}

fn mismatch(expected: &'static str, found: &FieldValue) -> CodecError {
    CodecError::Mismatch {
        expected,
        found: found.kind(),
    }
}

impl FieldCodec for String {
    fn declared_type() -> DeclaredType {
        DeclaredType::plain(TypeFacts::named("String"))
    }

    fn encode(&self) -> Option<FieldValue> {
        Some(FieldValue::String(self.clone()))
    }

    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::String(s)) => Ok(s),
            Some(other) => Err(mismatch("string", &other)),
            None => Err(CodecError::Missing),
        }
    }
}

macro_rules! impl_integer_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldCodec for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::plain(TypeFacts::named(stringify!($ty)))
                }

                fn encode(&self) -> Option<FieldValue> {
                    // Past i64 the magnitude is kept as a real so range rules still see it
                    let value = i64::try_from(*self)
                        .map(FieldValue::Integer)
                        .unwrap_or_else(|_| FieldValue::Real(*self as f64));
                    Some(value)
                }

                fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
                    match value {
                        Some(FieldValue::Integer(i)) => {
                            <$ty>::try_from(i).map_err(|_| CodecError::OutOfRange {
                                value: i.to_string(),
                                target: stringify!($ty),
                            })
                        }
                        Some(other) => Err(mismatch("integer", &other)),
                        None => Err(CodecError::Missing),
                    }
                }
            }
        )*
    };
}

impl_integer_codec!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FieldCodec for f64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::plain(TypeFacts::named("f64"))
    }

    fn encode(&self) -> Option<FieldValue> {
        Some(FieldValue::Real(*self))
    }

    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Real(r)) => Ok(r),
            Some(FieldValue::Integer(i)) => Ok(i as f64),
            Some(other) => Err(mismatch("real", &other)),
            None => Err(CodecError::Missing),
        }
    }
}

impl FieldCodec for f32 {
    fn declared_type() -> DeclaredType {
        DeclaredType::plain(TypeFacts::named("f32"))
    }

    fn encode(&self) -> Option<FieldValue> {
        Some(FieldValue::Real(f64::from(*self)))
    }

    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
        f64::decode(value).map(|r| r as f32)
    }
}

impl FieldCodec for bool {
    fn declared_type() -> DeclaredType {
        DeclaredType::plain(TypeFacts::named("bool"))
    }

    fn encode(&self) -> Option<FieldValue> {
        Some(FieldValue::Boolean(*self))
    }

    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Boolean(b)) => Ok(b),
            Some(other) => Err(mismatch("boolean", &other)),
            None => Err(CodecError::Missing),
        }
    }
}

impl FieldCodec for DateTime<Utc> {
    fn declared_type() -> DeclaredType {
        DeclaredType::plain(TypeFacts::named("DateTime<Utc>"))
    }

    fn encode(&self) -> Option<FieldValue> {
        Some(FieldValue::Timestamp(*self))
    }

    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Timestamp(ts)) => Ok(ts),
            Some(other) => Err(mismatch("timestamp", &other)),
            None => Err(CodecError::Missing),
        }
    }
}

// Naive timestamps are treated as UTC.
impl FieldCodec for NaiveDateTime {
    fn declared_type() -> DeclaredType {
        DeclaredType::plain(TypeFacts::named("NaiveDateTime"))
    }

    fn encode(&self) -> Option<FieldValue> {
        Some(FieldValue::Timestamp(self.and_utc()))
    }

    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
        DateTime::<Utc>::decode(value).map(|ts| ts.naive_utc())
    }
}

impl<T: FieldCodec> FieldCodec for Option<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::optional(T::declared_type())
    }

    fn encode(&self) -> Option<FieldValue> {
        self.as_ref().and_then(FieldCodec::encode)
    }

    fn decode(value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(v) => T::decode(Some(v)).map(Some),
            None => Ok(None),
        }
    }
}

/// Encode a type without its own codec through its `Display` text.
///
/// Used by `#[derive(Model)]` for fields marked `#[model(text)]`.
pub fn encode_text<T: Display>(value: &T) -> Option<FieldValue> {
    Some(FieldValue::String(value.to_string()))
}

/// Decode a `#[model(text)]` field through `FromStr`
pub fn decode_text<T>(value: Option<FieldValue>) -> Result<T, CodecError>
where
    T: FromStr,
    T::Err: Display,
{
    let text = String::decode(value)?;
    text.parse::<T>().map_err(|e| CodecError::Parse {
        text,
        reason: e.to_string(),
    })
}

pub fn encode_optional_text<T: Display>(value: &Option<T>) -> Option<FieldValue> {
    value.as_ref().and_then(encode_text)
}

pub fn decode_optional_text<T>(value: Option<FieldValue>) -> Result<Option<T>, CodecError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(v) => decode_text(Some(v)).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integer_codec() {
        assert_eq!(42i32.encode(), Some(FieldValue::Integer(42)));
        assert_eq!(i32::decode(Some(FieldValue::Integer(-7))), Ok(-7));
        assert!(matches!(
            u8::decode(Some(FieldValue::Integer(300))),
            Err(CodecError::OutOfRange { .. })
        ));
        assert!(matches!(
            i64::decode(Some(FieldValue::Real(1.5))),
            Err(CodecError::Mismatch { .. })
        ));
        assert_eq!(i64::decode(None), Err(CodecError::Missing));
    }

    #[test]
    fn test_unsigned_beyond_i64_is_never_absent() {
        assert_eq!(u64::MAX.encode(), Some(FieldValue::Real(u64::MAX as f64)));
        assert_eq!(
            (i64::MAX as u64).encode(),
            Some(FieldValue::Integer(i64::MAX))
        );
        assert!(matches!(
            u64::decode(u64::MAX.encode()),
            Err(CodecError::Mismatch { expected: "integer", found: "real" })
        ));
    }

    #[test]
    fn test_real_accepts_integer() {
        assert_eq!(f64::decode(Some(FieldValue::Integer(3))), Ok(3.0));
        assert_eq!(f32::decode(Some(FieldValue::Real(2.5))), Ok(2.5));
    }

    #[test]
    fn test_optional_codec() {
        assert_eq!(
            <Option<String>>::declared_type(),
            DeclaredType::optional(DeclaredType::plain(TypeFacts::named("String")))
        );
        assert_eq!(<Option<String>>::decode(None), Ok(None));
        assert_eq!(None::<String>.encode(), None);
        assert_eq!(
            <Option<i32>>::decode(Some(FieldValue::Integer(5))),
            Ok(Some(5))
        );
    }

    #[test]
    fn test_text_codec() {
        let encoded = encode_text(&std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(encoded, Some(FieldValue::String("127.0.0.1".into())));

        let decoded: std::net::Ipv4Addr = decode_text(encoded).unwrap();
        assert_eq!(decoded, std::net::Ipv4Addr::LOCALHOST);

        let bad: Result<std::net::Ipv4Addr, _> =
            decode_text(Some(FieldValue::String("nope".into())));
        assert!(matches!(bad, Err(CodecError::Parse { .. })));

        assert_eq!(
            decode_optional_text::<std::net::Ipv4Addr>(None),
            Ok(None)
        );
    }
}
