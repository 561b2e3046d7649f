use std::{
    fmt,
    hash::{Hash, Hasher},
};

use dcbor::prelude::*;
use dcbor::Simple;

use crate::{Error, Result};

/// The payload of a [`NameToken`].
#[derive(Debug, Clone)]
pub enum TokenValue {
    UnsignedInt(u64),
    NegativeInt(i64),
    Double(f64),
    ByteString(Vec<u8>),
    UnicodeString(String),
    Bool(bool),
}

impl PartialEq for TokenValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UnsignedInt(a), Self::UnsignedInt(b)) => a == b,
            (Self::NegativeInt(a), Self::NegativeInt(b)) => a == b,
            // Bitwise so that equality agrees with hashing.
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::ByteString(a), Self::ByteString(b)) => a == b,
            (Self::UnicodeString(a), Self::UnicodeString(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TokenValue {}

impl Hash for TokenValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::UnsignedInt(v) => v.hash(state),
            Self::NegativeInt(v) => v.hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::ByteString(v) => v.hash(state),
            Self::UnicodeString(v) => v.hash(state),
            Self::Bool(v) => v.hash(state),
        }
    }
}

/// A binary name as it appears in a CBOR-encoded XML document.
///
/// A token is a typed value with an optional CBOR tag attached. Two tokens
/// are equal when their variant, payload and tag all match, the same way two
/// CBOR data items compare.
///
/// ```rust
/// # use cbor_xml_dictionary::NameToken;
/// let token = NameToken::unsigned(7).with_tag(42);
/// assert_eq!(token.tag(), Some(42));
/// assert_ne!(token, NameToken::unsigned(7));
/// assert_eq!(token.untagged(), NameToken::unsigned(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameToken {
    value: TokenValue,
    tag: Option<u64>,
}

impl NameToken {
    pub fn new(value: TokenValue) -> Self {
        Self { value, tag: None }
    }

    pub fn unsigned(value: u64) -> Self {
        Self::new(TokenValue::UnsignedInt(value))
    }

    pub fn negative(value: i64) -> Self {
        Self::new(TokenValue::NegativeInt(value))
    }

    pub fn double(value: f64) -> Self {
        Self::new(TokenValue::Double(value))
    }

    pub fn byte_string(value: impl Into<Vec<u8>>) -> Self {
        Self::new(TokenValue::ByteString(value.into()))
    }

    pub fn unicode_string(value: impl Into<String>) -> Self {
        Self::new(TokenValue::UnicodeString(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::new(TokenValue::Bool(value))
    }

    /// Returns this token with `tag` attached, replacing any previous tag.
    pub fn with_tag(mut self, tag: u64) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn tag(&self) -> Option<u64> {
        self.tag
    }

    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    /// A copy of this token without its tag.
    pub fn untagged(&self) -> Self {
        Self::new(self.value.clone())
    }

    /// Encodes the token as deterministic CBOR bytes.
    ///
    /// dCBOR numeric reduction applies: a double with an integral value is
    /// written as an integer, so `double(2.0)` and `unsigned(2)` produce the
    /// same bytes.
    pub fn to_cbor_data(&self) -> Vec<u8> {
        CBOR::from(self).to_cbor_data()
    }
}

impl From<TokenValue> for NameToken {
    fn from(value: TokenValue) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for NameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tag {
            write!(f, "{tag}(")?;
        }
        match &self.value {
            TokenValue::UnsignedInt(v) => write!(f, "{v}")?,
            TokenValue::NegativeInt(v) => write!(f, "{v}")?,
            TokenValue::Double(v) => write!(f, "{v:?}")?,
            TokenValue::ByteString(v) => write!(f, "h'{}'", hex::encode(v))?,
            TokenValue::UnicodeString(v) => write!(f, "{v:?}")?,
            TokenValue::Bool(v) => write!(f, "{v}")?,
        }
        if self.tag.is_some() {
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Integral doubles are reduced to integers, as dCBOR requires.
impl From<&NameToken> for CBOR {
    fn from(token: &NameToken) -> Self {
        let item: CBOR = match &token.value {
            TokenValue::UnsignedInt(v) => (*v).into(),
            TokenValue::NegativeInt(v) => (*v).into(),
            TokenValue::Double(v) => (*v).into(),
            TokenValue::ByteString(v) => CBOR::to_byte_string(v),
            TokenValue::UnicodeString(v) => v.as_str().into(),
            TokenValue::Bool(v) => (*v).into(),
        };
        match token.tag {
            Some(tag) => CBOR::to_tagged_value(tag, item),
            None => item,
        }
    }
}

impl From<NameToken> for CBOR {
    fn from(token: NameToken) -> Self {
        CBOR::from(&token)
    }
}

impl TryFrom<&CBOR> for NameToken {
    type Error = Error;

    /// Builds a token from a data item met while decoding. Only one level of
    /// tagging is representable.
    ///
    /// An integer item always becomes an integer token, including one that
    /// was encoded from an integral double.
    fn try_from(cbor: &CBOR) -> Result<Self> {
        match cbor.as_case() {
            CBORCase::Tagged(tag, item) => {
                let token = untagged_token(item)?;
                Ok(token.with_tag(tag.value()))
            }
            _ => untagged_token(cbor),
        }
    }
}

fn untagged_token(cbor: &CBOR) -> Result<NameToken> {
    let value = match cbor.as_case() {
        CBORCase::Unsigned(v) => TokenValue::UnsignedInt(*v),
        CBORCase::Negative(n) => {
            let n = i64::try_from(*n)
                .map_err(|_| Error::UnsupportedCbor(cbor.diagnostic()))?;
            TokenValue::NegativeInt(-1 - n)
        }
        CBORCase::ByteString(bytes) => TokenValue::ByteString(bytes.data().to_vec()),
        CBORCase::Text(text) => TokenValue::UnicodeString(text.clone()),
        CBORCase::Simple(Simple::True) => TokenValue::Bool(true),
        CBORCase::Simple(Simple::False) => TokenValue::Bool(false),
        CBORCase::Simple(Simple::Float(v)) => TokenValue::Double(*v),
        _ => return Err(Error::UnsupportedCbor(cbor.diagnostic())),
    };
    Ok(NameToken::new(value))
}
