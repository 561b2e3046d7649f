use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::{Error, NameToken, Result, bimap::{BiMap, Identified}};

pub(crate) fn check_not_blank(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{what} must not be blank")));
    }
    Ok(())
}

/// Bidirectional mapping between enumerated XML values and their CBOR
/// values.
#[derive(Debug, Clone)]
pub struct EnumValues {
    values: BiMap<NameToken>,
}

impl EnumValues {
    pub fn new() -> Self {
        Self {
            values: BiMap::new("enum value"),
        }
    }

    /// The CBOR value for `xml_value`.
    pub fn lookup(&self, xml_value: &str) -> Option<NameToken> {
        let rv = self.values.get(xml_value).cloned();
        trace!(xml_value, cbor_value = ?rv, "enum value forward lookup");
        rv
    }

    /// The XML value for `cbor_value`.
    pub fn reverse_lookup(&self, cbor_value: &NameToken) -> Option<&str> {
        let rv = self.values.key_of(cbor_value);
        trace!(%cbor_value, xml_value = ?rv, "enum value reverse lookup");
        rv
    }

    pub fn add(&mut self, xml_value: impl Into<String>, cbor_value: NameToken) -> Result<()> {
        let xml_value = xml_value.into();
        check_not_blank(&xml_value, "XML value")?;
        trace!(xml_value = xml_value.as_str(), %cbor_value, "enum value mapped");
        self.values.insert(xml_value, cbor_value);
        Ok(())
    }

    pub fn remove(&mut self, xml_value: &str) {
        self.values.remove(xml_value);
    }

    pub fn remove_by_token(&mut self, cbor_value: &NameToken) {
        self.values.remove_by_token(cbor_value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(xml value, cbor value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NameToken)> {
        self.values.iter()
    }
}

impl Default for EnumValues {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum AttributeKind {
    Simple,
    EnumValue(EnumValues),
}

/// An attribute entry of an element.
///
/// Attributes are identified by their CBOR name alone: two attributes with
/// the same CBOR name are equal whatever their XML names.
#[derive(Debug, Clone)]
pub struct Attribute {
    xml_name: String,
    cbor_name: NameToken,
    kind: AttributeKind,
}

impl Attribute {
    pub fn simple(xml_name: impl Into<String>, cbor_name: NameToken) -> Result<Self> {
        Self::with_kind(xml_name.into(), cbor_name, AttributeKind::Simple)
    }

    /// An attribute whose values are drawn from an enumeration.
    pub fn enum_value(xml_name: impl Into<String>, cbor_name: NameToken) -> Result<Self> {
        Self::with_kind(xml_name.into(), cbor_name, AttributeKind::EnumValue(EnumValues::new()))
    }

    fn with_kind(xml_name: String, cbor_name: NameToken, kind: AttributeKind) -> Result<Self> {
        check_not_blank(&xml_name, "XML name")?;
        let rv = Self { xml_name, cbor_name, kind };
        trace!(attribute = ?rv, "attribute constructed");
        Ok(rv)
    }

    pub fn xml_name(&self) -> &str {
        &self.xml_name
    }

    pub fn cbor_name(&self) -> &NameToken {
        &self.cbor_name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn is_enum_value_attribute(&self) -> bool {
        matches!(self.kind, AttributeKind::EnumValue(_))
    }

    pub fn enum_values(&self) -> Option<&EnumValues> {
        match &self.kind {
            AttributeKind::EnumValue(values) => Some(values),
            AttributeKind::Simple => None,
        }
    }

    pub fn lookup_enum_value(&self, xml_value: &str) -> Option<NameToken> {
        self.enum_values()?.lookup(xml_value)
    }

    pub fn reverse_lookup_enum_value(&self, cbor_value: &NameToken) -> Option<&str> {
        self.enum_values()?.reverse_lookup(cbor_value)
    }

    /// Fails with `InvalidArgument` on a simple attribute.
    pub fn add_enum_value(
        &mut self,
        xml_value: impl Into<String>,
        cbor_value: NameToken,
    ) -> Result<()> {
        match &mut self.kind {
            AttributeKind::EnumValue(values) => values.add(xml_value, cbor_value),
            AttributeKind::Simple => Err(Error::InvalidArgument(format!(
                "attribute '{}' does not hold enum values",
                self.xml_name
            ))),
        }
    }

    pub fn remove_enum_value(&mut self, xml_value: &str) {
        if let AttributeKind::EnumValue(values) = &mut self.kind {
            values.remove(xml_value);
        }
    }

    pub fn remove_enum_value_by_token(&mut self, cbor_value: &NameToken) {
        if let AttributeKind::EnumValue(values) = &mut self.kind {
            values.remove_by_token(cbor_value);
        }
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.cbor_name == other.cbor_name
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cbor_name.hash(state);
    }
}

impl Identified for Attribute {
    fn identity(&self) -> &NameToken {
        &self.cbor_name
    }
}
