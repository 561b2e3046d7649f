use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::{
    Attribute, EnumValues, Error, NameToken, Result,
    attribute::check_not_blank,
    bimap::{BiMap, Identified},
};

/// The elements nested inside a complex element.
#[derive(Debug, Clone)]
pub struct NestedElements {
    elements: BiMap<Element>,
}

impl NestedElements {
    pub fn new() -> Self {
        Self {
            elements: BiMap::new("nested element"),
        }
    }

    pub fn lookup(&self, xml_name: &str) -> Option<&Element> {
        let rv = self.elements.get(xml_name);
        trace!(xml_name, entry = ?rv.map(Element::xml_name), "nested element forward lookup");
        rv
    }

    pub fn lookup_mut(&mut self, xml_name: &str) -> Option<&mut Element> {
        self.elements.get_mut(xml_name)
    }

    pub fn reverse_lookup(&self, cbor_name: &NameToken) -> Option<&Element> {
        let rv = self.elements.get_by_token(cbor_name);
        trace!(%cbor_name, entry = ?rv.map(Element::xml_name), "nested element reverse lookup");
        rv
    }

    pub fn add(&mut self, element: Element) {
        self.elements.insert(element.xml_name.clone(), element);
    }

    pub fn remove(&mut self, xml_name: &str) {
        self.elements.remove(xml_name);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }
}

impl Default for NestedElements {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum ElementKind {
    Simple,
    /// The element's text content is drawn from an enumeration.
    EnumValue(EnumValues),
    /// The element contains further elements.
    Complex(NestedElements),
}

/// An element ("tag") entry of a namespace or of a complex element.
///
/// Like attributes, elements are identified by their CBOR name alone.
#[derive(Debug, Clone)]
pub struct Element {
    xml_name: String,
    cbor_name: NameToken,
    attributes: BiMap<Attribute>,
    kind: ElementKind,
}

impl Element {
    pub fn simple(xml_name: impl Into<String>, cbor_name: NameToken) -> Result<Self> {
        Self::with_kind(xml_name.into(), cbor_name, ElementKind::Simple)
    }

    pub fn enum_value(xml_name: impl Into<String>, cbor_name: NameToken) -> Result<Self> {
        Self::with_kind(xml_name.into(), cbor_name, ElementKind::EnumValue(EnumValues::new()))
    }

    pub fn complex(xml_name: impl Into<String>, cbor_name: NameToken) -> Result<Self> {
        Self::with_kind(xml_name.into(), cbor_name, ElementKind::Complex(NestedElements::new()))
    }

    fn with_kind(xml_name: String, cbor_name: NameToken, kind: ElementKind) -> Result<Self> {
        check_not_blank(&xml_name, "XML name")?;
        let rv = Self {
            xml_name,
            cbor_name,
            attributes: BiMap::new("attribute"),
            kind,
        };
        trace!(xml_name = rv.xml_name.as_str(), cbor_name = %rv.cbor_name, "element constructed");
        Ok(rv)
    }

    pub fn xml_name(&self) -> &str {
        &self.xml_name
    }

    pub fn cbor_name(&self) -> &NameToken {
        &self.cbor_name
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn is_enum_value_element(&self) -> bool {
        matches!(self.kind, ElementKind::EnumValue(_))
    }

    pub fn is_complex_element(&self) -> bool {
        matches!(self.kind, ElementKind::Complex(_))
    }

    //
    // Attributes
    //

    pub fn lookup_attribute(&self, xml_name: &str) -> Option<&Attribute> {
        let rv = self.attributes.get(xml_name);
        trace!(xml_name, entry = ?rv.map(Attribute::xml_name), "attribute forward lookup");
        rv
    }

    pub fn lookup_attribute_mut(&mut self, xml_name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(xml_name)
    }

    pub fn reverse_lookup_attribute(&self, cbor_name: &NameToken) -> Option<&Attribute> {
        let rv = self.attributes.get_by_token(cbor_name);
        trace!(%cbor_name, entry = ?rv.map(Attribute::xml_name), "attribute reverse lookup");
        rv
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.insert(attribute.xml_name().to_string(), attribute);
    }

    pub fn remove_attribute(&mut self, xml_name: &str) {
        self.attributes.remove(xml_name);
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    //
    // Enum values
    //

    pub fn enum_values(&self) -> Option<&EnumValues> {
        match &self.kind {
            ElementKind::EnumValue(values) => Some(values),
            _ => None,
        }
    }

    pub fn lookup_enum_value(&self, xml_value: &str) -> Option<NameToken> {
        self.enum_values()?.lookup(xml_value)
    }

    pub fn reverse_lookup_enum_value(&self, cbor_value: &NameToken) -> Option<&str> {
        self.enum_values()?.reverse_lookup(cbor_value)
    }

    /// Fails with `InvalidArgument` unless this is an enum-value element.
    pub fn add_enum_value(
        &mut self,
        xml_value: impl Into<String>,
        cbor_value: NameToken,
    ) -> Result<()> {
        match &mut self.kind {
            ElementKind::EnumValue(values) => values.add(xml_value, cbor_value),
            _ => Err(Error::InvalidArgument(format!(
                "element '{}' does not hold enum values",
                self.xml_name
            ))),
        }
    }

    pub fn remove_enum_value(&mut self, xml_value: &str) {
        if let ElementKind::EnumValue(values) = &mut self.kind {
            values.remove(xml_value);
        }
    }

    //
    // Nested elements
    //

    pub fn nested_elements(&self) -> Option<&NestedElements> {
        match &self.kind {
            ElementKind::Complex(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn nested_elements_mut(&mut self) -> Option<&mut NestedElements> {
        match &mut self.kind {
            ElementKind::Complex(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn lookup_nested_element(&self, xml_name: &str) -> Option<&Element> {
        self.nested_elements()?.lookup(xml_name)
    }

    pub fn reverse_lookup_nested_element(&self, cbor_name: &NameToken) -> Option<&Element> {
        self.nested_elements()?.reverse_lookup(cbor_name)
    }

    /// Fails with `InvalidArgument` unless this is a complex element.
    pub fn add_nested_element(&mut self, element: Element) -> Result<()> {
        match &mut self.kind {
            ElementKind::Complex(nested) => {
                nested.add(element);
                Ok(())
            }
            _ => Err(Error::InvalidArgument(format!(
                "element '{}' cannot hold nested elements",
                self.xml_name
            ))),
        }
    }

    pub fn remove_nested_element(&mut self, xml_name: &str) {
        if let Some(nested) = self.nested_elements_mut() {
            nested.remove(xml_name);
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.cbor_name == other.cbor_name
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cbor_name.hash(state);
    }
}

impl Identified for Element {
    fn identity(&self) -> &NameToken {
        &self.cbor_name
    }
}
