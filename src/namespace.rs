use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::{
    Element, NameToken, Result,
    attribute::check_not_blank,
    bimap::{BiMap, Identified},
};

/// An XML namespace and the elements defined in it.
///
/// Namespaces compare equal when their CBOR names are equal.
#[derive(Debug, Clone)]
pub struct Namespace {
    xml_name: String,
    cbor_name: NameToken,
    elements: BiMap<Element>,
}

impl Namespace {
    pub fn new(xml_name: impl Into<String>, cbor_name: NameToken) -> Result<Self> {
        let xml_name = xml_name.into();
        check_not_blank(&xml_name, "XML name")?;
        trace!(xml_name = xml_name.as_str(), %cbor_name, "namespace constructed");
        Ok(Self {
            xml_name,
            cbor_name,
            elements: BiMap::new("element"),
        })
    }

    pub fn xml_name(&self) -> &str {
        &self.xml_name
    }

    pub fn cbor_name(&self) -> &NameToken {
        &self.cbor_name
    }

    pub fn lookup_element(&self, xml_name: &str) -> Option<&Element> {
        let rv = self.elements.get(xml_name);
        trace!(xml_name, entry = ?rv.map(Element::xml_name), "element forward lookup");
        rv
    }

    pub fn lookup_element_mut(&mut self, xml_name: &str) -> Option<&mut Element> {
        self.elements.get_mut(xml_name)
    }

    /// Finds the element whose CBOR name equals `cbor_name` with any tag
    /// removed.
    ///
    /// Unlike the other reverse lookups, a tagged token matches the untagged
    /// element entry here.
    pub fn reverse_lookup_element(&self, cbor_name: &NameToken) -> Option<&Element> {
        let probe = cbor_name.untagged();
        let rv = self.elements.get_by_token(&probe);
        trace!(%cbor_name, entry = ?rv.map(Element::xml_name), "element reverse lookup");
        rv
    }

    pub fn add_element(&mut self, element: Element) {
        self.elements.insert(element.xml_name().to_string(), element);
    }

    pub fn remove_element(&mut self, xml_name: &str) {
        self.elements.remove(xml_name);
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.cbor_name == other.cbor_name
    }
}

impl Eq for Namespace {}

impl Hash for Namespace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cbor_name.hash(state);
    }
}

impl Identified for Namespace {
    fn identity(&self) -> &NameToken {
        &self.cbor_name
    }
}
