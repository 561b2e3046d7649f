use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, trace};

use crate::{
    Attribute, DictionaryPath, Element, Error, NameToken, Namespace, ParseError, Result,
    bimap::BiMap, parse::DescriptionParser,
};

/// The top-level registry of namespaces.
///
/// A dictionary is built once, from code or from description text, and is
/// then consulted in both directions: XML names to CBOR names while encoding,
/// CBOR names back to XML names while decoding.
#[derive(Debug, Clone)]
pub struct Dictionary {
    namespaces: BiMap<Namespace>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            namespaces: BiMap::new("namespace"),
        }
    }

    /// Parses the description read from `reader` and merges its namespaces
    /// into this dictionary.
    ///
    /// A namespace whose XML name is already present replaces the existing
    /// one. The description is parsed completely before anything is merged,
    /// so on error the dictionary is left unchanged.
    pub fn extend_dictionary<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let namespaces = DescriptionParser::new(reader).parse()?;
        debug!(count = namespaces.len(), "merging parsed namespaces");
        for namespace in namespaces {
            self.add_namespace(namespace);
        }
        Ok(())
    }

    pub fn extend_dictionary_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::open(path).map_err(ParseError::Read)?;
        self.extend_dictionary(BufReader::new(file))
    }

    /// Clears the dictionary, then extends it from `reader`.
    pub fn replace_dictionary<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.clear();
        self.extend_dictionary(reader)
    }

    pub fn replace_dictionary_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.clear();
        self.extend_dictionary_from_file(path)
    }

    pub fn lookup_namespace(&self, xml_name: &str) -> Option<&Namespace> {
        let rv = self.namespaces.get(xml_name);
        trace!(xml_name, found = rv.is_some(), "namespace forward lookup");
        rv
    }

    pub fn lookup_namespace_mut(&mut self, xml_name: &str) -> Option<&mut Namespace> {
        self.namespaces.get_mut(xml_name)
    }

    pub fn reverse_lookup_namespace(&self, cbor_name: &NameToken) -> Option<&Namespace> {
        let rv = self.namespaces.get_by_token(cbor_name);
        trace!(%cbor_name, entry = ?rv.map(Namespace::xml_name), "namespace reverse lookup");
        rv
    }

    pub fn add_namespace(&mut self, namespace: Namespace) {
        self.namespaces.insert(namespace.xml_name().to_string(), namespace);
    }

    pub fn remove_namespace(&mut self, xml_name: &str) {
        self.namespaces.remove(xml_name);
    }

    pub fn clear(&mut self) {
        self.namespaces.clear();
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Resolves an element path such as `<urn:ns>outer+inner`.
    ///
    /// Fails with `PathSyntax` if `path` is not a valid dictionary path.
    /// Returns `None` if any step of the path is missing, including when an
    /// intermediate element is not a complex element.
    pub fn find_element_by_path(&self, path: &str) -> Result<Option<&Element>> {
        let path = DictionaryPath::parse(path)?;
        Ok(self.resolve_element(&path))
    }

    /// Resolves an attribute path such as `<urn:ns>outer+inner@id`.
    ///
    /// A path without an attribute segment is a `PathSyntax` error, unless
    /// its element part already resolves to nothing.
    pub fn find_attribute_by_path(&self, path: &str) -> Result<Option<&Attribute>> {
        let parsed = DictionaryPath::parse(path)?;
        let Some(element) = self.resolve_element(&parsed) else {
            return Ok(None);
        };
        match parsed.attribute() {
            Some(attribute) => Ok(element.lookup_attribute(attribute)),
            None => Err(Error::PathSyntax(format!(
                "Path specifies no target attribute: {path}"
            ))),
        }
    }

    fn resolve_element(&self, path: &DictionaryPath) -> Option<&Element> {
        let namespace = self.lookup_namespace(path.namespace())?;
        let (first, rest) = path.elements().split_first()?;
        let mut element = namespace.lookup_element(first);
        for name in rest {
            let current = element?;
            if !current.is_complex_element() {
                return None;
            }
            element = current.lookup_nested_element(name);
        }
        element
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
