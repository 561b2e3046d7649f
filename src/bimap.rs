use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::warn;

use crate::NameToken;

/// A value stored in a [`BiMap`], identified on the reverse side by its
/// CBOR name.
pub(crate) trait Identified {
    fn identity(&self) -> &NameToken;
}

impl Identified for NameToken {
    fn identity(&self) -> &NameToken {
        self
    }
}

/// One-to-one mapping between XML names and values identified by a token.
///
/// Both sides stay unique: inserting a value whose XML name or CBOR name is
/// already taken drops the old pairing. Forward iteration follows insertion
/// order.
#[derive(Debug, Clone)]
pub(crate) struct BiMap<V> {
    kind: &'static str,
    forward: IndexMap<String, V>,
    reverse: HashMap<NameToken, String>,
}

impl<V: Identified> BiMap<V> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            forward: IndexMap::new(),
            reverse: HashMap::new(),
        }
    }

    pub fn get(&self, xml_name: &str) -> Option<&V> {
        self.forward.get(xml_name)
    }

    pub fn get_mut(&mut self, xml_name: &str) -> Option<&mut V> {
        self.forward.get_mut(xml_name)
    }

    pub fn key_of(&self, token: &NameToken) -> Option<&str> {
        self.reverse.get(token).map(String::as_str)
    }

    pub fn get_by_token(&self, token: &NameToken) -> Option<&V> {
        self.reverse.get(token).and_then(|key| self.forward.get(key))
    }

    /// Inserts `value` under `xml_name`, reporting overwritten pairings as
    /// collision warnings. Returns the value previously stored under
    /// `xml_name`.
    pub fn insert(&mut self, xml_name: String, value: V) -> Option<V> {
        let identity = value.identity().clone();

        if let Some(old_key) = self.reverse.remove(&identity) {
            if old_key != xml_name {
                self.forward.shift_remove(&old_key);
                warn!(
                    kind = self.kind,
                    old = %old_key,
                    new = %xml_name,
                    cbor_name = %identity,
                    "two {}s with same CBOR mapping",
                    self.kind
                );
            }
        }

        let replaced = self.forward.insert(xml_name.clone(), value);
        if let Some(prev) = &replaced {
            if prev.identity() != &identity {
                self.reverse.remove(prev.identity());
            }
            warn!(
                kind = self.kind,
                xml_name = %xml_name,
                old_cbor_name = %prev.identity(),
                "previous {} mapping overridden",
                self.kind
            );
        }
        self.reverse.insert(identity, xml_name);

        replaced
    }

    pub fn remove(&mut self, xml_name: &str) -> Option<V> {
        let removed = self.forward.shift_remove(xml_name)?;
        self.reverse.remove(removed.identity());
        Some(removed)
    }

    pub fn remove_by_token(&mut self, token: &NameToken) -> Option<(String, V)> {
        let key = self.reverse.remove(token)?;
        let value = self.forward.shift_remove(&key)?;
        Some((key, value))
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.forward.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.forward.values()
    }
}
