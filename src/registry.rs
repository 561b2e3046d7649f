use std::collections::HashMap;

use tracing::debug;

use crate::{Dictionary, Result, attribute::check_not_blank};

/// A keyed collection of dictionaries for applications that share several
/// dictionary instances.
///
/// The registry is an ordinary value owned by the application; wrap it in a
/// lock if it has to be shared across threads.
#[derive(Debug, Default)]
pub struct DictionaryRegistry {
    default: Dictionary,
    named: HashMap<String, Dictionary>,
}

impl DictionaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_dictionary(&self) -> &Dictionary {
        &self.default
    }

    pub fn default_dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.default
    }

    /// The dictionary registered as `name`, created empty on first use.
    pub fn get_or_create(&mut self, name: &str) -> Result<&mut Dictionary> {
        check_not_blank(name, "Instance name")?;
        Ok(self.named.entry(name.to_string()).or_insert_with(|| {
            debug!(name, "dictionary instance created");
            Dictionary::new()
        }))
    }

    pub fn get(&self, name: &str) -> Option<&Dictionary> {
        self.named.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// Unregisters `name`, returning its dictionary if there was one.
    pub fn remove(&mut self, name: &str) -> Option<Dictionary> {
        let removed = self.named.remove(name);
        if removed.is_some() {
            debug!(name, "dictionary instance removed");
        }
        removed
    }
}
