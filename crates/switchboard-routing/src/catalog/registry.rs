//! Insertion-ordered, name-indexed storage for descriptors.

use std::collections::HashMap;

use super::descriptors::{
    BehaviouralMode, CommandDescriptor, HandlerDescriptor, IntegrationDescriptor,
};
use super::errors::CatalogError;

/// Descriptor keyed by a unique name.
pub trait Named {
    /// Label used in duplicate-name errors.
    const KIND: &'static str;

    /// Unique key.
    fn key(&self) -> &str;
}

impl Named for CommandDescriptor {
    const KIND: &'static str = "command";

    fn key(&self) -> &str {
        self.name()
    }
}

impl Named for HandlerDescriptor {
    const KIND: &'static str = "handler";

    fn key(&self) -> &str {
        self.name()
    }
}

impl Named for IntegrationDescriptor {
    const KIND: &'static str = "integration";

    fn key(&self) -> &str {
        self.name()
    }
}

impl Named for BehaviouralMode {
    const KIND: &'static str = "mode";

    fn key(&self) -> &str {
        self.name()
    }
}

/// Entries in load order plus a name index.
///
/// Iteration order is the order entries appeared in the catalog document and
/// never changes after construction.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Named> Registry<T> {
    /// Builds a registry, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] for the first repeated name.
    pub fn build(entries: Vec<T>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.key().to_owned(), position).is_some() {
                return Err(CatalogError::duplicate(T::KIND, entry.key()));
            }
        }
        Ok(Self { entries, index })
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index
            .get(name)
            .and_then(|position| self.entries.get(*position))
    }

    /// Returns `true` when an entry with `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in load order.
    #[must_use]
    pub const fn as_slice(&self) -> &[T] {
        self.entries.as_slice()
    }

    /// Iterates entries in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Iterates entry names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Named::key)
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the registry holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
