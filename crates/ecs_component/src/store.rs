//! Per-entity type-erased component storage.
//!
//! Each entity owns one [`ComponentStore`]: a flat list of entries, each
//! pairing a recorded [`ComponentTypeId`] with a boxed, type-erased value.
//! Lookups are linear scans over the recorded IDs followed by a checked
//! downcast — per-entity component counts are small, so no type-indexed
//! map is used.
//!
//! The store upholds one invariant: at most one instance per concrete
//! component type. Insertion enforces it; every other operation relies on
//! it.

use std::any::Any;

use thiserror::Error;
use tracing::trace;

use crate::component::{Component, ComponentTypeId};

/// Errors produced by [`ComponentStore`] insertion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The entity already holds a component of the requested type.
    #[error("entity already holds a '{component}' component")]
    DuplicateComponent {
        /// Name of the offending component type.
        component: &'static str,
    },
}

/// One stored component: recorded identity plus the erased value.
struct StoreEntry {
    type_id: ComponentTypeId,
    name: &'static str,
    value: Box<dyn Any>,
}

impl StoreEntry {
    fn new<C: Component>(value: C) -> Self {
        Self {
            type_id: C::component_type_id(),
            name: C::type_name(),
            value: Box::new(value),
        }
    }
}

/// An entity's owned component collection.
///
/// Entries keep insertion order; the order carries no semantics. Dropping
/// the store drops every component it holds, so component release is tied
/// to entity destruction rather than to registry bookkeeping.
#[derive(Default)]
pub struct ComponentStore {
    entries: Vec<StoreEntry>,
}

impl ComponentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Attach a default-constructed `C`, returning a mutable reference to
    /// the stored instance.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateComponent`] if the store already
    /// holds a `C`; the existing instance is left untouched.
    pub fn add<C: Component + Default>(&mut self) -> Result<&mut C, StoreError> {
        self.insert(C::default())
    }

    /// Attach a pre-built component value, returning a mutable reference
    /// to the stored instance.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateComponent`] if the store already
    /// holds a `C`; the existing instance is left untouched.
    pub fn insert<C: Component>(&mut self, value: C) -> Result<&mut C, StoreError> {
        if self.has::<C>() {
            return Err(StoreError::DuplicateComponent {
                component: C::type_name(),
            });
        }

        trace!(component = C::type_name(), "component attached");
        let index = self.entries.len();
        self.entries.push(StoreEntry::new(value));
        let stored = self.entries[index]
            .value
            .downcast_mut::<C>()
            .expect("freshly inserted entry holds the requested type");
        Ok(stored)
    }

    /// Get a shared reference to the stored `C`, if present.
    #[must_use]
    pub fn get<C: Component>(&self) -> Option<&C> {
        let wanted = C::component_type_id();
        self.entries
            .iter()
            .find(|entry| entry.type_id == wanted)
            .and_then(|entry| entry.value.downcast_ref::<C>())
    }

    /// Get a mutable reference to the stored `C`, if present.
    #[must_use]
    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        let wanted = C::component_type_id();
        self.entries
            .iter_mut()
            .find(|entry| entry.type_id == wanted)
            .and_then(|entry| entry.value.downcast_mut::<C>())
    }

    /// Returns `true` if the store holds a `C`.
    #[must_use]
    pub fn has<C: Component>(&self) -> bool {
        let wanted = C::component_type_id();
        self.entries.iter().any(|entry| entry.type_id == wanted)
    }

    /// Detach and drop the stored `C`, scanning for the **last** matching
    /// entry. Under the duplicate-free invariant at most one entry can
    /// match, but last-match-wins is the deterministic tie-break.
    ///
    /// Returns `true` if a component was removed.
    pub fn remove<C: Component>(&mut self) -> bool {
        let wanted = C::component_type_id();
        match self.entries.iter().rposition(|entry| entry.type_id == wanted) {
            Some(index) => {
                let entry = self.entries.remove(index);
                trace!(component = entry.name, "component detached");
                true
            }
            None => false,
        }
    }

    /// Returns the number of components held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no components are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.name))
            .finish()
    }
}
