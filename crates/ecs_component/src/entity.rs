//! Entity contract and the shared [`EntityHandle`].
//!
//! An entity is pure identity plus one owned [`ComponentStore`]. Host code
//! defines entity variants by embedding a store and implementing
//! [`Entity`]; everything the framework does with an entity goes through
//! that store.
//!
//! The registry never owns entities outright — it tracks [`EntityHandle`]s.
//! A handle is a cheap clone of a single-threaded shared pointer, and two
//! handles are equal exactly when they refer to the same entity in memory
//! (pointer identity, not value identity). Unregistering removes a handle
//! from the live-set; the entity itself lives until its last handle is
//! dropped.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::component::Component;
use crate::store::ComponentStore;

/// The entity contract: identity wrapping one [`ComponentStore`].
///
/// # Examples
///
/// ```rust
/// use ecs_component::{ComponentStore, Entity};
///
/// #[derive(Default)]
/// struct Ball {
///     components: ComponentStore,
/// }
///
/// impl Entity for Ball {
///     fn components(&self) -> &ComponentStore { &self.components }
///     fn components_mut(&mut self) -> &mut ComponentStore { &mut self.components }
/// }
/// ```
pub trait Entity: Any {
    /// The entity's owned component collection.
    fn components(&self) -> &ComponentStore;

    /// Mutable access to the entity's component collection.
    fn components_mut(&mut self) -> &mut ComponentStore;
}

/// A shared, single-threaded handle to an entity.
///
/// Cloning a handle never clones the entity. Equality and the registry's
/// live-set membership are keyed by pointer identity.
#[derive(Clone)]
pub struct EntityHandle {
    inner: Rc<RefCell<dyn Entity>>,
}

impl EntityHandle {
    /// Wrap a concrete entity in a fresh handle.
    #[must_use]
    pub fn new<E: Entity>(entity: E) -> Self {
        Self {
            inner: Rc::new(RefCell::new(entity)),
        }
    }

    /// Borrow the entity behind this handle.
    ///
    /// # Panics
    ///
    /// Panics if the entity is currently borrowed mutably.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, dyn Entity> {
        self.inner.borrow()
    }

    /// Mutably borrow the entity behind this handle.
    ///
    /// # Panics
    ///
    /// Panics if the entity is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, dyn Entity> {
        self.inner.borrow_mut()
    }

    /// Borrow the entity downcast to its concrete variant `E`.
    ///
    /// Returns `None` if the entity behind this handle is not an `E`.
    #[must_use]
    pub fn borrow_as<E: Entity>(&self) -> Option<Ref<'_, E>> {
        Ref::filter_map(self.inner.borrow(), |entity| {
            let any: &dyn Any = entity;
            any.downcast_ref::<E>()
        })
        .ok()
    }

    /// Mutably borrow the entity downcast to its concrete variant `E`.
    ///
    /// Returns `None` if the entity behind this handle is not an `E`.
    #[must_use]
    pub fn borrow_as_mut<E: Entity>(&self) -> Option<RefMut<'_, E>> {
        RefMut::filter_map(self.inner.borrow_mut(), |entity| {
            let any: &mut dyn Any = entity;
            any.downcast_mut::<E>()
        })
        .ok()
    }

    /// Returns `true` if the entity currently holds a `C`.
    #[must_use]
    pub fn has_component<C: Component>(&self) -> bool {
        self.inner.borrow().components().has::<C>()
    }

    /// The entity's address, used as its identity.
    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.inner).cast::<()>()
    }
}

impl PartialEq for EntityHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl Eq for EntityHandle {}

impl std::fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityHandle({:p})", self.addr())
    }
}
