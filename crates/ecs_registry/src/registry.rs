//! The entity registry: live-set bookkeeping, typed queries, and signal
//! dispatch.
//!
//! A [`Registry`] is an ordinary value — construct one per simulation and
//! pass it around explicitly. It owns two things: the ordered live-set of
//! entity handles, and the [`SignalTable`] of per-component-type
//! callbacks.
//!
//! Registration is bookkeeping only. The registry appends and removes
//! handles; it never destroys an entity or its components. An entity
//! dropped from the live-set keeps existing for as long as the host holds
//! a handle to it.

use thiserror::Error;
use tracing::{debug, trace};

use ecs_component::{Component, Entity, EntityHandle};

use crate::signal::{Signal, SignalTable};

/// Errors produced by [`Registry`] registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The handle's identity is already present in the live-set.
    #[error("entity is already registered")]
    AlreadyRegistered,
}

/// Registrar of live entities and signal bindings.
#[derive(Default)]
pub struct Registry {
    /// The ordered live-set. Identity-keyed: no handle appears twice.
    entities: Vec<EntityHandle>,
    /// Per-component-type callback bindings.
    signals: SignalTable,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            signals: SignalTable::new(),
        }
    }

    // -- Entity lifecycle --

    /// Construct-and-register: wrap `entity` in a fresh handle, append it
    /// to the live-set, and return the handle.
    ///
    /// A fresh handle is always a new identity, so no duplicate check is
    /// needed.
    pub fn spawn<E: Entity>(&mut self, entity: E) -> EntityHandle {
        let handle = EntityHandle::new(entity);
        debug!(entity = ?handle, "entity registered");
        self.entities.push(handle.clone());
        handle
    }

    /// Append a pre-built handle to the live-set.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if the handle's
    /// identity is already in the live-set.
    pub fn register(&mut self, handle: EntityHandle) -> Result<(), RegistryError> {
        if self.entities.contains(&handle) {
            return Err(RegistryError::AlreadyRegistered);
        }
        debug!(entity = ?handle, "entity registered");
        self.entities.push(handle);
        Ok(())
    }

    /// Remove `handle` from the live-set, matching by identity.
    ///
    /// Returns `true` if a removal occurred. The entity's resources are
    /// not released — ownership stays with whoever holds a handle.
    pub fn unregister(&mut self, handle: &EntityHandle) -> bool {
        match self.entities.iter().position(|entry| entry == handle) {
            Some(index) => {
                self.entities.remove(index);
                debug!(entity = ?handle, "entity unregistered");
                true
            }
            None => false,
        }
    }

    /// Clear the live-set. The signal table is left untouched — bindings
    /// outlive the entities they were dispatched over.
    pub fn unregister_all(&mut self) {
        debug!(count = self.entities.len(), "live-set cleared");
        self.entities.clear();
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entities are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The live-set, in registration order.
    #[must_use]
    pub fn entities(&self) -> &[EntityHandle] {
        &self.entities
    }

    // -- Queries --

    /// The ordered subsequence of the live-set whose members hold a `C`.
    #[must_use]
    pub fn entities_with<C: Component>(&self) -> Vec<EntityHandle> {
        Self::filter_with::<C>(&self.entities)
    }

    /// Filter a caller-supplied subset down to the entities holding a `C`,
    /// preserving relative order.
    #[must_use]
    pub fn filter_with<C: Component>(subset: &[EntityHandle]) -> Vec<EntityHandle> {
        subset
            .iter()
            .filter(|handle| handle.has_component::<C>())
            .cloned()
            .collect()
    }

    // -- Signals --

    /// Bind `callback` to `(C, signal)`, replacing any previous binding.
    pub fn connect<C: Component>(
        &mut self,
        signal: Signal,
        callback: impl Fn(&EntityHandle) + 'static,
    ) {
        self.signals.connect::<C>(signal, callback);
    }

    /// The owned signal table.
    #[must_use]
    pub fn signals(&self) -> &SignalTable {
        &self.signals
    }

    /// Mutable access to the owned signal table.
    pub fn signals_mut(&mut self) -> &mut SignalTable {
        &mut self.signals
    }

    /// Dispatch `signal` for component type `C`: every live entity holding
    /// a `C` is visited in live-set order, and the `(C, signal)` callback
    /// — if one is bound — is invoked once with that entity's handle.
    ///
    /// Entities lacking `C`, and types with no binding, are silently
    /// skipped.
    pub fn emit<C: Component>(&self, signal: Signal) {
        let type_id = C::component_type_id();
        for handle in &self.entities {
            let qualifies = handle.has_component::<C>();
            if !qualifies {
                continue;
            }
            if let Some(callback) = self.signals.get(type_id, signal) {
                trace!(component = C::type_name(), entity = ?handle, ?signal, "dispatch");
                callback(handle);
            }
        }
    }

    /// Dispatch the [`Signal::Update`] hook for component type `C`. Call
    /// once per component type of interest, per tick.
    pub fn update<C: Component>(&self) {
        self.emit::<C>(Signal::Update);
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.entities.len())
            .field("signals", &self.signals)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ecs_component::ComponentStore;

    use super::*;

    #[derive(Debug, Default)]
    struct Position {
        x: f32,
    }

    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[derive(Debug, Default)]
    struct Velocity {
        x: f32,
    }

    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    #[derive(Default)]
    struct Ball {
        components: ComponentStore,
    }

    impl Entity for Ball {
        fn components(&self) -> &ComponentStore {
            &self.components
        }

        fn components_mut(&mut self) -> &mut ComponentStore {
            &mut self.components
        }
    }

    fn spawn_with_velocity(registry: &mut Registry) -> EntityHandle {
        let handle = registry.spawn(Ball::default());
        handle
            .borrow_mut()
            .components_mut()
            .add::<Velocity>()
            .unwrap();
        handle
    }

    #[test]
    fn test_spawn_appends_to_live_set() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        let a = registry.spawn(Ball::default());
        let b = registry.spawn(Ball::default());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entities(), &[a, b]);
    }

    #[test]
    fn test_register_prebuilt_handle() {
        let mut registry = Registry::new();
        let handle = EntityHandle::new(Ball::default());

        registry.register(handle.clone()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_double_register_fails() {
        let mut registry = Registry::new();
        let handle = EntityHandle::new(Ball::default());

        registry.register(handle.clone()).unwrap();
        let err = registry.register(handle).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_true_then_false() {
        let mut registry = Registry::new();
        let handle = registry.spawn(Ball::default());

        assert!(registry.unregister(&handle));
        assert!(!registry.unregister(&handle));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister_keeps_entity_alive() {
        let mut registry = Registry::new();
        let handle = spawn_with_velocity(&mut registry);

        registry.unregister(&handle);
        // The handle still owns a live entity with its components.
        assert!(handle.has_component::<Velocity>());
    }

    #[test]
    fn test_unregister_all_keeps_bindings() {
        let mut registry = Registry::new();
        registry.spawn(Ball::default());
        registry.spawn(Ball::default());
        registry.connect::<Velocity>(Signal::Update, |_| {});

        registry.unregister_all();
        assert!(registry.is_empty());
        assert!(registry.signals().is_connected::<Velocity>(Signal::Update));
    }

    #[test]
    fn test_entities_with_preserves_order() {
        let mut registry = Registry::new();
        let a = spawn_with_velocity(&mut registry);
        let plain = registry.spawn(Ball::default());
        let b = spawn_with_velocity(&mut registry);

        let with_velocity = registry.entities_with::<Velocity>();
        assert_eq!(with_velocity, vec![a, b]);
        assert!(!with_velocity.contains(&plain));
    }

    #[test]
    fn test_entities_with_matches_has_filter() {
        let mut registry = Registry::new();
        for index in 0..6 {
            let handle = registry.spawn(Ball::default());
            if index % 2 == 0 {
                handle
                    .borrow_mut()
                    .components_mut()
                    .add::<Position>()
                    .unwrap();
            }
        }

        let expected: Vec<EntityHandle> = registry
            .entities()
            .iter()
            .filter(|handle| handle.has_component::<Position>())
            .cloned()
            .collect();
        assert_eq!(registry.entities_with::<Position>(), expected);
        assert_eq!(expected.len(), 3);
    }

    #[test]
    fn test_filter_with_on_subset() {
        let mut registry = Registry::new();
        let a = spawn_with_velocity(&mut registry);
        let plain = registry.spawn(Ball::default());
        let b = spawn_with_velocity(&mut registry);

        let subset = vec![plain.clone(), b.clone()];
        let filtered = Registry::filter_with::<Velocity>(&subset);
        assert_eq!(filtered, vec![b]);
        assert!(!filtered.contains(&a));
    }

    #[test]
    fn test_update_invokes_once_per_qualifying_entity_in_order() {
        let mut registry = Registry::new();
        let a = spawn_with_velocity(&mut registry);
        let plain = registry.spawn(Ball::default());
        let b = spawn_with_velocity(&mut registry);

        let visited: Rc<RefCell<Vec<EntityHandle>>> = Rc::default();
        {
            let visited = visited.clone();
            registry.connect::<Velocity>(Signal::Update, move |entity| {
                visited.borrow_mut().push(entity.clone());
            });
        }

        registry.update::<Velocity>();
        assert_eq!(*visited.borrow(), vec![a, b]);
        assert!(!visited.borrow().contains(&plain));
    }

    #[test]
    fn test_update_without_binding_is_noop() {
        let mut registry = Registry::new();
        let handle = registry.spawn(Ball::default());
        handle
            .borrow_mut()
            .components_mut()
            .add::<Position>()
            .unwrap();

        // No binding for Position — nothing happens, nothing panics.
        registry.update::<Position>();
    }

    #[test]
    fn test_update_callback_can_mutate_entity() {
        let mut registry = Registry::new();
        let handle = registry.spawn(Ball::default());
        {
            let mut entity = handle.borrow_mut();
            let store = entity.components_mut();
            store.insert(Position { x: 0.0 }).unwrap();
            store.insert(Velocity { x: 3.0 }).unwrap();
        }

        registry.connect::<Velocity>(Signal::Update, |entity| {
            let mut entity = entity.borrow_mut();
            let store = entity.components_mut();
            let dx = store.get::<Velocity>().map_or(0.0, |v| v.x);
            if let Some(position) = store.get_mut::<Position>() {
                position.x += dx;
            }
        });

        registry.update::<Velocity>();
        registry.update::<Velocity>();

        let entity = handle.borrow();
        assert_eq!(entity.components().get::<Position>().unwrap().x, 6.0);
    }

    #[test]
    fn test_scenario_velocity_update_fires_once_position_unbound() {
        let mut registry = Registry::new();
        let a = registry.spawn(Ball::default());
        {
            let mut entity = a.borrow_mut();
            let store = entity.components_mut();
            store.add::<Position>().unwrap();
            store.add::<Velocity>().unwrap();
        }

        let calls: Rc<RefCell<Vec<EntityHandle>>> = Rc::default();
        {
            let calls = calls.clone();
            registry.connect::<Velocity>(Signal::Update, move |entity| {
                calls.borrow_mut().push(entity.clone());
            });
        }

        registry.update::<Velocity>();
        assert_eq!(*calls.borrow(), vec![a]);

        // Position has no binding: nothing more is invoked.
        registry.update::<Position>();
        assert_eq!(calls.borrow().len(), 1);
    }
}
