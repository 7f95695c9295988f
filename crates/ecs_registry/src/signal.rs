//! Signal kinds and the per-component-type binding table.
//!
//! A binding maps a `(component type, signal kind)` pair to one callback
//! taking an entity handle. The table supports registration and lookup
//! only — there is no disconnect, and re-connecting a pair silently
//! overwrites the previous binding (last write wins).

use std::collections::HashMap;

use tracing::debug;

use ecs_component::{Component, ComponentTypeId, EntityHandle};

/// The signal kinds a callback can be bound to.
///
/// Only `Update` exists today; the table is keyed by the full pair so
/// future kinds extend this enum without touching the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The per-tick update hook, dispatched by [`crate::Registry::update`].
    Update,
}

/// A callback bound to a `(component type, signal)` pair.
pub type SignalFn = Box<dyn Fn(&EntityHandle)>;

/// The binding table: one callback per `(component type, signal)` pair.
#[derive(Default)]
pub struct SignalTable {
    bindings: HashMap<(ComponentTypeId, Signal), SignalFn>,
}

impl SignalTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `callback` to `(C, signal)`, silently replacing any previous
    /// binding for that pair.
    pub fn connect<C: Component>(
        &mut self,
        signal: Signal,
        callback: impl Fn(&EntityHandle) + 'static,
    ) {
        let key = (C::component_type_id(), signal);
        let replaced = self
            .bindings
            .insert(key, Box::new(callback))
            .is_some();
        debug!(
            component = C::type_name(),
            ?signal,
            replaced,
            "signal connected"
        );
    }

    /// Look up the binding for `(type_id, signal)`.
    #[must_use]
    pub fn get(&self, type_id: ComponentTypeId, signal: Signal) -> Option<&SignalFn> {
        self.bindings.get(&(type_id, signal))
    }

    /// Returns `true` if `(C, signal)` has a binding.
    #[must_use]
    pub fn is_connected<C: Component>(&self, signal: Signal) -> bool {
        self.bindings.contains_key(&(C::component_type_id(), signal))
    }

    /// Returns the number of bindings in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if the table has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl std::fmt::Debug for SignalTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalTable")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Default)]
    struct Velocity;

    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    #[derive(Debug, Default)]
    struct Position;

    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[test]
    fn test_connect_and_lookup() {
        let mut table = SignalTable::new();
        assert!(table.is_empty());

        table.connect::<Velocity>(Signal::Update, |_| {});
        assert!(table.is_connected::<Velocity>(Signal::Update));
        assert!(!table.is_connected::<Position>(Signal::Update));
        assert!(
            table
                .get(Velocity::component_type_id(), Signal::Update)
                .is_some()
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_reconnect_overwrites_silently() {
        let hits = Rc::new(Cell::new(0u32));

        let mut table = SignalTable::new();
        {
            let hits = hits.clone();
            table.connect::<Velocity>(Signal::Update, move |_| hits.set(hits.get() + 1));
        }
        {
            let hits = hits.clone();
            table.connect::<Velocity>(Signal::Update, move |_| hits.set(hits.get() + 100));
        }
        assert_eq!(table.len(), 1);

        let entity = EntityHandle::new(Dummy::default());
        let callback = table
            .get(Velocity::component_type_id(), Signal::Update)
            .unwrap();
        callback(&entity);
        // Only the last-connected callback runs.
        assert_eq!(hits.get(), 100);
    }

    #[derive(Default)]
    struct Dummy {
        components: ecs_component::ComponentStore,
    }

    impl ecs_component::Entity for Dummy {
        fn components(&self) -> &ecs_component::ComponentStore {
            &self.components
        }

        fn components_mut(&mut self) -> &mut ecs_component::ComponentStore {
            &mut self.components
        }
    }
}
