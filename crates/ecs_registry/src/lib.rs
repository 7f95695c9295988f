//! # ecs_registry
//!
//! The registrar half of the framework: a [`Registry`] owns the ordered
//! list of live entities and a [`SignalTable`] of per-component-type
//! callbacks.
//!
//! Host code registers entities, binds a [`Signal::Update`] callback per
//! component type of interest, then drives the simulation by calling
//! [`Registry::update`] once per type, per tick. The registry filters the
//! live-set by component possession and invokes the bound callback for
//! each match.

pub mod registry;
pub mod signal;

pub use registry::{Registry, RegistryError};
pub use signal::{Signal, SignalFn, SignalTable};
