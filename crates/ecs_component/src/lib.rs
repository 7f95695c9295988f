//! # ecs_component
//!
//! The "E" and "C" of the framework — defines what a component is, how an
//! entity stores components without reflection, and the handle type the
//! registry tracks entities by.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the capability contract all component types must
//!   satisfy.
//! - [`ComponentTypeId`] — explicit runtime type identity, derived from the
//!   component's string name.
//! - [`ComponentStore`] — per-entity type-erased storage with add/get/has/
//!   remove semantics.
//! - [`Entity`] trait and [`EntityHandle`] — the identity contract and the
//!   shared handle the registry keeps in its live-set.

pub mod component;
pub mod entity;
pub mod store;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityHandle};
pub use store::{ComponentStore, StoreError};
