//! Core [`Component`] trait and type identity.
//!
//! The framework is generic without reflection: every component type
//! declares itself once by implementing [`Component`], and every generic
//! operation bounds its type parameter by the trait. The capability check
//! is therefore a compile-time guarantee — there is no runtime "is this a
//! component?" error path.
//!
//! Runtime identity for type-erased storage and signal binding comes from
//! [`ComponentTypeId`], a hash of the component's string name.

/// A unique identifier for a component type, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
///
/// The ID is deterministic: the same name always produces the same ID, so
/// identity does not depend on declaration or registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a component's string name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a component type `C`.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self::from_name(C::type_name())
    }
}

/// The component capability contract.
///
/// Any concrete type attached to an entity must implement this trait. A
/// component is exclusively owned by exactly one entity, and an entity
/// holds at most one instance per concrete component type — the store
/// enforces the latter on insertion.
///
/// # Examples
///
/// ```rust
/// use ecs_component::Component;
///
/// #[derive(Debug, Default)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: 'static {
    /// A human-readable name for this component type. Must be unique among
    /// the host's component types — it is the source of type identity.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    ///
    /// The default implementation hashes [`Component::type_name()`] with
    /// FNV-1a 64-bit.
    fn component_type_id() -> ComponentTypeId
    where
        Self: Sized,
    {
        ComponentTypeId::from_name(Self::type_name())
    }
}
