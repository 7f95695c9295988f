//! Example component definitions for the entity-component framework.
//!
//! These demonstrate how host code declares component types: plain data
//! structs plus a one-line [`Component`] impl naming the type.

use ecs_component::Component;

/// A 2D position component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    /// Horizontal position in world units.
    pub x: f32,
    /// Vertical position in world units.
    pub y: f32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// A 2D velocity component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    /// Horizontal velocity in world units per second.
    pub x: f32,
    /// Vertical velocity in world units per second.
    pub y: f32,
}

impl Velocity {
    /// Create a new velocity.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// A health component with current and maximum hit points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    /// Current hit points.
    pub current: f32,
    /// Maximum hit points.
    pub max: f32,
}

impl Health {
    /// Create a new health component at full HP.
    #[must_use]
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Returns `true` if the entity is alive (HP > 0).
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Apply damage, clamping to zero.
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::full(100.0)
    }
}

impl Component for Health {
    fn type_name() -> &'static str {
        "Health"
    }
}

/// A simple name tag component for debugging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Name {
    /// The entity's display name.
    pub value: String,
}

impl Name {
    /// Create a new name component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { value: name.into() }
    }
}

impl Component for Name {
    fn type_name() -> &'static str {
        "Name"
    }
}
