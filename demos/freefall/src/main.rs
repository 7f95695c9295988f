//! Freefall — a minimal host simulation built on the framework.
//!
//! Declares a `Ball` entity variant and the usual suspects (`Position`,
//! `Velocity`, `Name`), registers a few balls, binds an update callback
//! for `Velocity`, and drives a fixed number of ticks. Each tick applies
//! gravity to the velocity and integrates the position.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use components::{Name, Position, Velocity};
use ecs_component::{ComponentStore, Entity};
use ecs_registry::{Registry, Signal};

const GRAVITY: f32 = -9.81;
const DT: f32 = 1.0 / 60.0;
const TICKS: u32 = 120;

/// A ball in freefall.
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

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("freefall=info".parse()?))
        .init();

    info!("freefall simulation starting");

    let mut registry = Registry::new();

    for (label, x) in [("left", -1.0f32), ("middle", 0.0), ("right", 1.0)] {
        let ball = registry.spawn(Ball::default());
        let mut entity = ball.borrow_mut();
        let store = entity.components_mut();
        store.insert(Name::new(label))?;
        store.insert(Position::new(x, 10.0))?;
        store.insert(Velocity::default())?;
    }

    // An anchor without Velocity: queries and dispatch must skip it.
    let anchor = registry.spawn(Ball::default());
    anchor
        .borrow_mut()
        .components_mut()
        .insert(Name::new("anchor"))?;

    info!(
        live = registry.len(),
        falling = registry.entities_with::<Velocity>().len(),
        "world populated"
    );

    // Gravity + integration, driven per tick for every Velocity holder.
    registry.connect::<Velocity>(Signal::Update, |entity| {
        let mut entity = entity.borrow_mut();
        let store = entity.components_mut();
        let dy = if let Some(velocity) = store.get_mut::<Velocity>() {
            velocity.y += GRAVITY * DT;
            velocity.y * DT
        } else {
            0.0
        };
        if let Some(position) = store.get_mut::<Position>() {
            position.y += dy;
        }
    });

    for _ in 0..TICKS {
        registry.update::<Velocity>();
    }

    for handle in registry.entities_with::<Position>() {
        let entity = handle.borrow();
        let store = entity.components();
        let label = store.get::<Name>().map_or("?", |n| n.value.as_str());
        if let Some(position) = store.get::<Position>() {
            info!(ball = label, x = position.x, y = position.y, "final state");
        }
    }

    registry.unregister_all();
    info!("freefall simulation shut down");
    Ok(())
}
