//! ECS world container.
//!
//! [`World`] is a thin facade over [`bevy_ecs::world::World`]. Bevy owns the
//! dense per-type component tables; the facade adds what the gameplay core
//! needs on top:
//!
//! - monotonically increasing integer [`EntityId`]s (never reused, so a
//!   dangling id reports "not found" rather than aliasing a new entity)
//! - [`CoreError::EntityNotFound`] when mutating a missing entity
//! - queries over a runtime set of [`ComponentKind`] tags
//! - an ordered list of [`GameSystem`]s driven by [`World::update`] and
//!   [`World::fixed_update`]
//!
//! Systems that need to iterate many entities can reach the underlying bevy
//! world through [`World::ecs_mut`] and use regular bevy queries. Each entity
//! carries its own [`EntityId`] as a component so those queries can report it.

use std::fmt;

use bevy_ecs::component::{Component, Mutable};
use bevy_ecs::entity::Entity;
use bevy_ecs::world::{EntityRef, Mut, World as EcsWorld};
use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::movementstate::MovementState;
use crate::components::physics::Physics;
use crate::components::platform::Platform;
use crate::components::playerinput::PlayerInput;
use crate::components::transform::Transform;
use crate::error::{CoreError, Result};
use crate::resources::Resources;

/// Opaque entity identifier handed out by [`World::create_entity`].
#[derive(
    Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of component type tags understood by [`World::query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Transform,
    Physics,
    PlayerInput,
    MovementState,
    Platform,
}

impl ComponentKind {
    /// Whether the given bevy entity carries a component of this kind.
    fn is_present(self, entity: &EntityRef<'_>) -> bool {
        match self {
            ComponentKind::Transform => entity.contains::<Transform>(),
            ComponentKind::Physics => entity.contains::<Physics>(),
            ComponentKind::PlayerInput => entity.contains::<PlayerInput>(),
            ComponentKind::MovementState => entity.contains::<MovementState>(),
            ComponentKind::Platform => entity.contains::<Platform>(),
        }
    }
}

/// Binds a component type to its [`ComponentKind`] tag.
pub trait GameComponent: Component<Mutability = Mutable> {
    const KIND: ComponentKind;
}

/// A per-frame transformer over the world.
///
/// Both hooks are required; a system with nothing to do in one phase
/// implements it as a no-op returning `Ok(())`.
pub trait GameSystem {
    /// Unique name, used by [`World::remove_system`].
    fn name(&self) -> &'static str;

    /// Variable-rate hook, called once per frame. `dt` is in seconds.
    fn update(&mut self, world: &mut World, resources: &mut Resources, dt: f32) -> Result<()>;

    /// Fixed-rate hook, called once per consumed fixed step. `dt` is in seconds.
    fn fixed_update(&mut self, world: &mut World, resources: &mut Resources, dt: f32)
    -> Result<()>;
}

#[derive(Clone, Copy)]
enum Phase {
    Variable,
    Fixed,
}

/// Entity/component container plus the ordered system pipeline.
pub struct World {
    ecs: EcsWorld,
    entities: FxHashMap<EntityId, Entity>,
    systems: Vec<Box<dyn GameSystem>>,
    next_entity_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world. The first entity gets id 1.
    pub fn new() -> Self {
        Self {
            ecs: EcsWorld::new(),
            entities: FxHashMap::default(),
            systems: Vec::new(),
            next_entity_id: 1,
        }
    }

    /// Create a new entity with no gameplay components.
    pub fn create_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        let entity = self.ecs.spawn(id).id();
        self.entities.insert(id, entity);
        id
    }

    /// Remove an entity and all of its components.
    ///
    /// Returns false if the id was not alive.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        match self.entities.remove(&id) {
            Some(entity) => {
                self.ecs.despawn(entity);
                debug!("Removed entity {}", id);
                true
            }
            None => false,
        }
    }

    pub fn has_entity(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All live entity ids in creation order.
    pub fn entities(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn resolve(&self, id: EntityId) -> Result<Entity> {
        self.entities
            .get(&id)
            .copied()
            .ok_or(CoreError::EntityNotFound(id))
    }

    /// Attach `component` to the entity, replacing any existing one of the same type.
    pub fn add_component<C: GameComponent>(&mut self, id: EntityId, component: C) -> Result<()> {
        let entity = self.resolve(id)?;
        self.ecs.entity_mut(entity).insert(component);
        Ok(())
    }

    /// Detach and return the component of type `C`, if the entity had one.
    pub fn remove_component<C: GameComponent>(&mut self, id: EntityId) -> Result<Option<C>> {
        let entity = self.resolve(id)?;
        Ok(self.ecs.entity_mut(entity).take::<C>())
    }

    /// Borrow a component. Missing entity or missing component both yield `None`.
    pub fn get_component<C: GameComponent>(&self, id: EntityId) -> Option<&C> {
        let entity = self.entities.get(&id)?;
        self.ecs.get::<C>(*entity)
    }

    /// Mutably borrow a component. Missing entity or missing component both yield `None`.
    pub fn get_component_mut<C: GameComponent>(&mut self, id: EntityId) -> Option<Mut<'_, C>> {
        let entity = *self.entities.get(&id)?;
        self.ecs.get_mut::<C>(entity)
    }

    /// Like [`get_component`](Self::get_component) but reports which lookup failed.
    pub fn require_component<C: GameComponent>(&self, id: EntityId) -> Result<&C> {
        let entity = self.resolve(id)?;
        self.ecs
            .get::<C>(entity)
            .ok_or(CoreError::ComponentNotFound {
                entity: id,
                kind: C::KIND,
            })
    }

    pub fn has_component<C: GameComponent>(&self, id: EntityId) -> bool {
        self.get_component::<C>(id).is_some()
    }

    /// Tag-based variant of [`has_component`](Self::has_component).
    pub fn has_kind(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.entities
            .get(&id)
            .and_then(|entity| self.ecs.get_entity(*entity).ok())
            .is_some_and(|entity_ref| kind.is_present(&entity_ref))
    }

    /// Ids of every live entity carrying all of `kinds`.
    ///
    /// The order of the result is unspecified. An empty `kinds` slice matches
    /// every entity.
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter_map(|(id, entity)| {
                let entity_ref = self.ecs.get_entity(*entity).ok()?;
                kinds
                    .iter()
                    .all(|kind| kind.is_present(&entity_ref))
                    .then_some(*id)
            })
            .collect()
    }

    /// Read-only access to the underlying bevy world.
    pub fn ecs(&self) -> &EcsWorld {
        &self.ecs
    }

    /// Mutable access to the underlying bevy world, for bevy queries.
    ///
    /// Spawning or despawning through this handle bypasses the id map; use
    /// [`create_entity`](Self::create_entity) and
    /// [`remove_entity`](Self::remove_entity) instead.
    pub fn ecs_mut(&mut self) -> &mut EcsWorld {
        &mut self.ecs
    }

    /// Append a system to the pipeline. Systems run in registration order.
    pub fn add_system<S: GameSystem + 'static>(&mut self, system: S) {
        debug!("Registered system {}", system.name());
        self.systems.push(Box::new(system));
    }

    /// Remove every system with the given name. Returns true if any was removed.
    pub fn remove_system(&mut self, name: &str) -> bool {
        let before = self.systems.len();
        self.systems.retain(|system| system.name() != name);
        self.systems.len() != before
    }

    /// Registered system names in execution order.
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Run every system's variable-rate hook in registration order.
    pub fn update(&mut self, resources: &mut Resources, dt: f32) -> Result<()> {
        self.run_phase(resources, dt, Phase::Variable)
    }

    /// Run every system's fixed-rate hook in registration order.
    pub fn fixed_update(&mut self, resources: &mut Resources, dt: f32) -> Result<()> {
        self.run_phase(resources, dt, Phase::Fixed)
    }

    // The system list is moved out while it runs so each system can borrow
    // the world mutably. Systems registered during the phase are kept.
    fn run_phase(&mut self, resources: &mut Resources, dt: f32, phase: Phase) -> Result<()> {
        let mut systems = std::mem::take(&mut self.systems);
        let mut result = Ok(());
        for system in systems.iter_mut() {
            result = match phase {
                Phase::Variable => system.update(self, resources, dt),
                Phase::Fixed => system.fixed_update(self, resources, dt),
            };
            if result.is_err() {
                break;
            }
        }
        systems.append(&mut self.systems);
        self.systems = systems;
        result
    }

    /// Drop all entities and systems and restart ids at 1.
    pub fn clear(&mut self) {
        self.ecs.clear_entities();
        self.entities.clear();
        self.systems.clear();
        self.next_entity_id = 1;
    }
}
