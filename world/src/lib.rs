#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative entity state management for the Outbreak simulation.
//!
//! The [`World`] owns the grid of live entities and allocates identifiers.
//! All mutation flows through [`apply`], which executes a [`Command`] and
//! pushes the resulting [`Event`] values for the caller to relay.

use outbreak_core::{
    Command, CreatureId, EntityId, EntityKind, Event, GridSize, Position, ZombieId,
};
use outbreak_system_movement as movement;

/// A live entity tracked by the grid.
///
/// The identifier is fixed for the entity's lifetime; the position is
/// updated in place as the entity moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    position: Position,
}

impl Entity {
    /// Creates a new entity at the provided position.
    #[must_use]
    pub const fn new(id: EntityId, position: Position) -> Self {
        Self { id, position }
    }

    /// Identifier of the entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Kind tag carried by the entity's identifier.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.id.kind()
    }

    /// Cell currently occupied by the entity.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

/// Mutable collection of entities indexed by identifier.
///
/// Iteration order is insertion order throughout; the size is fixed at
/// construction.
#[derive(Clone, Debug)]
pub struct Grid {
    size: GridSize,
    entities: Vec<Entity>,
}

impl Grid {
    /// Creates an empty grid with the provided side length.
    #[must_use]
    pub const fn new(size: GridSize) -> Self {
        Self {
            size,
            entities: Vec::new(),
        }
    }

    /// Side length fixed at construction.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Inserts an entity, overwriting any existing entry with the same id.
    pub fn add_entity(&mut self, entity: Entity) {
        match self.entities.iter_mut().find(|slot| slot.id == entity.id) {
            Some(slot) => *slot = entity,
            None => self.entities.push(entity),
        }
    }

    /// Removes the entity with the provided id; a no-op when absent.
    pub fn remove_entity(&mut self, id: EntityId) {
        self.entities.retain(|entity| entity.id != id);
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Returns the entity occupying the provided cell, if any.
    ///
    /// When seeding placed several entities on one cell, the most recently
    /// added entity wins the lookup.
    #[must_use]
    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        self.entities
            .iter()
            .rev()
            .find(|entity| entity.position == position)
    }

    /// Iterates the entities of one kind, in insertion order.
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |entity| entity.kind() == kind)
    }

    /// All live entities, in insertion order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }
}

/// Represents the authoritative Outbreak world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    next_zombie: u32,
    next_creature: u32,
}

impl World {
    /// Creates a new world with an empty grid of the provided size.
    #[must_use]
    pub const fn new(size: GridSize) -> Self {
        Self {
            grid: Grid::new(size),
            next_zombie: 0,
            next_creature: 0,
        }
    }

    /// Read-only access to the grid of live entities.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    fn allocate_zombie(&mut self) -> ZombieId {
        let id = ZombieId::new(self.next_zombie);
        self.next_zombie += 1;
        id
    }

    fn allocate_creature(&mut self) -> CreatureId {
        let id = CreatureId::new(self.next_creature);
        self.next_creature += 1;
        id
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SpawnZombie { position } => {
            let zombie = world.allocate_zombie();
            world
                .grid
                .add_entity(Entity::new(EntityId::Zombie(zombie), position));
            out_events.push(Event::ZombieSpawned { zombie, position });
        }
        Command::SpawnCreature { position } => {
            let creature = world.allocate_creature();
            world
                .grid
                .add_entity(Entity::new(EntityId::Creature(creature), position));
            out_events.push(Event::CreatureSpawned { creature, position });
        }
        Command::StepZombie { zombie, direction } => {
            let mover = EntityId::Zombie(zombie);
            let Some(from) = world.grid.entity(mover).map(Entity::position) else {
                return;
            };

            let to = movement::step(from, direction, world.grid.size());
            out_events.push(Event::ZombieMoved {
                zombie,
                from,
                direction,
                to,
            });

            // Occupancy is checked before the mover arrives; a creature on
            // the destination converts within the same step.
            if let Some(occupant) = world.grid.entity_at(to).map(Entity::id) {
                if occupant.kind() == EntityKind::Creature {
                    world.grid.remove_entity(occupant);
                    let spawned = world.allocate_zombie();
                    world
                        .grid
                        .add_entity(Entity::new(EntityId::Zombie(spawned), to));
                    out_events.push(Event::CreatureInfected { zombie: spawned, at: to });
                }
            }

            if let Some(entity) = world.grid.entity_mut(mover) {
                entity.set_position(to);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use outbreak_core::{EntityId, EntityKind, GridSize, Position};

    /// Side length of the world's grid.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid.size()
    }

    /// Returns the identifier occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(world: &World, position: Position) -> Option<EntityId> {
        world.grid.entity_at(position).map(super::Entity::id)
    }

    /// Final positions of every zombie, in spawn order.
    ///
    /// Zombies are appended to the grid in spawn order and never removed,
    /// so this matches the engine's queue order.
    #[must_use]
    pub fn zombie_positions(world: &World) -> Vec<Position> {
        world
            .grid
            .entities_of(EntityKind::Zombie)
            .map(super::Entity::position)
            .collect()
    }

    /// Positions of every surviving creature, in seeding order.
    #[must_use]
    pub fn creature_positions(world: &World) -> Vec<Position> {
        world
            .grid
            .entities_of(EntityKind::Creature)
            .map(super::Entity::position)
            .collect()
    }

    /// Number of live entities of the provided kind.
    #[must_use]
    pub fn entity_count(world: &World, kind: EntityKind) -> usize {
        world.grid.entities_of(kind).count()
    }

    /// Captures a read-only snapshot of every live entity, in insertion order.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView {
            snapshots: world
                .grid
                .entities()
                .iter()
                .map(|entity| EntitySnapshot {
                    id: entity.id(),
                    kind: entity.kind(),
                    position: entity.position(),
                })
                .collect(),
        }
    }

    /// Read-only snapshot describing all entities on the grid.
    #[derive(Clone, Debug)]
    pub struct EntityView {
        snapshots: Vec<EntitySnapshot>,
    }

    impl EntityView {
        /// Iterator over the captured snapshots, in insertion order.
        pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<EntitySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single entity's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EntitySnapshot {
        /// Identifier of the entity.
        pub id: EntityId,
        /// Kind tag carried by the identifier.
        pub kind: EntityKind,
        /// Cell occupied by the entity.
        pub position: Position,
    }
}
