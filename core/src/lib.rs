#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Outbreak simulation engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the infection engine. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point and broadcasts [`Event`] values, and the engine
//! relays those events to registered [`GameObserver`] implementations in
//! registration order.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the simulator boots.
pub const WELCOME_BANNER: &str = "Welcome to the Outbreak simulator.";

/// Side length of the square toroidal grid, guaranteed positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize(u32);

impl GridSize {
    /// Validates the provided value as a grid dimension.
    ///
    /// Fails with [`InvalidGridSize`] for zero, negative values, and values
    /// that do not fit the cell coordinate range.
    pub fn new(value: i64) -> Result<Self, InvalidGridSize> {
        if value <= 0 {
            return Err(InvalidGridSize { value });
        }
        match u32::try_from(value) {
            Ok(size) => Ok(Self(size)),
            Err(_) => Err(InvalidGridSize { value }),
        }
    }

    /// Retrieves the numeric side length.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Error raised when a grid dimension is not a positive integer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("grid size must be a positive integer, got {value}")]
pub struct InvalidGridSize {
    /// Rejected dimension value.
    pub value: i64,
}

/// Location of a single grid cell expressed as x and y coordinates.
///
/// Values are immutable; movement produces a new `Position` rather than
/// mutating an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new position from non-negative coordinates.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical coordinate of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Normalizes arbitrary integer coordinates onto the toroidal grid.
    ///
    /// Both axes apply Euclidean modulo, so negative inputs wrap to the far
    /// edge and the result always lands in `[0, size)`.
    #[must_use]
    pub fn wrapped(x: i64, y: i64, size: GridSize) -> Self {
        let modulus = i64::from(size.get());
        Self {
            x: x.rem_euclid(modulus) as u32,
            y: y.rem_euclid(modulus) as u32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions available to zombies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing y coordinates.
    Up,
    /// Movement toward increasing y coordinates.
    Down,
    /// Movement toward decreasing x coordinates.
    Left,
    /// Movement toward increasing x coordinates.
    Right,
}

impl Direction {
    /// Single-character token used by the textual move grammar.
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Lowercase word used in transcript lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Unit step applied to a position when moving in this direction.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = InvalidDirection;

    fn try_from(token: char) -> Result<Self, Self::Error> {
        match token {
            'U' => Ok(Self::Up),
            'D' => Ok(Self::Down),
            'L' => Ok(Self::Left),
            'R' => Ok(Self::Right),
            other => Err(InvalidDirection { token: other }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error raised when a move token falls outside the direction alphabet.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("invalid direction '{token}', expected one of U, D, L, R")]
pub struct InvalidDirection {
    /// Rejected move token.
    pub token: char,
}

/// Unique identifier assigned to a zombie, in spawn order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ZombieId(u32);

impl ZombieId {
    /// Creates a new zombie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric spawn index of the zombie.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ZombieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zombie-{}", self.0)
    }
}

/// Unique identifier assigned to a creature, in seeding order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CreatureId(u32);

impl CreatureId {
    /// Creates a new creature identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric seeding index of the creature.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "creature-{}", self.0)
    }
}

/// Identifier for any entity tracked by the grid.
///
/// The variant doubles as the entity's kind discriminator; only these two
/// kinds ever exist.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum EntityId {
    /// A zombie driven by the shared move sequence.
    Zombie(ZombieId),
    /// A passive creature awaiting infection.
    Creature(CreatureId),
}

impl EntityId {
    /// Kind tag carried by the identifier.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Zombie(_) => EntityKind::Zombie,
            Self::Creature(_) => EntityKind::Creature,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zombie(id) => id.fmt(f),
            Self::Creature(id) => id.fmt(f),
        }
    }
}

/// Closed set of entity kinds inhabiting the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Active entity that replays the move sequence.
    Zombie,
    /// Passive occupant that converts on contact.
    Creature,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that a new zombie be seeded at the provided position.
    SpawnZombie {
        /// Cell the zombie initially occupies.
        position: Position,
    },
    /// Requests that a new creature be seeded at the provided position.
    SpawnCreature {
        /// Cell the creature initially occupies.
        position: Position,
    },
    /// Requests that a zombie advance one step in the specified direction.
    StepZombie {
        /// Identifier of the zombie attempting to move.
        zombie: ZombieId,
        /// Direction of travel for the step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a zombie was seeded into the grid.
    ZombieSpawned {
        /// Identifier assigned to the zombie.
        zombie: ZombieId,
        /// Cell the zombie occupies after spawning.
        position: Position,
    },
    /// Confirms that a creature was seeded into the grid.
    CreatureSpawned {
        /// Identifier assigned to the creature.
        creature: CreatureId,
        /// Cell the creature occupies after spawning.
        position: Position,
    },
    /// Confirms that a zombie attempted a step between two cells.
    ///
    /// Emitted for every step in the move sequence, before any infection
    /// triggered by the same step.
    ZombieMoved {
        /// Identifier of the zombie that moved.
        zombie: ZombieId,
        /// Cell the zombie occupied before the step.
        from: Position,
        /// Direction applied by the step.
        direction: Direction,
        /// Cell the zombie occupies after the step wraps onto the grid.
        to: Position,
    },
    /// Announces that a creature was consumed and replaced by a new zombie.
    CreatureInfected {
        /// Identifier of the newly spawned zombie.
        zombie: ZombieId,
        /// Cell where the infection occurred.
        at: Position,
    },
    /// Reports the final positions once every queued zombie has moved.
    SimulationEnded {
        /// Final position of every zombie, in queue order.
        zombies: Vec<Position>,
        /// Position of every surviving creature, in seeding order.
        creatures: Vec<Position>,
    },
}

/// Capability consumed by the infection engine to report progress.
///
/// The engine invokes each registered observer synchronously, in
/// registration order, for every event of a run.
pub trait GameObserver {
    /// A zombie attempted a step; fires for every move regardless of outcome.
    fn on_zombie_move(
        &mut self,
        zombie: ZombieId,
        from: Position,
        direction: Direction,
        to: Position,
    );

    /// A creature was consumed; `zombie` identifies the newly spawned zombie.
    fn on_infection(&mut self, zombie: ZombieId, at: Position);

    /// The queue drained; carries final zombie and surviving creature positions.
    fn on_simulation_end(&mut self, zombies: &[Position], creatures: &[Position]);
}

#[cfg(test)]
mod tests {
    use super::{
        CreatureId, Direction, EntityId, EntityKind, Event, GridSize, Position, ZombieId,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn grid_size_rejects_non_positive_values() {
        assert!(GridSize::new(0).is_err());
        assert!(GridSize::new(-4).is_err());
        let error = GridSize::new(-4).expect_err("negative size");
        assert_eq!(error.value, -4);
    }

    #[test]
    fn grid_size_accepts_positive_values() {
        let size = GridSize::new(10).expect("positive size");
        assert_eq!(size.get(), 10);
    }

    #[test]
    fn wrapped_lands_inside_the_grid_for_any_input() {
        let size = GridSize::new(7).expect("positive size");
        for x in -30_i64..30 {
            for y in -30_i64..30 {
                let position = Position::wrapped(x, y, size);
                assert!(position.x() < size.get());
                assert!(position.y() < size.get());
            }
        }
    }

    #[test]
    fn wrapped_is_periodic_in_the_grid_size() {
        let size = GridSize::new(9).expect("positive size");
        for k in -4_i64..=4 {
            assert_eq!(
                Position::wrapped(2 + k * 9, 5, size),
                Position::wrapped(2, 5, size)
            );
            assert_eq!(
                Position::wrapped(2, 5 + k * 9, size),
                Position::wrapped(2, 5, size)
            );
        }
    }

    #[test]
    fn wrapped_normalizes_negative_coordinates() {
        let size = GridSize::new(10).expect("positive size");
        assert_eq!(Position::wrapped(-1, -1, size), Position::new(9, 9));
        assert_eq!(Position::wrapped(-11, 3, size), Position::new(9, 3));
    }

    #[test]
    fn position_displays_with_parentheses() {
        assert_eq!(Position::new(3, 1).to_string(), "(3, 1)");
    }

    #[test]
    fn direction_parses_from_tokens() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(Direction::try_from(direction.token()), Ok(direction));
        }
    }

    #[test]
    fn direction_rejects_tokens_outside_the_alphabet() {
        let error = Direction::try_from('X').expect_err("unknown token");
        assert_eq!(error.token, 'X');
        assert!(Direction::try_from('u').is_err(), "tokens are uppercase");
    }

    #[test]
    fn identifiers_display_with_kind_prefixes() {
        assert_eq!(ZombieId::new(0).to_string(), "zombie-0");
        assert_eq!(CreatureId::new(3).to_string(), "creature-3");
        assert_eq!(EntityId::Zombie(ZombieId::new(2)).to_string(), "zombie-2");
    }

    #[test]
    fn entity_id_reports_its_kind() {
        assert_eq!(
            EntityId::Zombie(ZombieId::new(1)).kind(),
            EntityKind::Zombie
        );
        assert_eq!(
            EntityId::Creature(CreatureId::new(1)).kind(),
            EntityKind::Creature
        );
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn position_round_trips_through_bincode() {
        assert_round_trip(&Position::new(4, 7));
    }

    #[test]
    fn entity_id_round_trips_through_bincode() {
        assert_round_trip(&EntityId::Creature(CreatureId::new(9)));
    }

    #[test]
    fn event_round_trips_through_bincode() {
        let event = Event::ZombieMoved {
            zombie: ZombieId::new(1),
            from: Position::new(0, 0),
            direction: Direction::Down,
            to: Position::new(0, 1),
        };
        assert_round_trip(&event);
    }
}
