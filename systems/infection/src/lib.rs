#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Infection engine that replays the shared move sequence over a zombie queue.
//!
//! The engine drives the authoritative world through [`Command`] values and
//! relays the resulting [`Event`] stream to registered observers. Zombies are
//! processed strictly in spawn order: the queue is traversed by index while
//! infections append new zombies to the tail, which yields breadth-first
//! propagation of the outbreak.

use std::{cell::RefCell, rc::Rc};

use outbreak_core::{Command, Direction, Event, GameObserver, GridSize, Position, ZombieId};
use outbreak_world::{self as world, query, World};

/// Shared handle under which observers are registered with the engine.
pub type ObserverHandle = Rc<RefCell<dyn GameObserver>>;

/// Orchestrates a single outbreak simulation.
///
/// Owns the world, the FIFO zombie queue, the shared move sequence, and the
/// registered observers. Construct once per grid configuration, then call
/// [`Game::initialize`] followed by [`Game::run`] for each simulation;
/// `run` is not re-entrant without a fresh `initialize`.
pub struct Game {
    size: GridSize,
    world: World,
    moves: Vec<Direction>,
    queue: Vec<ZombieId>,
    observers: Vec<ObserverHandle>,
}

impl Game {
    /// Creates a new engine for the provided grid size and move sequence.
    ///
    /// The move sequence is shared read-only by every zombie in the queue;
    /// it is validated upstream and never changes during a run.
    #[must_use]
    pub fn new(size: GridSize, moves: Vec<Direction>) -> Self {
        Self {
            size,
            world: World::new(size),
            moves,
            queue: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer; events are dispatched in registration order.
    pub fn add_observer(&mut self, observer: ObserverHandle) {
        self.observers.push(observer);
    }

    /// Removes an observer by reference identity.
    ///
    /// Removing a handle that was never registered, or removing the same
    /// handle twice, is a no-op.
    pub fn remove_observer(&mut self, observer: &ObserverHandle) {
        self.observers
            .retain(|registered| !Rc::ptr_eq(registered, observer));
    }

    /// Seeds the world with one zombie and the provided creatures.
    ///
    /// Rebuilds the world from scratch, so identifier counters restart and
    /// any state from a previous run is discarded. Coordinates are taken as
    /// given; the engine does not re-validate them against the grid, and
    /// out-of-range seeds normalize on their first move.
    pub fn initialize(&mut self, zombie: Position, creatures: &[Position]) {
        self.world = World::new(self.size);
        self.queue.clear();

        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SpawnZombie { position: zombie },
            &mut events,
        );
        for &position in creatures {
            world::apply(
                &mut self.world,
                Command::SpawnCreature { position },
                &mut events,
            );
        }

        for event in &events {
            if let Event::ZombieSpawned { zombie, .. } = event {
                self.queue.push(*zombie);
            }
        }
    }

    /// Executes the whole simulation once.
    ///
    /// Drains the queue by index rather than by removal: zombies spawned by
    /// infections are appended to the tail and visited after every zombie
    /// queued before them. Each zombie replays the entire move sequence in
    /// order. Terminates by broadcasting a single end event carrying the
    /// final zombie positions (queue order) and the surviving creatures.
    pub fn run(&mut self) {
        let mut index = 0;
        while index < self.queue.len() {
            let zombie = self.queue[index];
            for move_index in 0..self.moves.len() {
                let direction = self.moves[move_index];
                let mut events = Vec::new();
                world::apply(
                    &mut self.world,
                    Command::StepZombie { zombie, direction },
                    &mut events,
                );

                for event in &events {
                    if let Event::CreatureInfected { zombie: spawned, .. } = event {
                        self.queue.push(*spawned);
                    }
                }
                for event in &events {
                    broadcast(&self.observers, event);
                }
            }
            index += 1;
        }

        let ended = Event::SimulationEnded {
            zombies: query::zombie_positions(&self.world),
            creatures: query::creature_positions(&self.world),
        };
        broadcast(&self.observers, &ended);
    }

    /// Read-only access to the world owned by the engine.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Zombie queue in processing order, including mid-run spawns.
    #[must_use]
    pub fn queue(&self) -> &[ZombieId] {
        &self.queue
    }
}

fn broadcast(observers: &[ObserverHandle], event: &Event) {
    for observer in observers {
        let mut observer = observer.borrow_mut();
        match event {
            Event::ZombieMoved {
                zombie,
                from,
                direction,
                to,
            } => observer.on_zombie_move(*zombie, *from, *direction, *to),
            Event::CreatureInfected { zombie, at } => observer.on_infection(*zombie, *at),
            Event::SimulationEnded { zombies, creatures } => {
                observer.on_simulation_end(zombies, creatures);
            }
            Event::ZombieSpawned { .. } | Event::CreatureSpawned { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, ObserverHandle};
    use outbreak_core::{Direction, GameObserver, GridSize, Position, ZombieId};
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct CountingObserver {
        moves: usize,
        infections: usize,
        ends: usize,
    }

    impl GameObserver for CountingObserver {
        fn on_zombie_move(
            &mut self,
            _zombie: ZombieId,
            _from: Position,
            _direction: Direction,
            _to: Position,
        ) {
            self.moves += 1;
        }

        fn on_infection(&mut self, _zombie: ZombieId, _at: Position) {
            self.infections += 1;
        }

        fn on_simulation_end(&mut self, _zombies: &[Position], _creatures: &[Position]) {
            self.ends += 1;
        }
    }

    fn size(value: i64) -> GridSize {
        GridSize::new(value).expect("positive size")
    }

    #[test]
    fn removing_an_unregistered_observer_is_a_no_op() {
        let mut game = Game::new(size(5), vec![Direction::Right]);
        let registered = Rc::new(RefCell::new(CountingObserver::default()));
        let registered_handle: ObserverHandle = registered.clone();
        let stranger: ObserverHandle = Rc::new(RefCell::new(CountingObserver::default()));

        game.add_observer(registered_handle.clone());
        game.remove_observer(&stranger);
        game.remove_observer(&registered_handle);
        game.remove_observer(&registered_handle);

        game.initialize(Position::new(0, 0), &[]);
        game.run();

        let observer = registered.borrow();
        assert_eq!(observer.moves, 0, "removed observers receive no events");
    }

    #[test]
    fn initialize_resets_the_queue_and_identifiers() {
        let mut game = Game::new(size(5), vec![Direction::Down]);
        game.initialize(Position::new(0, 0), &[Position::new(0, 1)]);
        game.run();
        assert_eq!(game.queue().len(), 2);

        game.initialize(Position::new(2, 2), &[]);
        assert_eq!(game.queue(), &[ZombieId::new(0)]);
        assert!(game.world().grid().entities().len() == 1);
    }

    #[test]
    fn empty_move_sequence_still_ends_the_simulation() {
        let mut game = Game::new(size(5), Vec::new());
        let observer = Rc::new(RefCell::new(CountingObserver::default()));
        game.add_observer(observer.clone());
        game.initialize(Position::new(1, 1), &[Position::new(2, 2)]);
        game.run();

        let observer = observer.borrow();
        assert_eq!(observer.moves, 0);
        assert_eq!(observer.infections, 0);
        assert_eq!(observer.ends, 1);
    }
}
