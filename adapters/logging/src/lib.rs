#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Transcript logging observer for the Outbreak engine.
//!
//! Reference [`GameObserver`] implementation that accumulates human-readable
//! lines describing a run and mirrors the end-of-run summary to standard
//! output. The logger is an explicitly constructed component passed to the
//! engine by the caller; it carries no global state, and [`clear`] resets it
//! between runs.
//!
//! [`clear`]: TranscriptLogger::clear

use outbreak_core::{Direction, GameObserver, Position, ZombieId};

/// Accumulates formatted transcript lines for one or more simulation runs.
#[derive(Debug, Default)]
pub struct TranscriptLogger {
    lines: Vec<String>,
    mirror_to_stdout: bool,
}

impl TranscriptLogger {
    /// Creates a logger that prints the end-of-run summary to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            mirror_to_stdout: true,
        }
    }

    /// Creates a logger that only accumulates lines, for use in tests.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            lines: Vec::new(),
            mirror_to_stdout: false,
        }
    }

    /// Transcript lines accumulated so far, in event order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Discards all accumulated lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn record(&mut self, line: String, mirror: bool) {
        if mirror && self.mirror_to_stdout {
            println!("{line}");
        }
        self.lines.push(line);
    }
}

impl GameObserver for TranscriptLogger {
    fn on_zombie_move(
        &mut self,
        zombie: ZombieId,
        from: Position,
        direction: Direction,
        to: Position,
    ) {
        let line = format!("Zombie {zombie} from {from} moved {direction} to {to}.");
        self.record(line, false);
    }

    fn on_infection(&mut self, zombie: ZombieId, at: Position) {
        let line = format!("Zombie {zombie} infected creature at {at}.");
        self.record(line, false);
    }

    fn on_simulation_end(&mut self, zombies: &[Position], creatures: &[Position]) {
        let zombie_summary = format!("zombies' positions:\n{}", join(zombies, " "));
        let creature_summary = format!("creatures' positions:\n{}", join(creatures, ", "));
        self.record(zombie_summary, true);
        self.record(creature_summary, true);
    }
}

fn join(positions: &[Position], separator: &str) -> String {
    if positions.is_empty() {
        return "none".to_owned();
    }
    positions
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::TranscriptLogger;
    use outbreak_core::{Direction, GameObserver, Position, ZombieId};

    #[test]
    fn records_move_lines_with_direction_labels() {
        let mut logger = TranscriptLogger::quiet();
        logger.on_zombie_move(
            ZombieId::new(0),
            Position::new(0, 0),
            Direction::Down,
            Position::new(0, 1),
        );

        assert_eq!(
            logger.lines(),
            ["Zombie zombie-0 from (0, 0) moved down to (0, 1)."]
        );
    }

    #[test]
    fn records_infection_lines_with_the_new_zombie() {
        let mut logger = TranscriptLogger::quiet();
        logger.on_infection(ZombieId::new(2), Position::new(3, 1));

        assert_eq!(
            logger.lines(),
            ["Zombie zombie-2 infected creature at (3, 1)."]
        );
    }

    #[test]
    fn end_summary_uses_distinct_separators_per_kind() {
        let mut logger = TranscriptLogger::quiet();
        logger.on_simulation_end(
            &[Position::new(1, 1), Position::new(2, 2)],
            &[Position::new(4, 4), Position::new(5, 5)],
        );

        assert_eq!(
            logger.lines(),
            [
                "zombies' positions:\n(1, 1) (2, 2)",
                "creatures' positions:\n(4, 4), (5, 5)",
            ]
        );
    }

    #[test]
    fn end_summary_reports_none_for_empty_lists() {
        let mut logger = TranscriptLogger::quiet();
        logger.on_simulation_end(&[], &[]);

        assert_eq!(
            logger.lines(),
            ["zombies' positions:\nnone", "creatures' positions:\nnone"]
        );
    }

    #[test]
    fn clear_discards_accumulated_lines() {
        let mut logger = TranscriptLogger::quiet();
        logger.on_infection(ZombieId::new(0), Position::new(0, 0));
        logger.clear();

        assert!(logger.lines().is_empty());
        logger.on_infection(ZombieId::new(1), Position::new(1, 1));
        assert_eq!(logger.lines().len(), 1);
    }
}
