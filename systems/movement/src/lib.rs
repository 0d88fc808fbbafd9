#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure toroidal movement arithmetic shared by the Outbreak engine.

use outbreak_core::{Direction, GridSize, Position};

/// Advances a position one cell in the provided direction.
///
/// The unit offset is applied on signed coordinates and the result wraps
/// back onto the grid, so stepping off any edge re-enters from the opposite
/// edge. The direction enum is closed, which makes the step infallible.
#[must_use]
pub fn step(position: Position, direction: Direction, size: GridSize) -> Position {
    let (dx, dy) = direction.offset();
    Position::wrapped(
        i64::from(position.x()) + dx,
        i64::from(position.y()) + dy,
        size,
    )
}

#[cfg(test)]
mod tests {
    use super::step;
    use outbreak_core::{Direction, GridSize, Position};

    fn size(value: i64) -> GridSize {
        GridSize::new(value).expect("positive size")
    }

    #[test]
    fn steps_move_one_cell_in_each_direction() {
        let size = size(10);
        let origin = Position::new(4, 4);
        assert_eq!(step(origin, Direction::Up, size), Position::new(4, 3));
        assert_eq!(step(origin, Direction::Down, size), Position::new(4, 5));
        assert_eq!(step(origin, Direction::Left, size), Position::new(3, 4));
        assert_eq!(step(origin, Direction::Right, size), Position::new(5, 4));
    }

    #[test]
    fn steps_wrap_across_every_edge() {
        let size = size(5);
        assert_eq!(
            step(Position::new(2, 0), Direction::Up, size),
            Position::new(2, 4)
        );
        assert_eq!(
            step(Position::new(2, 4), Direction::Down, size),
            Position::new(2, 0)
        );
        assert_eq!(
            step(Position::new(0, 2), Direction::Left, size),
            Position::new(4, 2)
        );
        assert_eq!(
            step(Position::new(4, 2), Direction::Right, size),
            Position::new(0, 2)
        );
    }
}
