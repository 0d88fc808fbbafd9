//! Parsing and validation of the textual simulation inputs.
//!
//! The engine consumes already-validated values; everything the user types
//! is funnelled through this module first. Positions use the form `(x,y)`
//! with optional whitespace, position lists are parenthesis-adjacent
//! (`(x1,y1)(x2,y2)`), and moves are an unseparated run of direction tokens.
//! Coordinates are not range-checked against the grid: the toroidal wrap
//! normalizes out-of-range seeds on their first move.

use outbreak_core::{Direction, GridSize, InvalidDirection, InvalidGridSize, Position};
use thiserror::Error;

/// Errors raised while validating user-supplied simulation inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The grid dimension was not an integer.
    #[error("grid size must be a positive integer, got '{0}'")]
    MalformedGridSize(String),
    /// The grid dimension was an integer outside the accepted range.
    #[error(transparent)]
    InvalidGridSize(#[from] InvalidGridSize),
    /// The move list was empty after trimming.
    #[error("the move list must contain at least one of U, D, L, R")]
    EmptyMoves,
    /// A move token fell outside the direction alphabet.
    #[error(transparent)]
    InvalidDirection(#[from] InvalidDirection),
    /// A position did not use the `(x,y)` form.
    #[error("position must use the form (x,y), got '{0}'")]
    MalformedPosition(String),
    /// A coordinate was not a non-negative integer.
    #[error("coordinates must be non-negative integers, got '{0}'")]
    InvalidCoordinate(String),
    /// A position list did not use the `(x1,y1)(x2,y2)` form.
    #[error("position list must use the form (x1,y1)(x2,y2), got '{0}'")]
    MalformedPositionList(String),
}

/// Parses a grid dimension, accepting only positive integers.
pub(crate) fn parse_grid_size(input: &str) -> Result<GridSize, InputError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::MalformedGridSize(trimmed.to_owned()))?;
    Ok(GridSize::new(value)?)
}

/// Parses a non-empty run of direction tokens such as `DRDR`.
pub(crate) fn parse_moves(input: &str) -> Result<Vec<Direction>, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyMoves);
    }
    trimmed
        .chars()
        .map(|token| Ok(Direction::try_from(token)?))
        .collect()
}

/// Parses a single position of the form `(x,y)`, tolerating whitespace.
pub(crate) fn parse_position(input: &str) -> Result<Position, InputError> {
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| InputError::MalformedPosition(trimmed.to_owned()))?;
    parse_pair(inner).ok_or_else(|| InputError::MalformedPosition(trimmed.to_owned()))?
}

/// Parses a parenthesis-adjacent position list such as `(3,1)(2,2)`.
///
/// Whitespace is tolerated anywhere; an empty input yields an empty list,
/// since creatures are optional. Duplicate positions pass through.
pub(crate) fn parse_position_list(input: &str) -> Result<Vec<Position>, InputError> {
    let compact: String = input.split_whitespace().collect();
    if compact.is_empty() {
        return Ok(Vec::new());
    }

    let malformed = || InputError::MalformedPositionList(input.trim().to_owned());
    let inner = compact
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    inner
        .split(")(")
        .map(|pair| parse_pair(pair).ok_or_else(malformed)?)
        .collect()
}

/// Splits `x,y` into coordinates; `None` marks a malformed pair, `Some(Err)`
/// a pair whose coordinates failed to parse.
fn parse_pair(pair: &str) -> Option<Result<Position, InputError>> {
    let (x, y) = pair.split_once(',')?;
    if y.contains(',') {
        return None;
    }
    Some(match (parse_coordinate(x), parse_coordinate(y)) {
        (Ok(x), Ok(y)) => Ok(Position::new(x, y)),
        (Err(error), _) | (_, Err(error)) => Err(error),
    })
}

fn parse_coordinate(text: &str) -> Result<u32, InputError> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| InputError::InvalidCoordinate(trimmed.to_owned()))
}
