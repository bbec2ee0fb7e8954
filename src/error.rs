//! Error types for the eight-puzzle crate

use thiserror::Error;

/// Errors raised while building puzzle states or parsing solver options.
///
/// Failing to find a solution is not an error: searches report it through an
/// empty [`crate::SearchResult::state_path`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("expected 9 tiles, found {found}")]
    WrongTileCount { found: usize },

    #[error("tile {tile} is out of range (tiles are 0-8)")]
    TileOutOfRange { tile: u8 },

    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u8 },

    #[error("invalid character '{character}' in puzzle description")]
    InvalidDigit { character: char },

    #[error("unknown strategy '{name}' (expected bfs, dfs, ids or astar)")]
    UnknownStrategy { name: String },

    #[error("unknown heuristic '{name}' (expected manhattan or euclidean)")]
    UnknownHeuristic { name: String },

    #[error("the goal cannot be reached from {initial}: permutation parities differ")]
    Unsolvable { initial: String },
}

pub type Result<T> = std::result::Result<T, Error>;
