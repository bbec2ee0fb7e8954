//! State-space search for the 3x3 sliding-tile puzzle.
//!
//! [`solve`] runs one of four strategies from an initial arrangement to a
//! goal arrangement and returns the state path, the blank moves and search
//! statistics:
//!
//! - [`Strategy::Bfs`]: breadth-first, optimal.
//! - [`Strategy::Dfs`]: exhaustive depth-first, finds *a* path.
//! - [`Strategy::Ids`]: iterative deepening, optimal with depth-first memory.
//! - [`Strategy::AStar`]: best-first on `g + h`, optimal with either
//!   [`Heuristic`].
//!
//! The engine trusts its caller to only ask for solvable pairs; see
//! [`PuzzleState::is_solvable_to`]. An unsolvable pair is searched until the
//! reachable space (or the depth ceiling) runs out and then reported as an
//! empty path.

use std::{fmt, str::FromStr};

pub mod error;
pub mod heuristic;
pub mod path;
pub mod search;
pub mod state;

pub use error::{Error, Result};
pub use heuristic::Heuristic;
pub use search::{Budget, SearchResult};
pub use state::{Move, PuzzleState};

use search::{astar::astar, bfs::bfs, dfs::dfs, ids::ids};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ids,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ids,
        Strategy::AStar,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Ids => "ids",
            Strategy::AStar => "astar",
        })
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Strategy> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "ids" | "iddfs" => Ok(Strategy::Ids),
            "astar" | "a*" => Ok(Strategy::AStar),
            _ => Err(Error::UnknownStrategy { name: s.to_owned() }),
        }
    }
}

/// Everything that selects and bounds a single search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// Only read by A*. `None` means Manhattan.
    pub heuristic: Option<Heuristic>,
    /// Stop after this many expansions. `None` means no limit.
    pub max_expansions: Option<usize>,
    /// Largest depth limit IDS tries.
    pub depth_ceiling: usize,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            strategy: Strategy::AStar,
            heuristic: None,
            max_expansions: None,
            depth_ceiling: search::ids::DEFAULT_DEPTH_CEILING,
        }
    }
}

/// Runs `strategy` without an expansion budget.
pub fn solve(
    strategy: Strategy,
    initial: &PuzzleState,
    goal: &PuzzleState,
    heuristic: Option<Heuristic>,
) -> SearchResult {
    let config = SolverConfig {
        strategy,
        heuristic,
        ..SolverConfig::default()
    };
    solve_with(&config, initial, goal)
}

pub fn solve_with(
    config: &SolverConfig,
    initial: &PuzzleState,
    goal: &PuzzleState,
) -> SearchResult {
    let mut budget = Budget::new(config.max_expansions);
    match config.strategy {
        Strategy::Bfs => bfs(initial, goal, &mut budget),
        Strategy::Dfs => dfs(initial, goal, &mut budget),
        Strategy::Ids => ids(initial, goal, config.depth_ceiling, &mut budget),
        Strategy::AStar => astar(
            initial,
            goal,
            config.heuristic.unwrap_or_default(),
            &mut budget,
        ),
    }
}
