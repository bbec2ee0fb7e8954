//! The four search strategies.
//!
//! Every strategy builds its own frontier, visited set and parent map inside
//! the call and drops them before returning, so runs never share state.

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod ids;

use log::debug;

use crate::{
    path::{reconstruct, ParentMap},
    state::{Move, PuzzleState},
};

/// What a search run reports back.
///
/// An empty `state_path` means no solution was found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    /// States from the initial state to the goal, both included.
    pub state_path: Vec<PuzzleState>,
    /// Blank moves, one fewer than `state_path`.
    pub move_path: Vec<Move>,
    /// Number of moves on the returned path.
    pub cost: usize,
    pub nodes_expanded: usize,
    pub depth: usize,
    /// Set when the run stopped because it hit its expansion budget rather
    /// than because the reachable space was exhausted.
    pub budget_exhausted: bool,
}

impl SearchResult {
    pub(crate) fn found(
        parents: &ParentMap,
        goal: &PuzzleState,
        nodes_expanded: usize,
        depth: usize,
    ) -> SearchResult {
        let (state_path, move_path) = reconstruct(parents, goal);
        SearchResult {
            cost: move_path.len(),
            state_path,
            move_path,
            nodes_expanded,
            depth,
            budget_exhausted: false,
        }
    }

    pub(crate) fn failed(nodes_expanded: usize, depth: usize, budget: &Budget) -> SearchResult {
        SearchResult {
            nodes_expanded,
            depth,
            budget_exhausted: budget.is_exhausted(),
            ..SearchResult::default()
        }
    }

    pub fn is_solved(&self) -> bool {
        !self.state_path.is_empty()
    }
}

/// Cap on the number of expansions a single run may perform.
#[derive(Debug, Clone)]
pub struct Budget {
    limit: Option<usize>,
    spent: usize,
    exhausted: bool,
}

impl Budget {
    pub fn new(limit: Option<usize>) -> Budget {
        Budget {
            limit,
            spent: 0,
            exhausted: false,
        }
    }

    pub fn unlimited() -> Budget {
        Budget::new(None)
    }

    /// Records one expansion. Returns `false` once the limit has been used up,
    /// in which case the caller must stop searching.
    pub fn charge(&mut self) -> bool {
        if let Some(limit) = self.limit {
            if self.spent >= limit {
                if !self.exhausted {
                    debug!("expansion budget of {} exhausted", limit);
                }
                self.exhausted = true;
                return false;
            }
        }
        self.spent += 1;
        true
    }

    pub fn spent(&self) -> usize {
        self.spent
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
