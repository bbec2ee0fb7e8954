use fnv::FnvHashMap;
use itertools::Itertools;

use crate::state::{Move, PuzzleState};

/// Links every reached state to the state it was reached from. The start
/// maps to `None`.
pub type ParentMap = FnvHashMap<PuzzleState, Option<PuzzleState>>;

/// Walks parent links back from `goal` and returns the states in start-to-goal
/// order together with the blank move between each consecutive pair.
///
/// # Panics
/// Panics if a state on the walk has no parent entry. Searches record a
/// parent for every state before it can be reached, so this is a bug.
pub fn reconstruct(parents: &ParentMap, goal: &PuzzleState) -> (Vec<PuzzleState>, Vec<Move>) {
    let mut states = vec![*goal];
    let mut key = parents[goal];
    while let Some(state) = key {
        states.push(state);
        key = parents[&state];
    }
    states.reverse();

    let moves = states
        .iter()
        .tuple_windows()
        .map(|(from, to)| match Move::between(from, to) {
            Some(m) => m,
            None => unreachable!("parent {:?} is not adjacent to {:?}", from, to),
        })
        .collect();

    (states, moves)
}
