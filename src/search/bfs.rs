use std::collections::VecDeque;

use log::debug;

use super::{Budget, SearchResult};
use crate::{path::ParentMap, state::PuzzleState};

/// Breadth-first search. The returned path has the fewest possible moves.
///
/// `nodes_expanded` counts states taken off the queue, the goal included.
pub fn bfs(initial: &PuzzleState, goal: &PuzzleState, budget: &mut Budget) -> SearchResult {
    debug!("bfs from {:?} to {:?}", initial, goal);

    let mut queue = VecDeque::new();
    let mut parents = ParentMap::default();
    let mut expanded = 0;

    queue.push_back((*initial, 0));
    parents.insert(*initial, None);

    while let Some((current, depth)) = queue.pop_front() {
        if !budget.charge() {
            return SearchResult::failed(expanded, 0, budget);
        }
        expanded += 1;

        if current == *goal {
            debug!("bfs solved at depth {} after {} expansions", depth, expanded);
            return SearchResult::found(&parents, goal, expanded, depth);
        }

        for (_, next) in current.successors() {
            // a state is in `parents` as soon as it has been queued
            if parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, Some(current));
            queue.push_back((next, depth + 1));
        }
    }

    debug!("bfs exhausted the space after {} expansions", expanded);
    SearchResult::failed(expanded, 0, budget)
}
