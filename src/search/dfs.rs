use fnv::{FnvHashMap, FnvHashSet};
use log::debug;

use super::{Budget, SearchResult};
use crate::{path::ParentMap, state::PuzzleState};

/// Unbounded depth-first search over the whole reachable space.
///
/// Follows the most recently discovered state first, so the path it returns
/// is usually far longer than the optimum. `depth` reports the deepest state
/// expanded, which need not be on the returned path.
pub fn dfs(initial: &PuzzleState, goal: &PuzzleState, budget: &mut Budget) -> SearchResult {
    debug!("dfs from {:?} to {:?}", initial, goal);

    let mut stack = vec![*initial];
    let mut parents = ParentMap::default();
    let mut depths = FnvHashMap::default();
    let mut explored = FnvHashSet::default();
    let mut max_depth = 0;

    parents.insert(*initial, None);
    depths.insert(*initial, 0);

    while let Some(current) = stack.pop() {
        if explored.contains(&current) {
            continue;
        }
        if !budget.charge() {
            return SearchResult::failed(explored.len(), max_depth, budget);
        }
        explored.insert(current);

        let depth = depths[&current];
        max_depth = max_depth.max(depth);

        if current == *goal {
            debug!(
                "dfs solved after {} expansions, max depth {}",
                explored.len(),
                max_depth
            );
            return SearchResult::found(&parents, goal, explored.len(), max_depth);
        }

        for (_, next) in current.successors() {
            // anything already explored also has a parent entry
            if parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, Some(current));
            depths.insert(next, depth + 1);
            stack.push(next);
        }
    }

    debug!("dfs exhausted the space after {} expansions", explored.len());
    SearchResult::failed(explored.len(), max_depth, budget)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::state::Move;

    fn run(initial: &str) -> SearchResult {
        dfs(
            &initial.parse().unwrap(),
            &PuzzleState::goal(),
            &mut Budget::unlimited(),
        )
    }

    #[test]
    fn already_at_goal() {
        let result = run("012345678");
        assert_eq!(result.state_path.len(), 1);
        assert_eq!(result.cost, 0);
        assert_eq!(result.nodes_expanded, 1);
    }

    #[test]
    fn parent_is_fixed_at_discovery() {
        // the goal is discovered from the start but Right is popped first, so
        // almost the whole space is explored before the goal comes off the
        // stack; its recorded parent is still the start
        let result = run("102345678");
        assert_eq!(result.move_path, vec![Move::Left]);
        assert_eq!(result.cost, 1);
        assert_eq!(result.nodes_expanded, 181_439);
        assert_eq!(result.depth, 66125);
    }

    #[test]
    fn paths_are_valid_but_long() {
        let result = run("312645078");
        assert!(result.is_solved());
        assert_eq!(result.cost, 64328);
        assert_eq!(result.nodes_expanded, 84897);
        assert_eq!(result.depth, 64331);
        assert_eq!(result.move_path.len(), result.state_path.len() - 1);
        for (pair, m) in result.state_path.windows(2).zip(&result.move_path) {
            assert_eq!(pair[0].apply(*m), Some(pair[1]));
        }
    }

    #[test]
    fn unsolvable_terminates() {
        let result = run("142658037");
        assert!(!result.is_solved());
        assert_eq!(result.nodes_expanded, 181_440);
        assert_eq!(result.depth, 65982);
    }
}
