use fnv::{FnvHashMap, FnvHashSet};
use log::{debug, trace};

use super::{Budget, SearchResult};
use crate::{path::ParentMap, state::PuzzleState};

/// Default ceiling on the depth limit. The hardest 8-puzzle needs 31 moves.
pub const DEFAULT_DEPTH_CEILING: usize = 40;

enum Limited {
    Found(ParentMap),
    Cutoff { max_depth: usize },
    OutOfBudget { max_depth: usize },
}

/// Iterative-deepening depth-first search with limits `1..=ceiling`.
///
/// Optimal in moves, like BFS. `nodes_expanded` is the number of distinct
/// states expanded over all iterations.
pub fn ids(
    initial: &PuzzleState,
    goal: &PuzzleState,
    ceiling: usize,
    budget: &mut Budget,
) -> SearchResult {
    debug!("ids from {:?} to {:?}, ceiling {}", initial, goal, ceiling);

    let mut all_expanded = FnvHashSet::default();
    let mut last_max_depth = 0;

    for limit in 1..=ceiling {
        let mut expanded = FnvHashSet::default();
        let outcome = depth_limited(initial, goal, limit, &mut expanded, budget);
        all_expanded.extend(expanded);

        match outcome {
            Limited::Found(parents) => {
                let result = SearchResult::found(&parents, goal, all_expanded.len(), 0);
                debug!(
                    "ids solved at limit {} after {} distinct expansions",
                    limit,
                    all_expanded.len()
                );
                return SearchResult {
                    depth: result.cost,
                    ..result
                };
            }
            Limited::Cutoff { max_depth } => {
                trace!(
                    "ids limit {} exhausted, {} distinct states so far",
                    limit,
                    all_expanded.len()
                );
                last_max_depth = max_depth;
            }
            Limited::OutOfBudget { max_depth } => {
                return SearchResult::failed(all_expanded.len(), max_depth, budget);
            }
        }
    }

    debug!("ids reached ceiling {} without a solution", ceiling);
    SearchResult::failed(all_expanded.len(), last_max_depth, budget)
}

// A state is expanded again when it is reached at a strictly shallower depth
// than before, since the shallower copy may reach states the deeper copy was
// cut off from.
fn depth_limited(
    initial: &PuzzleState,
    goal: &PuzzleState,
    limit: usize,
    expanded: &mut FnvHashSet<PuzzleState>,
    budget: &mut Budget,
) -> Limited {
    let mut stack: Vec<(PuzzleState, usize, Option<PuzzleState>)> = vec![(*initial, 0, None)];
    // shallowest depth each state was accepted at, and the parent it came from
    let mut seen: FnvHashMap<PuzzleState, (usize, Option<PuzzleState>)> = FnvHashMap::default();
    let mut max_depth = 0;

    while let Some((current, depth, parent)) = stack.pop() {
        if matches!(seen.get(&current), Some(&(d, _)) if d <= depth) {
            continue;
        }
        if !budget.charge() {
            return Limited::OutOfBudget { max_depth };
        }
        seen.insert(current, (depth, parent));
        expanded.insert(current);
        max_depth = max_depth.max(depth);

        if current == *goal {
            let parents = seen.into_iter().map(|(s, (_, p))| (s, p)).collect();
            return Limited::Found(parents);
        }

        if depth >= limit {
            continue;
        }

        for (_, next) in current.successors() {
            if matches!(seen.get(&next), Some(&(d, _)) if d <= depth + 1) {
                continue;
            }
            stack.push((next, depth + 1, Some(current)));
        }
    }

    Limited::Cutoff { max_depth }
}
