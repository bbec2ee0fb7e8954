use std::{cmp::Ordering, collections::BinaryHeap};

use fnv::{FnvHashMap, FnvHashSet};
use log::debug;

use super::{Budget, SearchResult};
use crate::{heuristic::Heuristic, path::ParentMap, state::PuzzleState};

/// Frontier entry. Ordered so that `BinaryHeap` pops the lowest `f` first,
/// and among equal `f` the entry that was pushed first.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    f: f64,
    seq: u64,
    g: usize,
    state: PuzzleState,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A* ordered by `g + h`.
///
/// States can be pushed again whenever a cheaper path to them turns up;
/// outdated heap entries are skipped when popped. The goal is tested on pop,
/// so the path is optimal for an admissible, consistent heuristic.
pub fn astar(
    initial: &PuzzleState,
    goal: &PuzzleState,
    heuristic: Heuristic,
    budget: &mut Budget,
) -> SearchResult {
    debug!("astar ({}) from {:?} to {:?}", heuristic, initial, goal);

    let mut open = BinaryHeap::new();
    let mut best_g: FnvHashMap<PuzzleState, usize> = FnvHashMap::default();
    let mut parents = ParentMap::default();
    let mut closed = FnvHashSet::default();
    let mut seq = 0;

    best_g.insert(*initial, 0);
    parents.insert(*initial, None);
    open.push(SearchNode {
        f: heuristic.estimate(initial, goal),
        seq,
        g: 0,
        state: *initial,
    });

    while let Some(SearchNode { g, state, .. }) = open.pop() {
        if g > best_g[&state] {
            continue;
        }
        if !budget.charge() {
            return SearchResult::failed(closed.len(), 0, budget);
        }
        closed.insert(state);

        if state == *goal {
            debug!("astar solved at cost {} after {} expansions", g, closed.len());
            return SearchResult::found(&parents, goal, closed.len(), g);
        }

        for (_, next) in state.successors() {
            if closed.contains(&next) {
                continue;
            }
            let next_g = g + 1;
            if best_g.get(&next).map_or(true, |&known| next_g < known) {
                best_g.insert(next, next_g);
                parents.insert(next, Some(state));
                seq += 1;
                open.push(SearchNode {
                    f: next_g as f64 + heuristic.estimate(&next, goal),
                    seq,
                    g: next_g,
                    state: next,
                });
            }
        }
    }

    debug!("astar exhausted the space after {} expansions", closed.len());
    SearchResult::failed(closed.len(), 0, budget)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::state::Move;

    fn run(initial: &str, heuristic: Heuristic) -> SearchResult {
        astar(
            &initial.parse().unwrap(),
            &PuzzleState::goal(),
            heuristic,
            &mut Budget::unlimited(),
        )
    }

    fn node(f: f64, seq: u64) -> SearchNode {
        SearchNode {
            f,
            seq,
            g: 0,
            state: PuzzleState::goal(),
        }
    }

    #[test]
    fn heap_pops_lowest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(node(3.0, 0));
        heap.push(node(2.0, 2));
        heap.push(node(2.0, 1));
        heap.push(node(2.5, 3));
        let order: Vec<(f64, u64)> = std::iter::from_fn(|| heap.pop())
            .map(|n| (n.f, n.seq))
            .collect();
        assert_eq!(order, vec![(2.0, 1), (2.0, 2), (2.5, 3), (3.0, 0)]);
    }

    #[test]
    fn one_move_from_goal() {
        for heuristic in Heuristic::ALL {
            let result = run("312045678", heuristic);
            assert_eq!(result.move_path, vec![Move::Up]);
            assert_eq!(result.cost, 1);
            assert_eq!(result.nodes_expanded, 2);
        }
    }

    #[test]
    fn optimal_on_known_fixtures() {
        for (initial, optimum, manhattan_expanded, euclidean_expanded) in [
            ("125340678", 3, 4, 4),
            ("182043765", 21, 1147, 1437),
            ("724506831", 26, 3978, 6690),
            ("806547231", 31, 20291, 39059),
        ] {
            let m = run(initial, Heuristic::Manhattan);
            assert_eq!(m.cost, optimum, "{}", initial);
            assert_eq!(m.depth, optimum, "{}", initial);
            assert_eq!(m.nodes_expanded, manhattan_expanded, "{}", initial);

            let e = run(initial, Heuristic::Euclidean);
            assert_eq!(e.cost, optimum, "{}", initial);
            assert_eq!(e.nodes_expanded, euclidean_expanded, "{}", initial);
        }
    }

    #[test]
    fn unsolvable_exhausts_reachable_half() {
        let result = run("142658037", Heuristic::Manhattan);
        assert!(!result.is_solved());
        assert_eq!(result.nodes_expanded, 181_440);
    }
}
