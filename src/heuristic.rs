//! Distance estimates used to order the A* frontier.
//!
//! Both estimates only look at where each non-blank tile sits in `state`
//! compared to `goal`, so they never overestimate the number of moves left.

use std::{fmt, str::FromStr};

use crate::{
    error::{Error, Result},
    state::{coords, PuzzleState, BLANK},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::Euclidean];

    pub fn estimate(self, state: &PuzzleState, goal: &PuzzleState) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(state, goal) as f64,
            Heuristic::Euclidean => euclidean(state, goal),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
        })
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Heuristic> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" | "m" => Ok(Heuristic::Manhattan),
            "euclidean" | "e" => Ok(Heuristic::Euclidean),
            _ => Err(Error::UnknownHeuristic { name: s.to_owned() }),
        }
    }
}

// (row offset, col offset) of every non-blank tile from its goal cell
fn displacements<'a>(
    state: &'a PuzzleState,
    goal: &PuzzleState,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let targets = goal.positions();
    state
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(move |(ix, &tile)| {
            let (row, col) = coords(ix);
            let (goal_row, goal_col) = coords(targets[tile as usize]);
            (row.abs_diff(goal_row), col.abs_diff(goal_col))
        })
}

/// Sum of |Δrow| + |Δcol| over the non-blank tiles.
pub fn manhattan(state: &PuzzleState, goal: &PuzzleState) -> u32 {
    displacements(state, goal)
        .map(|(dr, dc)| (dr + dc) as u32)
        .sum()
}

/// Sum of straight-line distances over the non-blank tiles.
pub fn euclidean(state: &PuzzleState, goal: &PuzzleState) -> f64 {
    displacements(state, goal)
        .map(|(dr, dc)| ((dr * dr + dc * dc) as f64).sqrt())
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_at_goal() {
        let goal = PuzzleState::goal();
        assert_eq!(manhattan(&goal, &goal), 0);
        assert_eq!(euclidean(&goal, &goal), 0.0);
    }

    #[test]
    fn blank_is_ignored() {
        let goal = PuzzleState::goal();
        let one_move: PuzzleState = "312045678".parse().unwrap();
        // only tile 3 is displaced, by one row
        assert_eq!(manhattan(&one_move, &goal), 1);
        assert_eq!(euclidean(&one_move, &goal), 1.0);
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        let goal = PuzzleState::goal();
        let far: PuzzleState = "806547231".parse().unwrap();
        // 8 is two rows and two columns away from its goal cell
        assert_eq!(manhattan(&far, &goal), 21);
        assert!(euclidean(&far, &goal) < manhattan(&far, &goal) as f64);
        assert!(euclidean(&far, &goal) > 0.0);
    }

    #[test]
    fn estimate_dispatches() {
        let goal = PuzzleState::goal();
        let s: PuzzleState = "125340678".parse().unwrap();
        assert_eq!(
            Heuristic::Manhattan.estimate(&s, &goal),
            manhattan(&s, &goal) as f64
        );
        assert_eq!(Heuristic::Euclidean.estimate(&s, &goal), euclidean(&s, &goal));
        assert_eq!("Euclidean".parse::<Heuristic>(), Ok(Heuristic::Euclidean));
        assert!("hamming".parse::<Heuristic>().is_err());
    }
}
