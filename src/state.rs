use std::{
    fmt::{self, Display, Write},
    ops::Index,
    str::FromStr,
};

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;

use crate::error::{Error, Result};

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;
pub const BLANK: u8 = 0;

/// Direction the blank travels, not the tile it swaps with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Successor enumeration order. Fixing it makes every strategy deterministic.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// (row, col) offset of the blank.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// The move whose delta takes the blank of `from` to the blank of `to`.
    pub fn between(from: &PuzzleState, to: &PuzzleState) -> Option<Move> {
        let (r0, c0) = from.blank();
        let (r1, c1) = to.blank();
        let delta = (r1 as isize - r0 as isize, c1 as isize - c0 as isize);
        Move::ALL.into_iter().find(|m| m.delta() == delta)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        f.write_str(s)
    }
}

/// One arrangement of the 3x3 board, stored row-major.
///
/// Every constructor checks that each of 0-8 appears exactly once, so a
/// `PuzzleState` always has exactly one blank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleState {
    cells: [u8; CELLS],
    blank: u8,
}

impl PuzzleState {
    pub fn new(cells: [u8; CELLS]) -> Result<PuzzleState> {
        let mut seen = [false; CELLS];
        for &tile in &cells {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(Error::TileOutOfRange { tile })?;
            if *slot {
                return Err(Error::DuplicateTile { tile });
            }
            *slot = true;
        }

        Ok(PuzzleState::from_valid(cells))
    }

    pub fn from_slice(tiles: &[u8]) -> Result<PuzzleState> {
        let cells: [u8; CELLS] = tiles
            .try_into()
            .map_err(|_| Error::WrongTileCount { found: tiles.len() })?;
        PuzzleState::new(cells)
    }

    pub fn from_rows(rows: [[u8; SIDE]; SIDE]) -> Result<PuzzleState> {
        let mut cells = [0; CELLS];
        for (cell, tile) in cells.iter_mut().zip_eq(rows.iter().flatten()) {
            *cell = *tile;
        }
        PuzzleState::new(cells)
    }

    /// `0 1 2 / 3 4 5 / 6 7 8`, the blank in the top-left corner.
    pub fn goal() -> PuzzleState {
        PuzzleState::from_valid([0, 1, 2, 3, 4, 5, 6, 7, 8])
    }

    fn from_valid(cells: [u8; CELLS]) -> PuzzleState {
        let blank = cells
            .iter()
            .position(|&t| t == BLANK)
            .unwrap_or_else(|| unreachable!("validated state has a blank")) as u8;
        PuzzleState { cells, blank }
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    /// (row, col) of the blank.
    pub fn blank(&self) -> (usize, usize) {
        coords(self.blank_index())
    }

    /// Cell index of every tile, indexed by tile value.
    pub fn positions(&self) -> [usize; CELLS] {
        let mut positions = [0; CELLS];
        for (ix, &tile) in self.cells.iter().enumerate() {
            positions[tile as usize] = ix;
        }
        positions
    }

    /// The state after sliding the blank one step, or `None` at the border.
    pub fn apply(&self, movement: Move) -> Option<PuzzleState> {
        let (row, col) = self.blank();
        let (dr, dc) = movement.delta();
        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        if !(0..SIDE as isize).contains(&new_row) || !(0..SIDE as isize).contains(&new_col) {
            return None;
        }

        let target = new_row as usize * SIDE + new_col as usize;
        let mut cells = self.cells;
        cells.swap(self.blank_index(), target);
        Some(PuzzleState {
            cells,
            blank: target as u8,
        })
    }

    /// States one blank move away, in `Move::ALL` order.
    pub fn successors(&self) -> SmallVec<[(Move, PuzzleState); 4]> {
        Move::ALL
            .into_iter()
            .filter_map(|m| self.apply(m).map(|next| (m, next)))
            .collect()
    }

    /// Pairs of non-blank tiles out of ascending order, reading row-major.
    pub fn inversions(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&t| t != BLANK)
            .tuple_combinations()
            .filter(|(a, b)| a > b)
            .count()
    }

    // on an odd-width board every move keeps the inversion parity
    pub fn is_solvable_to(&self, goal: &PuzzleState) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }

    pub fn ensure_solvable_to(&self, goal: &PuzzleState) -> Result<()> {
        if self.is_solvable_to(goal) {
            Ok(())
        } else {
            Err(Error::Unsolvable {
                initial: self.digits(),
            })
        }
    }

    /// Uniformly random arrangement with no parity guarantee.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> PuzzleState {
        let mut cells = PuzzleState::goal().cells;
        cells.shuffle(rng);
        PuzzleState::from_valid(cells)
    }

    /// Random arrangement from which `goal` is reachable.
    pub fn random_solvable<R: Rng + ?Sized>(rng: &mut R, goal: &PuzzleState) -> PuzzleState {
        loop {
            let state = PuzzleState::random(rng);
            if state.is_solvable_to(goal) {
                return state;
            }
        }
    }

    /// Random walk of `moves` blank moves away from `self`, never undoing the
    /// previous step. The result is at most `moves` moves from `self`.
    pub fn scramble<R: Rng + ?Sized>(&self, moves: usize, rng: &mut R) -> PuzzleState {
        let mut state = *self;
        let mut last: Option<Move> = None;
        for _ in 0..moves {
            let options: SmallVec<[(Move, PuzzleState); 4]> = state
                .successors()
                .into_iter()
                .filter(|(m, _)| Some(m.opposite()) != last)
                .collect();
            if let Some(&(m, next)) = options.choose(rng) {
                state = next;
                last = Some(m);
            }
        }
        state
    }

    /// The nine tiles as a digit string, e.g. `012345678`.
    pub fn digits(&self) -> String {
        self.cells.iter().map(|t| char::from(b'0' + t)).collect()
    }
}

pub(crate) fn coords(ix: usize) -> (usize, usize) {
    (ix / SIDE, ix % SIDE)
}

impl Default for PuzzleState {
    fn default() -> PuzzleState {
        PuzzleState::goal()
    }
}

impl Index<(usize, usize)> for PuzzleState {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index.0 * SIDE + index.1]
    }
}

impl fmt::Debug for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PuzzleState({})", self.digits())
    }
}

impl Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(SIDE).enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            let line = row
                .iter()
                .map(|&t| if t == BLANK { '_' } else { char::from(b'0' + t) })
                .join(" ");
            f.write_str(&line)?;
        }
        Ok(())
    }
}

/// Accepts the nine digits in row-major order. Whitespace and the separators
/// `,`, `/`, `|`, `[`, `]` are ignored, so `"1 2 3 / 4 0 5 / 6 7 8"` and
/// `"123405678"` parse to the same state.
impl FromStr for PuzzleState {
    type Err = Error;

    fn from_str(s: &str) -> Result<PuzzleState> {
        let tiles = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '/' | '|' | '[' | ']'))
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(Error::InvalidDigit { character: c })
            })
            .collect::<Result<Vec<u8>>>()?;
        PuzzleState::from_slice(&tiles)
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;

    fn state(s: &str) -> PuzzleState {
        s.parse().unwrap()
    }

    #[test]
    fn parses_with_and_without_separators() {
        let compact = state("312045678");
        let spaced = state("3 1 2 / 0 4 5 / 6 7 8");
        let rows = PuzzleState::from_rows([[3, 1, 2], [0, 4, 5], [6, 7, 8]]).unwrap();
        assert_eq!(compact, spaced);
        assert_eq!(compact, rows);
        assert_eq!(compact.blank(), (1, 0));
        assert_eq!(compact[(0, 0)], 3);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            "01234567".parse::<PuzzleState>(),
            Err(Error::WrongTileCount { found: 8 })
        );
        assert_eq!(
            "0123456789".parse::<PuzzleState>(),
            Err(Error::WrongTileCount { found: 10 })
        );
        assert_eq!(
            "012345677".parse::<PuzzleState>(),
            Err(Error::DuplicateTile { tile: 7 })
        );
        assert_eq!(
            "01234567x".parse::<PuzzleState>(),
            Err(Error::InvalidDigit { character: 'x' })
        );
        assert_eq!(
            PuzzleState::new([0, 1, 2, 3, 4, 5, 6, 7, 9]),
            Err(Error::TileOutOfRange { tile: 9 })
        );
    }

    #[test]
    fn successors_follow_fixed_order() {
        // blank in the centre can go everywhere
        let centre = state("123405678");
        let moves: Vec<Move> = centre.successors().iter().map(|(m, _)| *m).collect();
        assert_eq!(moves, vec![Move::Up, Move::Down, Move::Left, Move::Right]);

        // blank in the top-left corner
        let corner = PuzzleState::goal();
        let succ = corner.successors();
        assert_eq!(succ.len(), 2);
        assert_eq!(succ[0], (Move::Down, state("312045678")));
        assert_eq!(succ[1], (Move::Right, state("102345678")));
    }

    #[test]
    fn apply_refuses_to_leave_board() {
        let corner = PuzzleState::goal();
        assert_eq!(corner.apply(Move::Up), None);
        assert_eq!(corner.apply(Move::Left), None);
        let down = corner.apply(Move::Down).unwrap();
        assert_eq!(down.apply(Move::Up), Some(corner));
    }

    #[test]
    fn move_between_uses_blank_delta() {
        let a = state("312045678");
        let b = PuzzleState::goal();
        assert_eq!(Move::between(&a, &b), Some(Move::Up));
        assert_eq!(Move::between(&b, &a), Some(Move::Down));
        assert_eq!(Move::between(&a, &a), None);
        for m in Move::ALL {
            assert_eq!(m.opposite().opposite(), m);
        }
    }

    #[test]
    fn parity_decides_solvability() {
        let goal = PuzzleState::goal();
        assert!(state("312045678").is_solvable_to(&goal));
        assert!(state("806547231").is_solvable_to(&goal));
        // swapping two non-blank tiles flips the parity
        assert!(!state("021345678").is_solvable_to(&goal));
        assert!(!state("142658037").is_solvable_to(&goal));
        assert!(matches!(
            state("021345678").ensure_solvable_to(&goal),
            Err(Error::Unsolvable { .. })
        ));
    }

    #[test]
    fn random_states_are_solvable() {
        let mut rng = SmallRng::seed_from_u64(514514);
        let goal = PuzzleState::goal();
        for _ in 0..50 {
            assert!(PuzzleState::random_solvable(&mut rng, &goal).is_solvable_to(&goal));
            assert!(goal.scramble(20, &mut rng).is_solvable_to(&goal));
        }
    }

    #[test]
    fn display_shows_grid() {
        assert_eq!(state("312045678").to_string(), "3 1 2\n_ 4 5\n6 7 8");
        assert_eq!(format!("{:?}", PuzzleState::goal()), "PuzzleState(012345678)");
    }
}
