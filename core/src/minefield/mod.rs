//! Minesweeper board: a rectangle of cells whose mines are placed lazily on
//! the first reveal.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use session::*;

mod generator;
mod session;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinefieldConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl MinefieldConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, mult(rows, cols));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::new_unchecked((8, 8), 10),
            Difficulty::Medium => Self::new_unchecked((12, 12), 25),
            Difficulty::Hard => Self::new_unchecked((16, 16), 50),
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl From<Difficulty> for MinefieldConfig {
    fn from(difficulty: Difficulty) -> Self {
        Self::for_difficulty(difficulty)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineCell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines in the 8-neighborhood, only meaningful when `!is_mine`.
    pub neighbor_mines: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineGrid {
    cells: Array2<MineCell>,
}

impl MineGrid {
    /// Unmined grid with every cell hidden.
    pub fn new(config: MinefieldConfig) -> Self {
        Self {
            cells: Array2::default(config.size.to_nd_index()),
        }
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::new(MinefieldConfig::for_difficulty(difficulty))
    }

    /// Grid with mines exactly at `mine_coords` and neighbor counts filled in.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(MinefieldConfig::new_unchecked(size, 0));

        for &coords in mine_coords {
            if !grid.cells.contains_coords(coords) {
                return Err(GameError::InvalidCoords);
            }
            grid.cells[coords.to_nd_index()].is_mine = true;
        }

        grid.recount_neighbors();
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.cells)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.contains_coords(coords)
    }

    pub fn get(&self, coords: Coord2) -> Option<&MineCell> {
        self.contains(coords)
            .then(|| &self.cells[coords.to_nd_index()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &MineCell> {
        self.cells.iter()
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn count_flags(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed && !cell.is_mine)
    }

    fn count_where(&self, predicate: impl Fn(&MineCell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|&cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self
            .cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine)
            .count();
        // at most 8 neighbors
        count as u8
    }

    pub(crate) fn recount_neighbors(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let count = if self.cells[coords.to_nd_index()].is_mine {
                    0
                } else {
                    self.adjacent_mine_count(coords)
                };
                self.cells[coords.to_nd_index()].neighbor_mines = count;
            }
        }
    }

    /// Copy of the grid with `coords` revealed, flooding outward from cells
    /// without neighbor mines. Out of bounds, revealed or flagged cells are a
    /// no-op.
    pub fn reveal(&self, coords: Coord2) -> Self {
        let mut next = self.clone();
        next.reveal_mut(coords);
        next
    }

    /// In-place reveal, returns how many cells were opened.
    pub(crate) fn reveal_mut(&mut self, coords: Coord2) -> CellCount {
        let mut opened: CellCount = 0;
        let mut to_visit: Vec<Coord2> = Vec::from([coords]);

        while let Some(visit_coords) = to_visit.pop() {
            if !self.contains(visit_coords) {
                continue;
            }

            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if cell.is_revealed || cell.is_flagged {
                continue;
            }

            cell.is_revealed = true;
            opened += 1;
            log::trace!(
                "open cell at {:?}, mine count: {}",
                visit_coords,
                cell.neighbor_mines
            );

            if cell.neighbor_mines == 0 && !cell.is_mine {
                to_visit.extend(self.cells.iter_neighbors(visit_coords).filter(|&pos| {
                    let neighbor = &self.cells[pos.to_nd_index()];
                    !neighbor.is_revealed && !neighbor.is_flagged
                }));
            }
        }

        opened
    }

    /// Copy of the grid with the flag flipped on an unrevealed cell.
    pub fn toggle_flag(&self, coords: Coord2) -> Self {
        let mut next = self.clone();
        if next.contains(coords) {
            let cell = &mut next.cells[coords.to_nd_index()];
            if !cell.is_revealed {
                cell.is_flagged = !cell.is_flagged;
            }
        }
        next
    }

    /// Every cell of `config` that holds no mine is revealed. Counts the
    /// mines actually on the grid, which is fewer than requested when
    /// placement stopped at capacity.
    pub fn check_win(&self, config: &MinefieldConfig) -> bool {
        let safe = config.total_cells().saturating_sub(self.mine_count());
        self.revealed_safe_count() == safe
    }

    /// Copy with every mine revealed, other cells untouched.
    pub fn reveal_all_mines(&self) -> Self {
        let mut next = self.clone();
        next.cells
            .iter_mut()
            .filter(|cell| cell.is_mine)
            .for_each(|cell| cell.is_revealed = true);
        next
    }
}

impl Index<Coord2> for MineGrid {
    type Output = MineCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for MineGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size();
        write!(f, "   ")?;
        for col in 0..cols {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{:>3}", row)?;
            for col in 0..cols {
                let cell = self[(row, col)];
                let symbol = match cell {
                    MineCell { is_revealed: true, is_mine: true, .. } => '*',
                    MineCell { is_revealed: true, neighbor_mines: 0, .. } => '.',
                    MineCell { is_revealed: true, neighbor_mines, .. } => {
                        char::from_digit(neighbor_mines.into(), 10).unwrap_or('?')
                    }
                    MineCell { is_flagged: true, .. } => 'F',
                    _ => '#',
                };
                write!(f, "{:>3}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
