use super::*;

impl MineGrid {
    /// Copy of the grid with `config.mines` mines dropped uniformly at random,
    /// never on `first` or its neighbors, then neighbor counts recomputed.
    ///
    /// Picks retry on collision. When the board cannot hold that many mines
    /// outside the protected area it stops at capacity instead.
    pub fn place_mines<R: RandomSource>(
        &self,
        config: &MinefieldConfig,
        first: Coord2,
        rng: &mut R,
    ) -> Self {
        let mut next = self.clone();
        let (rows, cols) = next.size();
        let is_protected =
            |(row, col): Coord2| row.abs_diff(first.0) <= 1 && col.abs_diff(first.1) <= 1;

        let free_cells: CellCount = next
            .cells
            .indexed_iter()
            .filter(|&((row, col), cell)| {
                !cell.is_mine && !is_protected((row as Coord, col as Coord))
            })
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);

        let target = if config.mines > free_cells {
            log::warn!(
                "Cannot fit {} mines around the first reveal, placing {}",
                config.mines,
                free_cells
            );
            free_cells
        } else {
            config.mines
        };

        let mut placed = 0;
        let mut attempts: u32 = 0;
        while placed < target {
            let coords = (
                rng.index(rows.into()) as Coord,
                rng.index(cols.into()) as Coord,
            );
            attempts += 1;

            let cell = &mut next.cells[coords.to_nd_index()];
            if cell.is_mine || is_protected(coords) {
                continue;
            }
            cell.is_mine = true;
            placed += 1;
        }
        log::debug!(
            "placed {} mines around {:?} in {} picks",
            placed,
            first,
            attempts
        );

        next.recount_neighbors();
        next
    }
}
