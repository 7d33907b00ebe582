use super::spawn::TileSource;
use super::state::{Cell, CollapsedLine, Grid, Line, Move, MoveResult, Score, Tile, SIZE};

/// Slide one line toward index 0, merging equal neighbours once per pass.
///
/// Zeros are dropped first, so `[2, 0, 2, 4]` merges the two 2s. A merged
/// tile never merges again in the same pass: `[2, 2, 2, 2]` gives `[4, 4, 0, 0]`.
///
/// ```
/// use tiles_2048::engine::collapse_line;
/// let res = collapse_line([2, 2, 2, 2]);
/// assert_eq!(res.line, [4, 4, 0, 0]);
/// assert_eq!(res.gained, 8);
/// ```
pub fn collapse_line(line: Line) -> CollapsedLine {
    let mut out = [0; SIZE];
    let mut len = 0;
    let mut gained: Score = 0;
    let mut pending: Option<Tile> = None;
    for &val in line.iter().filter(|&&v| v != 0) {
        match pending {
            Some(prev) if prev == val => {
                let merged = prev * 2;
                out[len] = merged;
                len += 1;
                gained += Score::from(merged);
                pending = None;
            }
            Some(prev) => {
                out[len] = prev;
                len += 1;
                pending = Some(val);
            }
            None => pending = Some(val),
        }
    }
    if let Some(prev) = pending {
        out[len] = prev;
    }
    CollapsedLine { line: out, gained }
}

/// Collapse every row to the left.
pub fn move_left(grid: Grid) -> MoveResult {
    let mut next = Grid::EMPTY;
    let mut gained = 0;
    let mut moved = false;
    for (row_idx, row) in grid.0.iter().enumerate() {
        let collapsed = collapse_line(*row);
        moved |= collapsed.line != *row;
        gained += collapsed.gained;
        next.0[row_idx] = collapsed.line;
    }
    MoveResult { grid: next, gained, moved }
}

/// reverse rows -> left -> reverse rows
pub fn move_right(grid: Grid) -> MoveResult {
    let res = move_left(reverse_rows(grid));
    MoveResult { grid: reverse_rows(res.grid), ..res }
}

/// transpose -> left -> transpose
pub fn move_up(grid: Grid) -> MoveResult {
    let res = move_left(transpose(grid));
    MoveResult { grid: transpose(res.grid), ..res }
}

/// transpose -> reverse rows -> left -> reverse rows -> transpose
pub fn move_down(grid: Grid) -> MoveResult {
    let res = move_left(reverse_rows(transpose(grid)));
    MoveResult { grid: transpose(reverse_rows(res.grid)), ..res }
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn apply_move(grid: Grid, direction: Move) -> MoveResult {
    match direction {
        Move::Left => move_left(grid),
        Move::Right => move_right(grid),
        Move::Up => move_up(grid),
        Move::Down => move_down(grid),
    }
}

/// Swap rows and columns.
pub fn transpose(grid: Grid) -> Grid {
    let mut out = Grid::EMPTY;
    for (r, row) in grid.0.iter().enumerate() {
        for (c, &val) in row.iter().enumerate() {
            out.0[c][r] = val;
        }
    }
    out
}

/// Mirror each row left-to-right.
pub fn reverse_rows(grid: Grid) -> Grid {
    let mut out = grid;
    for row in out.0.iter_mut() {
        row.reverse();
    }
    out
}

/// Every empty cell, row-major.
pub fn empty_cells(grid: &Grid) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(SIZE * SIZE);
    for (r, row) in grid.0.iter().enumerate() {
        for (c, &val) in row.iter().enumerate() {
            if val == 0 {
                cells.push((r, c));
            }
        }
    }
    cells
}

/// Put a new 2 or 4 on a uniformly chosen empty cell.
///
/// A full grid is returned unchanged; detecting game over is left to
/// [`has_any_move`].
pub fn spawn_random_tile<S: TileSource + ?Sized>(grid: Grid, source: &mut S) -> Grid {
    let cells = empty_cells(&grid);
    if cells.is_empty() {
        return grid;
    }
    let (r, c) = cells[source.pick_cell(cells.len())];
    let mut next = grid;
    next.0[r][c] = source.pick_value();
    next
}

/// Starting position: two random tiles on an empty grid.
pub fn initial_grid<S: TileSource + ?Sized>(source: &mut S) -> Grid {
    let grid = spawn_random_tile(Grid::EMPTY, source);
    spawn_random_tile(grid, source)
}

/// True if any cell is empty or any two orthogonal neighbours are equal.
///
/// This only looks at adjacency; it does not try the four moves.
pub fn has_any_move(grid: &Grid) -> bool {
    let g = &grid.0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            let v = g[r][c];
            if v == 0 {
                return true;
            }
            if (r + 1 < SIZE && g[r + 1][c] == v) || (c + 1 < SIZE && g[r][c + 1] == v) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const LOCKED: [Line; SIZE] = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];

    /// Replays fixed cell indices and values.
    struct Scripted {
        cells: Vec<usize>,
        values: Vec<Tile>,
    }

    impl TileSource for Scripted {
        fn pick_cell(&mut self, count: usize) -> usize {
            let idx = self.cells.remove(0);
            assert!(idx < count);
            idx
        }

        fn pick_value(&mut self) -> Tile {
            self.values.remove(0)
        }
    }

    fn random_grid(rng: &mut StdRng) -> Grid {
        let mut g = Grid::EMPTY;
        for row in g.0.iter_mut() {
            for cell in row.iter_mut() {
                if rng.gen_bool(0.6) {
                    *cell = 1 << rng.gen_range(1u32..6);
                }
            }
        }
        g
    }

    #[test]
    fn it_collapse_line() {
        let cases: [(Line, Line, Score); 9] = [
            ([0, 0, 0, 0], [0, 0, 0, 0], 0),
            ([2, 4, 2, 4], [2, 4, 2, 4], 0),
            ([2, 2, 4, 4], [4, 8, 0, 0], 12),
            ([2, 0, 0, 2], [4, 0, 0, 0], 4),
            ([2, 2, 2, 2], [4, 4, 0, 0], 8),
            ([0, 2, 0, 2], [4, 0, 0, 0], 4),
            ([2, 0, 2, 4], [4, 4, 0, 0], 4),
            ([4, 2, 2, 0], [4, 4, 0, 0], 4),
            ([0, 0, 0, 8], [8, 0, 0, 0], 0),
        ];
        for (input, line, gained) in cases {
            assert_eq!(collapse_line(input), CollapsedLine { line, gained }, "input {input:?}");
        }
    }

    #[test]
    fn collapse_keeps_three_of_a_kind_order() {
        // Leftmost pair merges, the third tile slides.
        assert_eq!(collapse_line([0, 4, 4, 4]).line, [8, 4, 0, 0]);
    }

    #[test]
    fn test_move_left() {
        let game = Grid::from_rows([[2, 4, 8, 16], [2, 8, 8, 4], [4, 0, 0, 4], [2, 0, 0, 4]]);
        let res = move_left(game);
        assert_eq!(
            res.grid,
            Grid::from_rows([[2, 4, 8, 16], [2, 16, 4, 0], [8, 0, 0, 0], [2, 4, 0, 0]])
        );
        assert_eq!(res.gained, 24);
        assert!(res.moved);
    }

    #[test]
    fn test_move_right() {
        let game = Grid::from_rows([[2, 4, 8, 16], [2, 8, 8, 4], [4, 0, 0, 4], [2, 0, 0, 4]]);
        let res = move_right(game);
        assert_eq!(
            res.grid,
            Grid::from_rows([[2, 4, 8, 16], [0, 2, 16, 4], [0, 0, 0, 8], [0, 0, 2, 4]])
        );
        assert_eq!(res.gained, 24);
    }

    #[test]
    fn test_move_up() {
        let game = Grid::from_rows([[2, 2, 4, 2], [4, 8, 0, 0], [8, 8, 0, 0], [16, 4, 4, 4]]);
        let res = move_up(game);
        assert_eq!(
            res.grid,
            Grid::from_rows([[2, 2, 8, 2], [4, 16, 0, 4], [8, 4, 0, 0], [16, 0, 0, 0]])
        );
        assert_eq!(res.gained, 24);
    }

    #[test]
    fn test_move_down() {
        let game = Grid::from_rows([[2, 2, 4, 2], [4, 8, 0, 0], [8, 8, 0, 0], [16, 4, 4, 4]]);
        let res = move_down(game);
        assert_eq!(
            res.grid,
            Grid::from_rows([[2, 0, 0, 0], [4, 2, 0, 0], [8, 16, 0, 2], [16, 4, 8, 4]])
        );
        assert_eq!(res.gained, 24);
    }

    #[test]
    fn pair_in_first_row_merges_left() {
        let game = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let res = move_left(game);
        assert_eq!(
            res,
            MoveResult {
                grid: Grid::from_rows([[4, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
                gained: 4,
                moved: true,
            }
        );
    }

    #[test]
    fn slide_without_merge_counts_as_moved() {
        let game = Grid::from_rows([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let res = move_left(game);
        assert!(res.moved);
        assert_eq!(res.gained, 0);
    }

    #[test]
    fn unmoved_result_equals_input() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut checked = 0;
        for _ in 0..2000 {
            let g = random_grid(&mut rng);
            for dir in Move::ALL {
                let res = apply_move(g, dir);
                if !res.moved {
                    assert_eq!(res.grid, g, "{dir}");
                    assert_eq!(res.gained, 0);
                    checked += 1;
                } else {
                    assert_ne!(res.grid, g, "{dir}");
                }
            }
        }
        assert!(checked > 0);
        assert!(!move_left(Grid::from_rows(LOCKED)).moved);
    }

    /// Cells of every line in the order tiles travel toward, read straight
    /// off the grid without the transforms under test.
    fn lines_toward(g: &Grid, dir: Move) -> Vec<Vec<Tile>> {
        (0..SIZE)
            .map(|i| {
                (0..SIZE)
                    .map(|j| match dir {
                        Move::Left => g.get(i, j),
                        Move::Right => g.get(i, SIZE - 1 - j),
                        Move::Up => g.get(j, i),
                        Move::Down => g.get(SIZE - 1 - j, i),
                    })
                    .collect()
            })
            .collect()
    }

    /// Pairwise scan over the non-zero tiles: a pair merges for `2v` and
    /// both tiles are consumed.
    fn expected_gain(line: &[Tile]) -> Score {
        let tiles: Vec<Tile> = line.iter().copied().filter(|&v| v != 0).collect();
        let mut gain = 0;
        let mut i = 0;
        while i < tiles.len() {
            if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
                gain += 2 * tiles[i];
                i += 2;
            } else {
                i += 1;
            }
        }
        gain
    }

    #[test]
    fn tile_sum_conserved_and_gain_matches_merges() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..2000 {
            let g = random_grid(&mut rng);
            for dir in Move::ALL {
                let res = apply_move(g, dir);
                assert_eq!(res.grid.tile_sum(), g.tile_sum());
                let expected: Score = lines_toward(&g, dir).iter().map(|l| expected_gain(l)).sum();
                assert_eq!(res.gained, expected, "{dir} on {g:?}");
            }
        }
    }

    #[test]
    fn gain_counts_merged_value_per_pair() {
        // Two merges of 8 and one of 2 in different rows: 16 + 16 + 4.
        let g = Grid::from_rows([[8, 8, 8, 8], [2, 0, 2, 0], [4, 8, 16, 32], [0; 4]]);
        assert_eq!(move_left(g).gained, 36);
        assert_eq!(move_right(g).gained, 36);
    }

    #[test]
    fn directions_reduce_to_move_left() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let g = random_grid(&mut rng);
            assert_eq!(move_up(g).grid, transpose(move_left(transpose(g)).grid));
            assert_eq!(move_right(g).grid, reverse_rows(move_left(reverse_rows(g)).grid));
            assert_eq!(
                move_down(g).grid,
                transpose(reverse_rows(move_left(reverse_rows(transpose(g))).grid))
            );
            assert_eq!(move_up(g).gained, move_left(transpose(g)).gained);
        }
    }

    #[test]
    fn transforms_are_involutions() {
        let mut rng = StdRng::seed_from_u64(8);
        let g = random_grid(&mut rng);
        assert_eq!(transpose(transpose(g)), g);
        assert_eq!(reverse_rows(reverse_rows(g)), g);
    }

    #[test]
    fn it_empty_cells() {
        let game = Grid::from_rows([[2, 0, 2, 2], [2, 2, 2, 2], [2, 2, 2, 0], [0, 2, 2, 2]]);
        assert_eq!(empty_cells(&game), vec![(0, 1), (2, 3), (3, 0)]);
        assert!(empty_cells(&Grid::from_rows(LOCKED)).is_empty());
        assert_eq!(empty_cells(&Grid::EMPTY).len(), 16);
    }

    #[test]
    fn spawn_on_full_grid_is_noop() {
        let full = Grid::from_rows(LOCKED);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spawn_random_tile(full, &mut rng), full);
    }

    #[test]
    fn spawn_fills_chosen_empty_cell() {
        let game = Grid::from_rows([[2, 0, 2, 2], [2, 2, 2, 2], [2, 2, 2, 0], [0, 2, 2, 2]]);
        let mut source = Scripted { cells: vec![1], values: vec![4] };
        let next = spawn_random_tile(game, &mut source);
        let mut expected = game.into_rows();
        expected[2][3] = 4;
        assert_eq!(next, Grid::from_rows(expected));
    }

    #[test]
    fn spawn_changes_exactly_one_empty_cell() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..500 {
            let g = random_grid(&mut rng);
            if g.count_empty() == 0 {
                continue;
            }
            let next = spawn_random_tile(g, &mut rng);
            let changed: Vec<Cell> = (0..SIZE)
                .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
                .filter(|&(r, c)| next.get(r, c) != g.get(r, c))
                .collect();
            assert_eq!(changed.len(), 1);
            let (r, c) = changed[0];
            assert_eq!(g.get(r, c), 0);
            assert!(matches!(next.get(r, c), 2 | 4));
        }
    }

    #[test]
    fn seeded_spawn_is_reproducible() {
        let a = initial_grid(&mut StdRng::seed_from_u64(42));
        let b = initial_grid(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.count_empty(), 14);
    }

    #[test]
    fn it_has_any_move() {
        assert!(!has_any_move(&Grid::from_rows(LOCKED)));
        assert!(has_any_move(&Grid::EMPTY));

        let mut one_gap = LOCKED;
        one_gap[3][3] = 0;
        assert!(has_any_move(&Grid::from_rows(one_gap)));

        let mut vertical_pair = LOCKED;
        vertical_pair[1][0] = 2;
        assert!(has_any_move(&Grid::from_rows(vertical_pair)));

        let mut horizontal_pair = LOCKED;
        horizontal_pair[3][2] = 2;
        assert!(has_any_move(&Grid::from_rows(horizontal_pair)));
    }

    #[test]
    fn any_zero_means_a_move_exists() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..500 {
            let g = random_grid(&mut rng);
            if g.count_empty() > 0 {
                assert!(has_any_move(&g));
            }
        }
    }
}
