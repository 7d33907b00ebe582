use rand::Rng;

use super::state::Tile;

/// Source of the two random choices a tile spawn needs.
///
/// Every [`rand::Rng`] is a `TileSource`, so a seeded `StdRng` gives a fully
/// reproducible game. Tests can supply a scripted source instead.
pub trait TileSource {
    /// Uniform index in `0..count`. Only called with `count > 0`.
    fn pick_cell(&mut self, count: usize) -> usize;

    /// Value of the new tile: 2 with probability 0.9, 4 with probability 0.1.
    fn pick_value(&mut self) -> Tile;
}

impl<R: Rng + ?Sized> TileSource for R {
    #[inline]
    fn pick_cell(&mut self, count: usize) -> usize {
        self.gen_range(0..count)
    }

    #[inline]
    fn pick_value(&mut self) -> Tile {
        if self.gen_range(0..10) < 9 { 2 } else { 4 }
    }
}
