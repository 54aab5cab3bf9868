// Grid of wall/empty cells with a uniform cell size.
// Built once from a literal layout and read-only afterwards, so it can be
// shared by any number of readers (including parallel ray sweeps).

use log::debug;

/// Cell value for an empty tile.
pub const EMPTY: u8 = 0;
/// Cell value for a wall tile.
pub const WALL: u8 = 1;

/// Construction failures.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MapError {
    /// `cells.len()` disagrees with `width * height`.
    #[error("map is {width}x{height} ({expected} cells) but {actual} cells were given")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Width or height is zero.
    #[error("map must have at least one cell")]
    EmptyMap,

    /// Block size is zero, negative or not finite.
    #[error("block size must be a positive finite number, got {0}")]
    BadBlockSize(f64),
}

/// Row-major tile map.
///
/// * `cells[my * width + mx]` is the tile at column `mx`, row `my`.
/// * World coordinates map to cells through `floor(x / block_size)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    width: usize,
    height: usize,
    block_size: f64,
    cells: Vec<u8>,
}

impl TileMap {
    /// Build a map from a row-major cell list.
    pub fn new(
        width: usize,
        height: usize,
        block_size: f64,
        cells: Vec<u8>,
    ) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::EmptyMap);
        }
        if !(block_size.is_finite() && block_size > 0.0) {
            return Err(MapError::BadBlockSize(block_size));
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(MapError::SizeMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }

        debug!(
            "tile map {width}x{height}, block {block_size}, {} walls",
            cells.iter().filter(|&&c| c == WALL).count()
        );

        Ok(Self {
            width,
            height,
            block_size,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn block_size(&self) -> f64 {
        self.block_size
    }

    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Size of the whole map in world units.
    pub fn world_size(&self) -> (f64, f64) {
        (
            self.width as f64 * self.block_size,
            self.height as f64 * self.block_size,
        )
    }

    /// Tile at grid coordinates, `None` outside the grid.
    pub fn cell(&self, mx: usize, my: usize) -> Option<u8> {
        if mx >= self.width || my >= self.height {
            return None;
        }
        Some(self.cells[my * self.width + mx])
    }

    /// Flat index of the cell containing a world point.
    ///
    /// The index is computed as `my * width + mx` from the floored cell
    /// coordinates and only the flat result is range-checked, so a point
    /// just left of column 0 resolves to the last cell of the previous row.
    pub fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let mx = (x / self.block_size).floor() as i64;
        let my = (y / self.block_size).floor() as i64;
        let idx = my.checked_mul(self.width as i64)?.checked_add(mx)?;
        if (0..self.cells.len() as i64).contains(&idx) {
            Some(idx as usize)
        } else {
            None
        }
    }

    /// Is the world point inside a wall cell? Out-of-range points are not.
    pub fn is_wall(&self, x: f64, y: f64) -> bool {
        self.cell_index(x, y)
            .is_some_and(|idx| self.cells[idx] == WALL)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const GRID: [u8; 64] = [
        1, 1, 1, 1, 1, 1, 1, 1,
        1, 0, 1, 0, 0, 0, 0, 1,
        1, 0, 1, 0, 0, 0, 0, 1,
        1, 0, 1, 0, 0, 0, 0, 1,
        1, 0, 0, 0, 0, 0, 0, 1,
        1, 0, 0, 0, 0, 1, 0, 1,
        1, 0, 0, 0, 0, 0, 0, 1,
        1, 1, 1, 1, 1, 1, 1, 1,
    ];

    #[test]
    fn size_mismatch_rejected() {
        let err = TileMap::new(8, 8, 64.0, vec![0; 63]).unwrap_err();
        assert_eq!(
            err,
            MapError::SizeMismatch {
                width: 8,
                height: 8,
                expected: 64,
                actual: 63
            }
        );
    }

    #[test]
    fn degenerate_inputs_rejected() {
        assert_eq!(
            TileMap::new(0, 8, 64.0, vec![]).unwrap_err(),
            MapError::EmptyMap
        );
        assert!(matches!(
            TileMap::new(1, 1, 0.0, vec![0]).unwrap_err(),
            MapError::BadBlockSize(_)
        ));
        assert!(matches!(
            TileMap::new(1, 1, f64::NAN, vec![0]).unwrap_err(),
            MapError::BadBlockSize(_)
        ));
    }

    #[test]
    fn cell_centres_reproduce_grid() {
        let block = 64.0;
        let map = TileMap::new(8, 8, block, GRID.to_vec()).unwrap();
        for my in 0..8 {
            for mx in 0..8 {
                let x = (mx as f64 + 0.5) * block;
                let y = (my as f64 + 0.5) * block;
                assert_eq!(map.is_wall(x, y), GRID[my * 8 + mx] == WALL, "({mx},{my})");
            }
        }
    }

    #[test]
    fn out_of_range_is_not_a_wall() {
        let map = TileMap::new(8, 8, 64.0, GRID.to_vec()).unwrap();
        assert!(!map.is_wall(10.0, -1.0));
        assert!(!map.is_wall(10.0, 8.0 * 64.0 + 1.0));
        assert!(!map.is_wall(f64::INFINITY, 0.0));
        assert_eq!(map.cell_index(-1.0, -1.0), None);
    }

    #[test]
    fn index_wraps_between_rows() {
        let map = TileMap::new(8, 8, 64.0, GRID.to_vec()).unwrap();
        // one block left of (0, row 2) lands on the end of row 1
        assert_eq!(map.cell_index(-1.0, 2.5 * 64.0), Some(15));
    }

    #[test]
    fn rectangular_layout() {
        let map = TileMap::new(3, 2, 10.0, vec![0, 1, 0, 1, 0, 0]).unwrap();
        assert_eq!(map.world_size(), (30.0, 20.0));
        assert_eq!(map.cells().len(), map.width() * map.height());
        assert!(map.is_wall(15.0, 5.0));
        assert!(map.is_wall(5.0, 15.0));
        assert!(!map.is_wall(25.0, 15.0));
        assert_eq!(map.cell(2, 1), Some(0));
        assert_eq!(map.cell(3, 0), None);
    }
}
