//! Plain-text map layouts.
//!
//! ```text
//! ; optional comment lines
//! block 64
//! 1 1 1 1
//! 1 0 . 1
//! # # # #
//! ```
//!
//! * `1` or `#` is a wall, `0` or `.` is empty; spaces between cells are
//!   optional.
//! * The `block <size>` header is optional and must precede the first row.
//! * Every row must have the same number of cells.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, io, path::Path, str::FromStr};

use crate::world::{EMPTY, MapError, TileMap, WALL};

/// The built-in 8×8 level: border walls, a short wall in column 2 and a
/// single pillar at row 5, column 5.
#[rustfmt::skip]
pub const REFERENCE_LAYOUT: [u8; 64] = [
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 0, 1, 0, 0, 0, 0, 1,
    1, 0, 1, 0, 0, 0, 0, 1,
    1, 0, 1, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 1, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 1,
    1, 1, 1, 1, 1, 1, 1, 1,
];

/// `REFERENCE_LAYOUT` as a map with the given cell size.
pub fn reference_map(block_size: f64) -> Result<TileMap, MapError> {
    TileMap::new(8, 8, block_size, REFERENCE_LAYOUT.to_vec())
}

/// Cell size that fits eight cells across the shorter window side.
pub fn screen_block_size(width: usize, height: usize) -> f64 {
    (width.min(height) / 8).max(1) as f64
}

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("layout has no rows")]
    Empty,

    #[error("line {line}: expected {expected} cells, found {actual}")]
    Ragged {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}: unexpected cell character `{ch}`")]
    BadCell { line: usize, ch: char },

    #[error("line {line}: header after the first row")]
    BadHeader { line: usize },

    #[error(transparent)]
    Map(#[from] MapError),
}

/// Parsed, not yet validated as a [`TileMap`].
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
    /// Value of the `block` header, if present.
    pub block_size: Option<f64>,
}

impl Layout {
    /// Build the map, preferring the file's block size over `fallback`.
    pub fn into_tile_map(self, fallback: f64) -> Result<TileMap, MapError> {
        let block = self.block_size.unwrap_or(fallback);
        TileMap::new(self.width, self.height, block, self.cells)
    }
}

impl FromStr for Layout {
    type Err = LevelError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        static HEADER: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^block\s+([0-9]+(?:\.[0-9]+)?)$").expect("static header regex")
        });

        let mut width = 0;
        let mut cells = Vec::new();
        let mut block_size = None;

        for (i, raw) in src.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.split(';').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = HEADER.captures(line) {
                if !cells.is_empty() {
                    return Err(LevelError::BadHeader { line: line_no });
                }
                let value: f64 = caps[1]
                    .parse()
                    .map_err(|_| LevelError::BadHeader { line: line_no })?;
                if block_size.is_some() {
                    warn!("line {line_no}: duplicate block header ignored");
                } else {
                    block_size = Some(value);
                }
                continue;
            }

            let row = parse_row(line, line_no)?;
            if cells.is_empty() {
                width = row.len();
            } else if row.len() != width {
                return Err(LevelError::Ragged {
                    line: line_no,
                    expected: width,
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }

        if cells.is_empty() {
            return Err(LevelError::Empty);
        }

        Ok(Layout {
            width,
            height: cells.len() / width,
            cells,
            block_size,
        })
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<u8>, LevelError> {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|ch| match ch {
            '1' | '#' => Ok(WALL),
            '0' | '.' => Ok(EMPTY),
            _ => Err(LevelError::BadCell { line: line_no, ch }),
        })
        .collect()
}

/// Parse a layout from text into a map.
pub fn parse_level(src: &str, fallback_block: f64) -> Result<TileMap, LevelError> {
    let layout: Layout = src.parse()?;
    debug!(
        "parsed layout {}x{} (block header: {:?})",
        layout.width, layout.height, layout.block_size
    );
    Ok(layout.into_tile_map(fallback_block)?)
}

/// Read and parse a layout file.
pub fn load_level<P: AsRef<Path>>(path: P, fallback_block: f64) -> Result<TileMap, LevelError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path)?;
    debug!("loading level {}", path.display());
    parse_level(&src, fallback_block)
}

/*=======================================================================*/
/*                                Tests                                  */
/*=======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_TEXT: &str = "\
; the built-in level
block 64
########
#.#....#
#.#....#
#.#....#
#......#
#....#.#
#......#
########
";

    #[test]
    fn block_size_from_window() {
        assert_eq!(screen_block_size(1024, 512), 64.0);
        assert_eq!(screen_block_size(100, 50), 6.0);
        assert_eq!(screen_block_size(4, 4), 1.0);
        let map = reference_map(screen_block_size(800, 600)).unwrap();
        assert_eq!(map.block_size(), 75.0);
    }

    #[test]
    fn text_matches_reference_layout() {
        let from_text = parse_level(REFERENCE_TEXT, 1.0).unwrap();
        let built_in = reference_map(64.0).unwrap();
        assert_eq!(from_text, built_in);
    }

    #[test]
    fn digits_with_spaces_and_fallback_block() {
        let map = parse_level("1 1 1\n1 0 1 ; centre\n1 1 1\n", 32.0).unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.block_size(), 32.0);
        assert_eq!(map.cell(1, 1), Some(EMPTY));
        assert_eq!(map.cell(0, 1), Some(WALL));
    }

    #[test]
    fn rectangular_layout() {
        let layout: Layout = "####\n#..#\n".parse().unwrap();
        assert_eq!((layout.width, layout.height), (4, 2));
        assert_eq!(layout.block_size, None);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = parse_level("###\n##\n", 8.0).unwrap_err();
        assert!(matches!(
            err,
            LevelError::Ragged {
                line: 2,
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn bad_cell_reported_with_line() {
        let err = parse_level("###\n#x#\n", 8.0).unwrap_err();
        assert!(matches!(err, LevelError::BadCell { line: 2, ch: 'x' }));
    }

    #[test]
    fn header_must_come_first() {
        let err = parse_level("###\nblock 8\n###\n", 8.0).unwrap_err();
        assert!(matches!(err, LevelError::BadHeader { line: 2 }));
    }

    #[test]
    fn duplicate_header_keeps_first() {
        let layout: Layout = "block 16\nblock 8\n#\n".parse().unwrap();
        assert_eq!(layout.block_size, Some(16.0));
    }

    #[test]
    fn empty_and_zero_block() {
        assert!(matches!(parse_level("; nothing\n\n", 8.0), Err(LevelError::Empty)));
        assert!(matches!(
            parse_level("block 0\n#\n", 8.0),
            Err(LevelError::Map(MapError::BadBlockSize(_)))
        ));
    }
}
