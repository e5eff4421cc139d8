//! 3×3 picture puzzle with free swapping
//!
//! Any two tiles can be swapped (no slide adjacency). Tile `k` shows the
//! image region at row `k / 3`, column `k % 3`; the board is solved when
//! every position holds its own tile.

use rand::Rng;
use serde::Serialize;

use crate::Reward;
use crate::consts::*;

/// Tiles per row/column
pub const GRID_SIDE: usize = 3;
/// Tiles on the board
pub const BOARD_SIZE: usize = GRID_SIDE * GRID_SIDE;

/// What a selection did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectOutcome {
    /// Out of range, or a swap is still settling
    Ignored,
    Selected { pos: usize },
    Deselected { pos: usize },
    /// Tiles swapped; call `settle` after `settle_after_ms`
    Swapped {
        from: usize,
        to: usize,
        settle_after_ms: u32,
    },
}

/// One round of the puzzle
#[derive(Debug, Clone, Serialize)]
pub struct PuzzleGame {
    /// `tiles[pos]` is the tile shown at `pos`
    tiles: [u8; BOARD_SIZE],
    selected: Option<usize>,
    /// Swap done, redraw + solved check not yet run
    settling: bool,
}

impl PuzzleGame {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut game = Self {
            tiles: identity(),
            selected: None,
            settling: false,
        };
        game.reset(rng);
        game
    }

    /// Build a board from an explicit layout. `None` unless it is a
    /// permutation of `0..9`.
    pub fn from_tiles(tiles: [u8; BOARD_SIZE]) -> Option<Self> {
        if !is_permutation(&tiles) {
            return None;
        }
        Some(Self {
            tiles,
            selected: None,
            settling: false,
        })
    }

    /// Start over from a fresh shuffle
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.tiles = identity();
        // Fisher-Yates
        for i in (1..BOARD_SIZE).rev() {
            let j = rng.random_range(0..=i);
            self.tiles.swap(i, j);
        }
        self.selected = None;
        self.settling = false;
        log::debug!("Puzzle shuffled: {:?}", self.tiles);
    }

    pub fn tiles(&self) -> &[u8; BOARD_SIZE] {
        &self.tiles
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_settling(&self) -> bool {
        self.settling
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(pos, &tile)| tile as usize == pos)
    }

    /// Click on a board position
    pub fn select(&mut self, pos: usize) -> SelectOutcome {
        if pos >= BOARD_SIZE || self.settling {
            return SelectOutcome::Ignored;
        }

        match self.selected {
            None => {
                self.selected = Some(pos);
                SelectOutcome::Selected { pos }
            }
            Some(pending) if pending == pos => {
                self.selected = None;
                SelectOutcome::Deselected { pos }
            }
            Some(pending) => {
                self.tiles.swap(pending, pos);
                self.selected = None;
                self.settling = true;
                log::debug!("Puzzle swap {} <-> {}", pending, pos);
                SelectOutcome::Swapped {
                    from: pending,
                    to: pos,
                    settle_after_ms: SWAP_SETTLE_MS,
                }
            }
        }
    }

    /// Finish a swap: accept input again and check for a win
    pub fn settle(&mut self) -> Option<Reward> {
        if !self.settling {
            return None;
        }
        self.settling = false;

        if self.is_solved() {
            log::info!("Puzzle solved");
            Some(Reward::new(PUZZLE_XP, PUZZLE_GOLD))
        } else {
            None
        }
    }
}

fn identity() -> [u8; BOARD_SIZE] {
    std::array::from_fn(|i| i as u8)
}

/// True when `tiles` holds each of `0..9` exactly once
pub fn is_permutation(tiles: &[u8; BOARD_SIZE]) -> bool {
    let mut seen = [false; BOARD_SIZE];
    for &tile in tiles {
        match seen.get_mut(tile as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Image region (row, column) that tile `tile` shows
pub fn tile_region(tile: u8) -> (usize, usize) {
    let tile = tile as usize;
    (tile / GRID_SIDE, tile % GRID_SIDE)
}

/// CSS `background-position` offset (x, y) in pixels for `tile`
pub fn background_offset(tile: u8, tile_px: u32) -> (i64, i64) {
    let (row, col) = tile_region(tile);
    let px = tile_px as i64;
    (-(col as i64) * px, -(row as i64) * px)
}
