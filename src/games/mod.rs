//! Mini-game engines
//!
//! Each engine owns one round of its game and reports outcomes as plain
//! values. Rewards are applied by the caller, and the engines never touch
//! progress or storage themselves.
//! - Seeded RNG only (passed into `new`/`reset`)
//! - Delays are reported, never slept on

pub mod letters;
pub mod memory;
pub mod puzzle;

pub use letters::{LETTERS, Letter, LetterCursor};
pub use memory::{Card, CardFace, DECK_SIZE, FlipOutcome, MemoryGame};
pub use puzzle::{BOARD_SIZE, GRID_SIDE, PuzzleGame, SelectOutcome};
