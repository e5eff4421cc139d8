//! Letter flash cards

use serde::Serialize;

use crate::Reward;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Letter {
    pub letter: &'static str,
    pub name: &'static str,
}

pub static LETTERS: [Letter; 8] = [
    Letter { letter: "أ", name: "ألف" },
    Letter { letter: "ب", name: "باء" },
    Letter { letter: "ت", name: "تاء" },
    Letter { letter: "ث", name: "ثاء" },
    Letter { letter: "ج", name: "جيم" },
    Letter { letter: "ح", name: "حاء" },
    Letter { letter: "خ", name: "خاء" },
    Letter { letter: "د", name: "دال" },
];

/// Position in `LETTERS`, wrapping at the end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterCursor {
    index: usize,
}

impl LetterCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &'static Letter {
        &LETTERS[self.index]
    }

    /// Move to the next card and pay the review reward
    pub fn advance(&mut self) -> Reward {
        self.index = (self.index + 1) % LETTERS.len();
        Reward::new(LETTER_XP, LETTER_GOLD)
    }
}
