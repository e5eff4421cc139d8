//! Ahlulbayt Heroes - progress and rewards core for a children's learning app
//!
//! Core modules:
//! - `progress`: XP, levels, gold, titles, daily challenge, donations
//! - `games`: Memory matching, swap puzzle, letter flash cards
//! - `persistence`: Storage backends for the saved progress blob
//! - `platform`: Browser/native differences (calendar day, seeds)
//! - `app`: Session facade the presentation layer drives

pub mod app;
pub mod error;
pub mod games;
pub mod notice;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{App, Snapshot};
pub use error::{Error, Result};
pub use notice::{Notice, Notifier, Severity};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// XP needed per level (threshold is `level * XP_PER_LEVEL`)
    pub const XP_PER_LEVEL: u32 = 100;
    /// Gold a brand new player starts with
    pub const STARTING_GOLD: u32 = 50;
    /// Titles start unlocking once level exceeds this
    pub const TITLE_UNLOCK_MIN_LEVEL: u32 = 2;

    /// Title catalog, in unlock order
    pub const TITLES: [&str; 10] = [
        "محب أهل البيت",
        "نور الزهراء",
        "حامل القيم",
        "حبيب القرآن",
        "بطل الدعاء",
        "صديق العباس",
        "فارس كربلاء",
        "خادم الإمام الحسين",
        "السخيّ",
        "باني الخير",
    ];
    /// Title granted for the first donation
    pub const DONOR_TITLE: &str = TITLES[8];

    /// Memory card symbols (each appears twice per round)
    pub const MEMORY_ITEMS: [&str; 8] = ["⚔️", "🏹", "👑", "🕋", "💧", "📿", "🕯️", "🏴"];

    /// Daily challenge reward
    pub const DAILY_XP: u32 = 30;
    pub const DAILY_GOLD: u32 = 50;

    /// Memory game rewards
    pub const PAIR_XP: u32 = 10;
    pub const PAIR_GOLD: u32 = 5;
    pub const MEMORY_BONUS_XP: u32 = 20;
    pub const MEMORY_BONUS_GOLD: u32 = 20;

    /// Puzzle reward
    pub const PUZZLE_XP: u32 = 25;
    pub const PUZZLE_GOLD: u32 = 25;

    /// Flash card reward per advance
    pub const LETTER_XP: u32 = 5;
    pub const LETTER_GOLD: u32 = 2;

    /// Mismatched memory cards stay face up this long (ms)
    pub const MISMATCH_REVEAL_MS: u32 = 1000;
    /// Delay before celebrating a finished memory round (ms)
    pub const CELEBRATION_DELAY_MS: u32 = 500;
    /// Delay between a puzzle swap and the redraw + solved check (ms)
    pub const SWAP_SETTLE_MS: u32 = 300;
    /// Level-up notice trails the XP notice by this much (ms)
    pub const LEVEL_UP_NOTICE_DELAY_MS: u32 = 500;
    /// Donor title notice trails the thank-you notice by this much (ms)
    pub const DONOR_TITLE_NOTICE_DELAY_MS: u32 = 1000;
}

/// An XP + gold grant produced by a mini-game outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub gold: u32,
}

impl Reward {
    pub const fn new(xp: u32, gold: u32) -> Self {
        Self { xp, gold }
    }
}
