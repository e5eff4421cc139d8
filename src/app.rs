//! Session facade
//!
//! Wires the mini-games to the progression engine. The presentation layer
//! sends commands, renders `snapshot()`, and shows whatever
//! `drain_notices()` returns. Delayed follow-ups (`hide_mismatch`,
//! `claim_memory_bonus`, `settle_puzzle`) are scheduled by the page using the
//! delay reported in each outcome.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::Reward;
use crate::error::Result;
use crate::games::{
    BOARD_SIZE, CardFace, FlipOutcome, Letter, LetterCursor, MemoryGame, PuzzleGame, SelectOutcome,
};
use crate::notice::{Notice, Notifier};
use crate::persistence::Storage;
use crate::platform::DayStamp;
use crate::progress::{Character, Donation, DonationCategory, Donations, ProgressionEngine};
use crate::settings::Settings;

/// One memory card as the page should draw it
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    /// Hidden while face down
    pub symbol: Option<&'static str>,
    pub face: CardFace,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryView {
    pub cards: Vec<CardView>,
    pub matched_pairs: u32,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileView {
    pub tile: u8,
    /// CSS background offset (x, y) in pixels
    pub offset: (i64, i64),
}

#[derive(Debug, Clone, Serialize)]
pub struct PuzzleView {
    pub tiles: Vec<TileView>,
    pub selected: Option<usize>,
    pub solved: bool,
    pub image_url: String,
}

/// Everything the page displays
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub character: Option<Character>,
    pub avatar: Option<&'static str>,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub level: u32,
    pub gold: u32,
    pub title: String,
    pub unlocked_titles: Vec<String>,
    pub daily_challenge_completed: bool,
    pub donations: Donations,
    pub memory: MemoryView,
    pub puzzle: PuzzleView,
    pub letter: Letter,
}

pub struct App {
    progress: ProgressionEngine,
    memory: MemoryGame,
    puzzle: PuzzleGame,
    letters: LetterCursor,
    rng: Pcg32,
    settings: Settings,
}

impl App {
    /// Load progress and settings from `storage` and deal fresh rounds
    pub fn new(storage: Box<dyn Storage>, today: &DayStamp, seed: u64) -> Self {
        let settings = Settings::load(&*storage);
        let progress = ProgressionEngine::load(storage, today);

        let mut rng = Pcg32::seed_from_u64(seed);
        let memory = MemoryGame::new(&mut rng);
        let puzzle = PuzzleGame::new(&mut rng);
        log::info!("Session started with seed: {}", seed);

        Self {
            progress,
            memory,
            puzzle,
            letters: LetterCursor::new(),
            rng,
            settings,
        }
    }

    pub fn progress(&self) -> &ProgressionEngine {
        &self.progress
    }

    pub fn memory(&self) -> &MemoryGame {
        &self.memory
    }

    pub fn puzzle(&self) -> &PuzzleGame {
        &self.puzzle
    }

    pub fn letters(&self) -> &LetterCursor {
        &self.letters
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        settings.save(self.progress.storage_mut());
        self.settings = settings;
    }

    // === Progress ===

    pub fn has_character(&self) -> bool {
        self.progress.character().is_some()
    }

    pub fn select_character(&mut self, choice: Character) -> Result<()> {
        self.progress.select_character(choice)
    }

    /// Call when the page regains focus; resets the daily challenge on a new day
    pub fn start_new_day(&mut self, today: &DayStamp) -> bool {
        self.progress.normalize_for_new_day(today)
    }

    pub fn complete_daily_challenge(&mut self) -> bool {
        self.progress.complete_daily_challenge()
    }

    pub fn donate(&mut self, category: DonationCategory, cost: u32) -> Result<Donation> {
        self.progress.donate(category, cost)
    }

    fn apply(&mut self, reward: Reward) {
        self.progress.apply_reward(reward);
    }

    // === Memory ===

    pub fn flip_card(&mut self, pos: usize) -> FlipOutcome {
        match self.memory.flip(pos) {
            FlipOutcome::Matched {
                first,
                second,
                reward,
                round_complete,
            } => {
                self.apply(reward);
                FlipOutcome::Matched {
                    first,
                    second,
                    reward,
                    round_complete,
                }
            }
            FlipOutcome::Mismatched { first, second, .. } => FlipOutcome::Mismatched {
                first,
                second,
                hide_after_ms: self.settings.effective_mismatch_reveal_ms(),
            },
            other => other,
        }
    }

    pub fn hide_mismatch(&mut self) -> bool {
        self.memory.hide_mismatch()
    }

    /// How long the page should wait after the last pair before claiming
    pub fn memory_bonus_delay_ms(&self) -> u32 {
        self.settings.effective_celebration_delay_ms()
    }

    pub fn claim_memory_bonus(&mut self) -> Option<Reward> {
        let bonus = self.memory.claim_completion_bonus()?;
        self.progress.notices_mut().success(format!(
            "🎉 أحسنت! أكملت اللعبة! (+{} XP, +{} 🏆)",
            bonus.xp, bonus.gold
        ));
        self.apply(bonus);
        Some(bonus)
    }

    /// Deal a new round. A finished round's unclaimed bonus is paid first.
    pub fn reset_memory(&mut self) {
        self.claim_memory_bonus();
        self.memory.reset(&mut self.rng);
    }

    // === Puzzle ===

    pub fn select_tile(&mut self, pos: usize) -> SelectOutcome {
        match self.puzzle.select(pos) {
            SelectOutcome::Swapped { from, to, .. } => SelectOutcome::Swapped {
                from,
                to,
                settle_after_ms: self.settings.effective_swap_settle_ms(),
            },
            other => other,
        }
    }

    pub fn settle_puzzle(&mut self) -> Option<Reward> {
        let reward = self.puzzle.settle()?;
        self.progress.notices_mut().success(format!(
            "🎉 رائع! لقد ركبت الصورة بنجاح! (+{} XP, +{} 🏆)",
            reward.xp, reward.gold
        ));
        self.apply(reward);
        Some(reward)
    }

    pub fn reset_puzzle(&mut self) {
        self.puzzle.reset(&mut self.rng);
    }

    // === Letters ===

    /// Pay the review reward and show the next letter
    pub fn next_letter(&mut self) -> &'static Letter {
        let reward = self.letters.advance();
        self.apply(reward);
        self.letters.current()
    }

    // === Output ===

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.progress.notices_mut().drain()
    }

    pub fn flush_notices(&mut self, notifier: &mut dyn Notifier) {
        self.progress.notices_mut().flush_to(notifier);
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.progress.state();

        let memory = MemoryView {
            cards: self
                .memory
                .cards()
                .iter()
                .map(|card| CardView {
                    symbol: (card.face != CardFace::Down).then(|| card.symbol_str()),
                    face: card.face,
                })
                .collect(),
            matched_pairs: self.memory.matched_pairs(),
            locked: self.memory.is_locked(),
        };

        let tile_px = self.settings.puzzle_tile_px;
        let puzzle = PuzzleView {
            tiles: self
                .puzzle
                .tiles()
                .iter()
                .map(|&tile| TileView {
                    tile,
                    offset: crate::games::puzzle::background_offset(tile, tile_px),
                })
                .collect(),
            selected: self.puzzle.selected(),
            solved: self.puzzle.is_solved(),
            image_url: self.settings.puzzle_image_url.clone(),
        };
        debug_assert_eq!(puzzle.tiles.len(), BOARD_SIZE);

        Snapshot {
            character: state.character,
            avatar: state.character.map(|c| c.avatar()),
            xp: state.xp,
            xp_to_next_level: state.xp_threshold(),
            level: state.level,
            gold: state.gold,
            title: state.current_title().to_string(),
            unlocked_titles: state.unlocked_titles.clone(),
            daily_challenge_completed: state.daily_challenge_completed,
            donations: state.donations.clone(),
            memory,
            puzzle,
            letter: *self.letters.current(),
        }
    }
}
