//! Progression engine: XP, levels, gold, titles, daily challenge
//!
//! Every mutation is written back to storage immediately.

use super::state::{Character, ProgressState};
use crate::Reward;
use crate::consts::*;
use crate::error::{Error, Result};
use crate::notice::{Notice, NoticeQueue, Severity};
use crate::persistence::{self, PROGRESS_KEY, Storage};
use crate::platform::DayStamp;

pub struct ProgressionEngine {
    state: ProgressState,
    storage: Box<dyn Storage>,
    notices: NoticeQueue,
}

impl ProgressionEngine {
    /// Wrap an existing state. The state is sanitized but not saved.
    pub fn with_state(mut state: ProgressState, storage: Box<dyn Storage>) -> Self {
        state.sanitize();
        Self {
            state,
            storage,
            notices: NoticeQueue::default(),
        }
    }

    /// Load saved progress (or defaults) and roll over to `today`.
    ///
    /// A corrupt blob is logged and replaced by defaults.
    pub fn load(storage: Box<dyn Storage>, today: &DayStamp) -> Self {
        let state = match persistence::load_json::<ProgressState>(&*storage, PROGRESS_KEY) {
            Ok(Some(state)) => {
                log::info!("Loaded progress (level {}, {} gold)", state.level, state.gold);
                state
            }
            Ok(None) => {
                log::info!("No saved progress found, starting fresh");
                ProgressState::default()
            }
            Err(e) => {
                log::warn!("Discarding saved progress: {}", e);
                ProgressState::default()
            }
        };

        let mut engine = Self::with_state(state, storage);
        engine.normalize_for_new_day(today);
        engine
    }

    // === Queries ===

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn character(&self) -> Option<Character> {
        self.state.character
    }

    pub fn xp(&self) -> u32 {
        self.state.xp
    }

    /// XP needed to reach the next level
    pub fn xp_to_next_level(&self) -> u32 {
        self.state.xp_threshold()
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn gold(&self) -> u32 {
        self.state.gold
    }

    pub fn current_title(&self) -> &str {
        self.state.current_title()
    }

    pub fn unlocked_titles(&self) -> &[String] {
        &self.state.unlocked_titles
    }

    pub fn daily_challenge_completed(&self) -> bool {
        self.state.daily_challenge_completed
    }

    pub fn storage(&self) -> &dyn Storage {
        &*self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut dyn Storage {
        &mut *self.storage
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    pub(crate) fn notices_mut(&mut self) -> &mut NoticeQueue {
        &mut self.notices
    }

    pub(crate) fn state_mut(&mut self) -> &mut ProgressState {
        &mut self.state
    }

    // === Commands ===

    /// Write the current state to storage. Failures are logged, never raised.
    pub fn save(&mut self) {
        if let Err(e) = persistence::save_json(&mut *self.storage, PROGRESS_KEY, &self.state) {
            log::warn!("Failed to save progress: {}", e);
        }
    }

    /// Add XP, rolling overflow into levels. Returns true on level-up.
    pub fn award_xp(&mut self, amount: u32) -> bool {
        self.state.xp = self.state.xp.saturating_add(amount);
        let gained = self.state.roll_levels();

        self.save();
        self.notices.info(format!("+{} XP!", amount));
        if gained > 0 {
            log::info!("Level up: {} (+{})", self.state.level, gained);
            self.notices.push(
                Notice::new(
                    format!("🎉 لقد وصلت للمستوى {}!", self.state.level),
                    Severity::Success,
                )
                .delayed(LEVEL_UP_NOTICE_DELAY_MS),
            );
        }

        self.check_title_unlock();
        gained > 0
    }

    pub fn award_gold(&mut self, amount: u32) {
        self.state.gold = self.state.gold.saturating_add(amount);
        self.save();
        self.notices.success(format!("+{} 🏆 ذهب!", amount));
    }

    /// Apply a mini-game reward (XP first, then gold). Returns true on level-up.
    pub fn apply_reward(&mut self, reward: Reward) -> bool {
        let leveled = self.award_xp(reward.xp);
        self.award_gold(reward.gold);
        leveled
    }

    /// Unlock at most one new title once the level is past the threshold.
    pub fn check_title_unlock(&mut self) -> Option<&'static str> {
        if self.state.unlocked_titles.len() >= TITLES.len()
            || self.state.level <= TITLE_UNLOCK_MIN_LEVEL
        {
            return None;
        }

        let title = self.state.next_unclaimed_title()?;
        self.state.unlocked_titles.push(title.to_string());
        self.state.current_title_index = self.state.unlocked_titles.len() - 1;
        self.save();

        log::info!("Title unlocked: {}", title);
        self.notices
            .success(format!("🏆 لقد فتحت لقبًا جديدًا: {}!", title));
        Some(title)
    }

    /// Grant the daily reward once per calendar day. Returns false if already done.
    pub fn complete_daily_challenge(&mut self) -> bool {
        if self.state.daily_challenge_completed {
            return false;
        }
        self.state.daily_challenge_completed = true;
        log::info!("Daily challenge completed");
        self.award_xp(DAILY_XP);
        self.award_gold(DAILY_GOLD);
        self.save();
        true
    }

    /// Reset the daily challenge when the calendar day changed. Returns true on rollover.
    pub fn normalize_for_new_day(&mut self, today: &DayStamp) -> bool {
        if self.state.last_played_date.as_ref() == Some(today) {
            return false;
        }
        log::info!("New day: {}", today);
        self.state.daily_challenge_completed = false;
        self.state.last_played_date = Some(today.clone());
        self.save();
        true
    }

    /// Pick the avatar. Only allowed once.
    pub fn select_character(&mut self, choice: Character) -> Result<()> {
        if self.state.character.is_some() {
            return Err(Error::CharacterAlreadySelected);
        }
        self.state.character = Some(choice);
        self.save();
        log::info!("Character selected: {}", choice.as_str());
        Ok(())
    }
}
