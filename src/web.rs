//! Browser bindings
//!
//! Exposes `App` to the page through wasm-bindgen. Arguments are primitives
//! and results are JSON strings; the page owns all DOM work.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::persistence::{LocalStorage, MemoryStorage, Storage};
use crate::platform;
use crate::progress::{Character, DonationCategory};
use crate::settings::{Pace, Settings};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialized if the module is started twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Ahlulbayt Heroes starting...");
}

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize: {}", e);
            "null".to_string()
        }
    }
}

#[wasm_bindgen]
pub struct WebApp {
    app: App,
}

#[wasm_bindgen]
impl WebApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebApp {
        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}; progress will not be kept", e);
                Box::new(MemoryStorage::new())
            }
        };
        let app = App::new(storage, &platform::today(), platform::clock_seed());
        WebApp { app }
    }

    /// Current display values (JSON `Snapshot`)
    pub fn snapshot(&self) -> String {
        to_json(&self.app.snapshot())
    }

    /// Queued notices, oldest first (JSON array of `Notice`)
    pub fn drain_notices(&mut self) -> String {
        to_json(&self.app.drain_notices())
    }

    /// Current settings (JSON `Settings`)
    pub fn settings(&self) -> String {
        to_json(self.app.settings())
    }

    /// `"relaxed"`, `"normal"` or `"brisk"`. False if unknown.
    pub fn set_pace(&mut self, pace: &str) -> bool {
        let Some(pace) = Pace::from_str(pace) else {
            log::warn!("Unknown pace: {}", pace);
            return false;
        };
        let settings = Settings {
            pace,
            ..self.app.settings().clone()
        };
        self.app.update_settings(settings);
        true
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        let settings = Settings {
            reduced_motion,
            ..self.app.settings().clone()
        };
        self.app.update_settings(settings);
    }

    pub fn notice_duration_ms(&self) -> u32 {
        self.app.settings().effective_notice_duration_ms()
    }

    pub fn has_character(&self) -> bool {
        self.app.has_character()
    }

    /// `"boy"` or `"girl"`. False if unknown or already chosen.
    pub fn select_character(&mut self, choice: &str) -> bool {
        let Some(character) = Character::from_str(choice) else {
            log::warn!("Unknown character: {}", choice);
            return false;
        };
        match self.app.select_character(character) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Re-check the calendar day (call on focus/visibility change)
    pub fn refresh_day(&mut self) -> bool {
        self.app.start_new_day(&platform::today())
    }

    pub fn complete_daily_challenge(&mut self) -> bool {
        self.app.complete_daily_challenge()
    }

    /// JSON `FlipOutcome`
    pub fn flip_card(&mut self, pos: usize) -> String {
        to_json(&self.app.flip_card(pos))
    }

    pub fn hide_mismatch(&mut self) -> bool {
        self.app.hide_mismatch()
    }

    pub fn memory_bonus_delay_ms(&self) -> u32 {
        self.app.memory_bonus_delay_ms()
    }

    pub fn claim_memory_bonus(&mut self) -> bool {
        self.app.claim_memory_bonus().is_some()
    }

    pub fn reset_memory(&mut self) {
        self.app.reset_memory();
    }

    /// JSON `SelectOutcome`
    pub fn select_tile(&mut self, pos: usize) -> String {
        to_json(&self.app.select_tile(pos))
    }

    pub fn settle_puzzle(&mut self) -> bool {
        self.app.settle_puzzle().is_some()
    }

    pub fn reset_puzzle(&mut self) {
        self.app.reset_puzzle();
    }

    pub fn next_letter(&mut self) -> String {
        to_json(self.app.next_letter())
    }

    /// Price for a category's donate button (0 if unknown)
    pub fn suggested_cost(&self, category: &str) -> u32 {
        DonationCategory::from_str(category)
            .map(|c| c.suggested_cost())
            .unwrap_or(0)
    }

    /// False (with an error notice queued) when gold is short
    pub fn donate(&mut self, category: &str, cost: u32) -> bool {
        let Some(category) = DonationCategory::from_str(category) else {
            log::warn!("Unknown donation category: {}", category);
            return false;
        };
        self.app.donate(category, cost).is_ok()
    }
}

impl Default for WebApp {
    fn default() -> Self {
        Self::new()
    }
}
