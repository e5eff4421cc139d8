//! Player progression
//!
//! `ProgressionEngine` owns the persisted `ProgressState` and applies every
//! reward, unlock and donation to it.

pub mod donation;
pub mod engine;
pub mod state;

pub use donation::Donation;
pub use engine::ProgressionEngine;
pub use state::{Character, DonationCategory, Donations, ProgressState};
