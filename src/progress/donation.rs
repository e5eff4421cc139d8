//! Donation ledger: spend gold on a cause, earn the donor title once

use serde::Serialize;

use super::engine::ProgressionEngine;
use super::state::DonationCategory;
use crate::consts::*;
use crate::error::{Error, Result};
use crate::notice::{Notice, Severity};

/// Result of a successful donation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Donation {
    pub category: DonationCategory,
    pub cost: u32,
    /// Count for this category after the donation
    pub count: u32,
    /// Set when this donation unlocked the donor title
    pub unlocked_title: Option<&'static str>,
}

impl ProgressionEngine {
    pub fn donation_count(&self, category: DonationCategory) -> u32 {
        self.state().donations.get(category)
    }

    /// Spend `cost` gold on `category`.
    ///
    /// Fails with `InsufficientFunds` (and an error notice) without touching
    /// any state when the balance is too low. A zero cost is rejected with
    /// `ZeroDonation` and no notice.
    pub fn donate(&mut self, category: DonationCategory, cost: u32) -> Result<Donation> {
        if cost == 0 {
            log::warn!("Ignoring zero-cost donation to {}", category.as_str());
            return Err(Error::ZeroDonation);
        }

        let balance = self.gold();
        if balance < cost {
            self.notices_mut()
                .error(format!("لا تملك ذهبًا كافيًا! تحتاج {} 🏆.", cost));
            return Err(Error::InsufficientFunds { cost, balance });
        }

        let state = self.state_mut();
        state.gold -= cost;
        let count = state.donations.increment(category);

        // First donation ever, across every category
        let unlocked_title = if state.donations.total() == 1 && !state.has_title(DONOR_TITLE) {
            state.unlocked_titles.push(DONOR_TITLE.to_string());
            state.current_title_index = state.unlocked_titles.len() - 1;
            Some(DONOR_TITLE)
        } else {
            None
        };

        self.save();
        log::info!(
            "Donated {} gold to {} (count {})",
            cost,
            category.as_str(),
            count
        );

        self.notices_mut().success(category.thank_you());
        if let Some(title) = unlocked_title {
            log::info!("Title unlocked: {}", title);
            self.notices_mut().push(
                Notice::new(format!("🏆 لقد فتحت لقبًا مميزًا: {}!", title), Severity::Success)
                    .delayed(DONOR_TITLE_NOTICE_DELAY_MS),
            );
        }

        Ok(Donation {
            category,
            cost,
            count,
            unlocked_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{self, MemoryStorage, PROGRESS_KEY, Storage};
    use crate::progress::ProgressState;

    fn engine_with_gold(gold: u32) -> ProgressionEngine {
        let state = ProgressState {
            gold,
            ..Default::default()
        };
        ProgressionEngine::with_state(state, Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_insufficient_funds_changes_nothing() {
        let mut e = engine_with_gold(50);
        let before = e.state().clone();

        let result = e.donate(DonationCategory::Mosque, 1000);
        assert!(matches!(
            result,
            Err(Error::InsufficientFunds {
                cost: 1000,
                balance: 50
            })
        ));
        assert_eq!(e.state(), &before);
        assert_eq!(e.notices().pending()[0].severity, Severity::Error);
        // Nothing was written
        assert_eq!(e.storage().get(PROGRESS_KEY).unwrap(), None);
    }

    #[test]
    fn test_zero_cost_changes_nothing() {
        let mut e = engine_with_gold(50);
        let before = e.state().clone();

        let result = e.donate(DonationCategory::Mosque, 0);
        assert!(matches!(result, Err(Error::ZeroDonation)));
        assert_eq!(e.state(), &before);
        assert!(!e.state().has_title(DONOR_TITLE));
        assert!(e.notices().is_empty());
        assert_eq!(e.storage().get(PROGRESS_KEY).unwrap(), None);

        // A real donation afterwards still earns the donor title
        let donation = e.donate(DonationCategory::Mosque, 10).unwrap();
        assert_eq!(donation.unlocked_title, Some(DONOR_TITLE));
    }

    #[test]
    fn test_exact_balance_is_affordable() {
        let mut e = engine_with_gold(30);
        let donation = e.donate(DonationCategory::Books, 30).unwrap();
        assert_eq!(donation.count, 1);
        assert_eq!(e.gold(), 0);
    }

    #[test]
    fn test_first_donation_unlocks_donor_title_once() {
        let mut e = engine_with_gold(500);

        let first = e.donate(DonationCategory::Poor, 50).unwrap();
        assert_eq!(first.unlocked_title, Some(DONOR_TITLE));
        assert_eq!(e.current_title(), DONOR_TITLE);
        assert_eq!(e.gold(), 450);

        let second = e.donate(DonationCategory::Mosque, 100).unwrap();
        assert_eq!(second.unlocked_title, None);
        let donor_count = e
            .unlocked_titles()
            .iter()
            .filter(|t| t.as_str() == DONOR_TITLE)
            .count();
        assert_eq!(donor_count, 1);
        assert_eq!(e.donation_count(DonationCategory::Poor), 1);
        assert_eq!(e.donation_count(DonationCategory::Mosque), 1);

        let saved: ProgressState = persistence::load_json(e.storage(), PROGRESS_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(saved.gold, 350);
        assert!(saved.has_title(DONOR_TITLE));
    }

    #[test]
    fn test_donor_title_notice_is_delayed() {
        let mut e = engine_with_gold(100);
        e.donate(DonationCategory::Books, 30).unwrap();
        let notices = e.notices().pending();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].message, DonationCategory::Books.thank_you());
        assert_eq!(notices[1].delay_ms, DONOR_TITLE_NOTICE_DELAY_MS);
    }

    #[test]
    fn test_level_titles_skip_donor_title() {
        let mut e = engine_with_gold(100);
        e.donate(DonationCategory::Books, 30).unwrap();

        e.state_mut().level = 10;
        let mut unlocked = Vec::new();
        while let Some(title) = e.check_title_unlock() {
            unlocked.push(title);
        }
        assert!(!unlocked.contains(&DONOR_TITLE));
        assert_eq!(e.unlocked_titles().len(), TITLES.len());
    }
}
