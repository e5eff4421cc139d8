//! Persisted player progress
//!
//! Field names serialize in camelCase so saves from earlier app versions load
//! as-is. Missing fields fall back to `Default`, unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::DayStamp;

/// Chosen avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    Boy,
    Girl,
}

impl Character {
    pub fn as_str(&self) -> &'static str {
        match self {
            Character::Boy => "boy",
            Character::Girl => "girl",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "boy" => Some(Character::Boy),
            "girl" => Some(Character::Girl),
            _ => None,
        }
    }

    pub fn avatar(&self) -> &'static str {
        match self {
            Character::Boy => "👦",
            Character::Girl => "👧",
        }
    }
}

/// Donation causes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationCategory {
    Mosque,
    Poor,
    Books,
}

impl DonationCategory {
    pub const ALL: [DonationCategory; 3] = [
        DonationCategory::Mosque,
        DonationCategory::Poor,
        DonationCategory::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationCategory::Mosque => "mosque",
            DonationCategory::Poor => "poor",
            DonationCategory::Books => "books",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mosque" => Some(DonationCategory::Mosque),
            "poor" => Some(DonationCategory::Poor),
            "books" => Some(DonationCategory::Books),
            _ => None,
        }
    }

    /// Price shown on the donation button
    pub fn suggested_cost(&self) -> u32 {
        match self {
            DonationCategory::Mosque => 100,
            DonationCategory::Poor => 50,
            DonationCategory::Books => 30,
        }
    }

    pub fn thank_you(&self) -> &'static str {
        match self {
            DonationCategory::Mosque => "شكرًا لك على تبرعك لبناء مسجد! نسأل الله أن يتقبله منك.",
            DonationCategory::Poor => "صدقة جارية! جزاك الله خيرًا على مساعدة إخوانك.",
            DonationCategory::Books => "نشر للعلم! بارك الله في علمك ومالك.",
        }
    }
}

/// Donation counts per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Donations {
    pub mosque: u32,
    pub poor: u32,
    pub books: u32,
}

impl Donations {
    pub fn get(&self, category: DonationCategory) -> u32 {
        match category {
            DonationCategory::Mosque => self.mosque,
            DonationCategory::Poor => self.poor,
            DonationCategory::Books => self.books,
        }
    }

    pub(crate) fn increment(&mut self, category: DonationCategory) -> u32 {
        let slot = match category {
            DonationCategory::Mosque => &mut self.mosque,
            DonationCategory::Poor => &mut self.poor,
            DonationCategory::Books => &mut self.books,
        };
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Donations across all categories
    pub fn total(&self) -> u32 {
        self.mosque
            .saturating_add(self.poor)
            .saturating_add(self.books)
    }
}

/// Everything that survives between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressState {
    /// Chosen once, never changed
    pub character: Option<Character>,
    /// XP into the current level (always below `xp_threshold()`)
    pub xp: u32,
    pub gold: u32,
    pub level: u32,
    /// Titles in unlock order; first is always `TITLES[0]`
    pub unlocked_titles: Vec<String>,
    /// Index into `unlocked_titles`
    pub current_title_index: usize,
    pub daily_challenge_completed: bool,
    /// Day of the last rollover check (`None` before the first one)
    pub last_played_date: Option<DayStamp>,
    pub donations: Donations,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            character: None,
            xp: 0,
            gold: STARTING_GOLD,
            level: 1,
            unlocked_titles: vec![TITLES[0].to_string()],
            current_title_index: 0,
            daily_challenge_completed: false,
            last_played_date: None,
            donations: Donations::default(),
        }
    }
}

impl ProgressState {
    /// XP required to finish the current level
    pub fn xp_threshold(&self) -> u32 {
        self.level.saturating_mul(XP_PER_LEVEL)
    }

    pub fn current_title(&self) -> &str {
        self.unlocked_titles
            .get(self.current_title_index)
            .map(String::as_str)
            .unwrap_or(TITLES[0])
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.unlocked_titles.iter().any(|t| t == title)
    }

    /// First catalog title not unlocked yet
    pub fn next_unclaimed_title(&self) -> Option<&'static str> {
        TITLES.iter().copied().find(|t| !self.has_title(t))
    }

    /// Move XP overflow into levels. Returns the number of levels gained.
    pub(crate) fn roll_levels(&mut self) -> u32 {
        let mut gained = 0;
        while self.xp >= self.xp_threshold() {
            self.xp -= self.xp_threshold();
            self.level = self.level.saturating_add(1);
            gained += 1;
        }
        gained
    }

    /// Repair a freshly loaded state so every invariant holds again
    pub fn sanitize(&mut self) {
        self.level = self.level.max(1);
        let gained = self.roll_levels();
        if gained > 0 {
            log::warn!("Loaded XP overflowed, rolled into {} level(s)", gained);
        }

        let mut titles: Vec<String> = Vec::with_capacity(TITLES.len());
        titles.push(TITLES[0].to_string());
        for title in self.unlocked_titles.drain(..) {
            if TITLES.contains(&title.as_str()) && !titles.contains(&title) {
                titles.push(title);
            }
        }
        self.unlocked_titles = titles;

        if self.current_title_index >= self.unlocked_titles.len() {
            self.current_title_index = self.unlocked_titles.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ProgressState::default();
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 0);
        assert_eq!(state.gold, STARTING_GOLD);
        assert_eq!(state.unlocked_titles, vec![TITLES[0].to_string()]);
        assert_eq!(state.current_title(), TITLES[0]);
        assert_eq!(state.xp_threshold(), 100);
    }

    #[test]
    fn test_partial_blob_merges_over_defaults() {
        let state: ProgressState =
            serde_json::from_str(r#"{"xp":40,"character":"girl","someFutureField":[1,2]}"#)
                .unwrap();
        assert_eq!(state.xp, 40);
        assert_eq!(state.character, Some(Character::Girl));
        assert_eq!(state.gold, STARTING_GOLD);
        assert_eq!(state.level, 1);
        assert_eq!(state.donations, Donations::default());
    }

    #[test]
    fn test_reads_legacy_shape() {
        let json = r#"{
            "character": "boy",
            "xp": 20,
            "gold": 120,
            "level": 3,
            "unlockedTitles": ["محب أهل البيت", "نور الزهراء"],
            "currentTitleIndex": 1,
            "dailyChallengeCompleted": true,
            "lastPlayedDate": "Sat Oct 17 2026",
            "donations": { "mosque": 1, "poor": 0, "books": 2 }
        }"#;
        let state: ProgressState = serde_json::from_str(json).unwrap();
        assert_eq!(state.character, Some(Character::Boy));
        assert_eq!(state.current_title(), TITLES[1]);
        assert_eq!(state.last_played_date, Some(DayStamp::new("Sat Oct 17 2026")));
        assert_eq!(state.donations.total(), 3);
    }

    #[test]
    fn test_sanitize_repairs_invariants() {
        let mut state = ProgressState {
            level: 0,
            xp: 250,
            unlocked_titles: vec![
                TITLES[2].to_string(),
                "not a title".to_string(),
                TITLES[2].to_string(),
            ],
            current_title_index: 9,
            ..Default::default()
        };
        state.sanitize();

        // level 0 -> 1, then 250 XP rolls: -100 (L2), -200 would need 200 -> stays
        assert_eq!(state.level, 2);
        assert_eq!(state.xp, 150);
        assert_eq!(
            state.unlocked_titles,
            vec![TITLES[0].to_string(), TITLES[2].to_string()]
        );
        assert_eq!(state.current_title_index, 1);
    }

    #[test]
    fn test_next_unclaimed_skips_owned_titles() {
        let mut state = ProgressState::default();
        state.unlocked_titles.push(TITLES[1].to_string());
        state.unlocked_titles.push(DONOR_TITLE.to_string());
        assert_eq!(state.next_unclaimed_title(), Some(TITLES[2]));

        state.unlocked_titles = TITLES.iter().map(|t| t.to_string()).collect();
        assert_eq!(state.next_unclaimed_title(), None);
    }

    #[test]
    fn test_donations_counting() {
        let mut donations = Donations::default();
        assert_eq!(donations.increment(DonationCategory::Books), 1);
        assert_eq!(donations.increment(DonationCategory::Books), 2);
        donations.increment(DonationCategory::Poor);
        assert_eq!(donations.get(DonationCategory::Books), 2);
        assert_eq!(donations.total(), 3);
    }

    #[test]
    fn test_category_parsing() {
        for category in DonationCategory::ALL {
            assert_eq!(DonationCategory::from_str(category.as_str()), Some(category));
        }
        assert_eq!(DonationCategory::from_str("Mosque"), Some(DonationCategory::Mosque));
        assert_eq!(DonationCategory::from_str("zoo"), None);
        assert_eq!(Character::from_str("GIRL"), Some(Character::Girl));
        assert!(
            DonationCategory::Books.suggested_cost() < DonationCategory::Mosque.suggested_cost()
        );
    }
}
