//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Calendar day stamps (daily challenge rollover)
//! - Clock-based RNG seeds

use serde::{Deserialize, Serialize};

/// A local calendar day, formatted like `"Sun Oct 18 2026"`.
///
/// Days are compared as strings, so only equality is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayStamp(String);

impl DayStamp {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DayStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Today's local calendar day (WASM)
#[cfg(target_arch = "wasm32")]
pub fn today() -> DayStamp {
    let date = js_sys::Date::new_0();
    DayStamp(String::from(date.to_date_string()))
}

/// Today's local calendar day (native)
#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> DayStamp {
    DayStamp(chrono::Local::now().format("%a %b %d %Y").to_string())
}

/// Seed for a fresh session RNG
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
