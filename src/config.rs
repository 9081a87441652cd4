use std::ops::RangeInclusive;

use serde::Deserialize;

/// Totals the dealer may be told to stand on.
pub const DEALER_STAND_RANGE: RangeInclusive<u8> = 17..=21;

fn default_dealer_stands_on() -> u8 {
    17
}

fn default_pace_ms() -> u32 {
    1_000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    /// Dealer draws below this total, soft or hard.
    #[serde(default = "default_dealer_stands_on")]
    pub dealer_stands_on: u8,
    /// Delay the page should leave between dealer draws.
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u32,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            seed: None,
            dealer_stands_on: default_dealer_stands_on(),
            pace_ms: default_pace_ms(),
            log_level: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !DEALER_STAND_RANGE.contains(&self.dealer_stands_on) {
            return Err(format!(
                "dealerStandsOn must be between {} and {}, got {}",
                DEALER_STAND_RANGE.start(),
                DEALER_STAND_RANGE.end(),
                self.dealer_stands_on
            ));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::LevelFilter::Info)
    }
}
