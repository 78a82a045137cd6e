//! Usage statistics: account age and diary totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mood-event counts keyed by mood name, as served under `mood_stats.all`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodStats {
    #[serde(default)]
    pub all: BTreeMap<String, u32>,
}

impl MoodStats {
    /// Total diary count: sum of every mood bucket.
    pub fn total_entries(&self) -> u32 {
        self.all.values().sum()
    }
}

/// Aggregate usage statistics driving growth and bloom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Days since account creation. Clamped to at least 1 on access.
    #[serde(default = "default_service_days")]
    pub service_days: u32,
    /// Per-mood entry counts; absent means zero diaries.
    #[serde(default)]
    pub mood_stats: Option<MoodStats>,
}

fn default_service_days() -> u32 {
    1
}

impl Default for UsageStats {
    fn default() -> Self {
        Self {
            service_days: 1,
            mood_stats: None,
        }
    }
}

impl UsageStats {
    /// Construct from raw values (test and builder convenience).
    pub fn new(service_days: u32, total_diaries: u32) -> Self {
        let mut all = BTreeMap::new();
        if total_diaries > 0 {
            all.insert("all".to_string(), total_diaries);
        }
        Self {
            service_days,
            mood_stats: Some(MoodStats { all }),
        }
    }

    /// Service days, never below 1.
    pub fn service_days(&self) -> u32 {
        self.service_days.max(1)
    }

    /// Total diary count across all mood buckets; 0 when stats are absent.
    pub fn total_diaries(&self) -> u32 {
        self.mood_stats
            .as_ref()
            .map(MoodStats::total_entries)
            .unwrap_or(0)
    }
}
