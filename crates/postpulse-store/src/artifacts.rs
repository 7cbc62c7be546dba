//! Typed shapes of the three artifact files.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `daily_activity.json`: ISO date → post count. `BTreeMap` keeps the keys
/// in ascending date order, both in memory and in the serialized file.
pub type DailyActivity = BTreeMap<NaiveDate, u64>;

/// `daily_engagement.json`: ISO date → per-day engagement means.
pub type DailyEngagement = BTreeMap<NaiveDate, EngagementStats>;

/// `most_common_terms.json`: `[term, count]` pairs, descending by count,
/// at most the top-term limit of entries.
pub type TermFrequencies = Vec<(String, u64)>;

/// Arithmetic means of the engagement counts over one day's posts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub mean_likes: f64,
    pub mean_retweets: f64,
}

/// Everything one aggregator run produces.
///
/// `engagement` is `None` when the source dataset lacks either engagement
/// column; the run is still complete in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    pub activity: DailyActivity,
    pub engagement: Option<DailyEngagement>,
    pub terms: TermFrequencies,
}
