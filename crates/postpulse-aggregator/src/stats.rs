//! Per-day aggregate statistics over cleaned records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use postpulse_store::{DailyActivity, DailyEngagement, EngagementStats};

use crate::clean::Record;

/// Count posts per calendar day.
#[must_use]
pub fn daily_activity(records: &[Record]) -> DailyActivity {
    let mut counts = DailyActivity::new();
    for record in records {
        *counts.entry(record.date).or_insert(0) += 1;
    }
    counts
}

/// Mean likes and retweets per calendar day.
///
/// Only meaningful when the source dataset carried engagement columns;
/// callers decide whether to invoke this at all.
#[must_use]
pub fn daily_engagement(records: &[Record]) -> DailyEngagement {
    struct Accumulator {
        likes: f64,
        retweets: f64,
        posts: u64,
    }

    let mut sums: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for record in records {
        let entry = sums.entry(record.date).or_insert(Accumulator {
            likes: 0.0,
            retweets: 0.0,
            posts: 0,
        });
        entry.likes += record.likes;
        entry.retweets += record.retweets;
        entry.posts += 1;
    }

    sums.into_iter()
        .map(|(date, acc)| {
            #[allow(clippy::cast_precision_loss)]
            let posts = acc.posts as f64;
            (
                date,
                EngagementStats {
                    mean_likes: acc.likes / posts,
                    mean_retweets: acc.retweets / posts,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: (i32, u32, u32), likes: f64, retweets: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            text: String::new(),
            likes,
            retweets,
        }
    }

    #[test]
    fn counts_posts_per_day() {
        let records = vec![
            record((2023, 1, 15), 0.0, 0.0),
            record((2023, 1, 15), 0.0, 0.0),
            record((2023, 1, 16), 0.0, 0.0),
        ];

        let activity = daily_activity(&records);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[&NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()], 2);
        assert_eq!(activity[&NaiveDate::from_ymd_opt(2023, 1, 16).unwrap()], 1);
    }

    #[test]
    fn activity_total_matches_record_count() {
        let records = vec![
            record((2023, 3, 1), 0.0, 0.0),
            record((2023, 3, 2), 0.0, 0.0),
            record((2023, 3, 2), 0.0, 0.0),
            record((2023, 3, 5), 0.0, 0.0),
        ];

        let activity = daily_activity(&records);
        let total: u64 = activity.values().sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn engagement_means_per_day() {
        let day = (2023, 1, 15);
        let records = vec![
            record(day, 10.0, 1.0),
            record(day, 20.0, 2.0),
            record(day, 30.0, 3.0),
        ];

        let engagement = daily_engagement(&records);
        let stats = &engagement[&NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()];
        assert!((stats.mean_likes - 20.0).abs() < f64::EPSILON);
        assert!((stats.mean_retweets - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn engagement_groups_days_independently() {
        let records = vec![
            record((2023, 1, 15), 4.0, 0.0),
            record((2023, 1, 16), 8.0, 6.0),
            record((2023, 1, 16), 10.0, 2.0),
        ];

        let engagement = daily_engagement(&records);
        assert_eq!(engagement.len(), 2);
        let first = &engagement[&NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()];
        let second = &engagement[&NaiveDate::from_ymd_opt(2023, 1, 16).unwrap()];
        assert!((first.mean_likes - 4.0).abs() < f64::EPSILON);
        assert!((second.mean_likes - 9.0).abs() < f64::EPSILON);
        assert!((second.mean_retweets - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_yields_empty_maps() {
        assert!(daily_activity(&[]).is_empty());
        assert!(daily_engagement(&[]).is_empty());
    }
}
