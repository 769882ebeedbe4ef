//! Dashboard aggregates computed from the interaction log
//!
//! Each aggregate takes a period window, pulls the matching slice of the
//! log, and folds it in memory. The log is the single source of truth:
//! re-running any aggregate over the same window gives the same answer.

use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::interactions::InteractionLog;
use crate::types::{
    CategoryCount, DailyUsage, Interaction, Period, QuestionCount, UsageSummary, UserType,
    ALL_CATEGORIES,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Read-only analytics facade over the interaction log
pub struct Aggregator {
    log: Arc<InteractionLog>,
    top_n: usize,
}

impl Aggregator {
    pub fn new(log: Arc<InteractionLog>, analytics: &AnalyticsConfig) -> Self {
        Self {
            log,
            top_n: analytics.top_n,
        }
    }

    /// Interactions per category for the pie chart.
    ///
    /// Every category appears in the output, zero-count buckets included,
    /// in the fixed display order.
    pub fn category_histogram(&self, period: Period) -> Result<Vec<CategoryCount>> {
        let interactions = self.log.query_by_period(period)?;

        let mut counts: HashMap<_, u64> = HashMap::new();
        for i in &interactions {
            *counts.entry(i.category).or_insert(0) += 1;
        }

        Ok(ALL_CATEGORIES
            .iter()
            .map(|&category| CategoryCount {
                category,
                count: counts.get(&category).copied().unwrap_or(0),
            })
            .collect())
    }

    /// Headline usage numbers: distinct sessions plus the user/alumni split
    pub fn usage_summary(&self, period: Period) -> Result<UsageSummary> {
        let interactions = self.log.query_by_period(period)?;

        let mut sessions = HashSet::new();
        let mut users_count = 0u64;
        let mut alumni_count = 0u64;

        for i in &interactions {
            if !i.session_id.is_empty() {
                sessions.insert(i.session_id.as_str());
            }
            match i.user_type {
                UserType::User => users_count += 1,
                UserType::Alumni => alumni_count += 1,
            }
        }

        Ok(UsageSummary {
            unique_sessions: sessions.len() as u64,
            users_count,
            alumni_count,
            total: users_count + alumni_count,
        })
    }

    /// Per-day activity for the bar chart. Month is required; the series
    /// covers every day of the month, zero-filled where nothing happened.
    pub fn daily_usage(&self, period: Period) -> Result<Vec<DailyUsage>> {
        let days = period.days_in_month().ok_or_else(|| {
            Error::InvalidPeriod("daily usage requires a month".to_string())
        })?;

        let interactions = self.log.query_by_period(period)?;
        let tz = self.log.tz();

        let mut per_day: HashMap<u32, (HashSet<&str>, u64)> = HashMap::new();
        for i in &interactions {
            let day = Period::local_day(i.created_at, tz);
            let bucket = per_day.entry(day).or_default();
            if !i.session_id.is_empty() {
                bucket.0.insert(i.session_id.as_str());
            }
            bucket.1 += 1;
        }

        Ok((1..=days)
            .map(|day| {
                let (sessions, total) = per_day
                    .get(&day)
                    .map(|(s, t)| (s.len() as u64, *t))
                    .unwrap_or((0, 0));
                DailyUsage {
                    day,
                    unique_sessions: sessions,
                    total_interactions: total,
                }
            })
            .collect())
    }

    /// Most-asked questions in the period, normalized by trim + lowercase.
    ///
    /// Sorted by count descending; ties keep first-seen order. `top_n`
    /// falls back to the configured default (5).
    pub fn top_questions(&self, period: Period, top_n: Option<usize>) -> Result<Vec<QuestionCount>> {
        let interactions = self.log.query_by_period(period)?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for i in &interactions {
            let normalized = i.question.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            if !counts.contains_key(&normalized) {
                order.push(normalized.clone());
            }
            *counts.entry(normalized).or_insert(0) += 1;
        }

        let mut rows: Vec<QuestionCount> = order
            .into_iter()
            .map(|question| {
                let count = counts[&question];
                QuestionCount { question, count }
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows.truncate(top_n.unwrap_or(self.top_n));
        Ok(rows)
    }

    /// The raw recent-interactions feed for the dashboard table
    pub fn recent_interactions(&self, limit: Option<usize>) -> Result<Vec<Interaction>> {
        self.log.recent(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::interactions::NewInteraction;
    use crate::types::Category;
    use chrono::Datelike;

    fn test_aggregator() -> (Aggregator, Arc<InteractionLog>, Period) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.migrate().unwrap();
        let config = AnalyticsConfig::default();
        let log = Arc::new(InteractionLog::new(db, &config).unwrap());
        let agg = Aggregator::new(log.clone(), &config);

        let now = chrono::Utc::now().with_timezone(&log.tz());
        let period = Period::month(now.year(), now.month()).unwrap();
        (agg, log, period)
    }

    fn record(log: &InteractionLog, session: &str, user_type: UserType, question: &str, category: Category) {
        log.record(NewInteraction {
            session_id: session.to_string(),
            user_type,
            question: question.to_string(),
            answer: "answer".to_string(),
            category,
        })
        .unwrap();
    }

    #[test]
    fn test_histogram_includes_zero_buckets() {
        let (agg, log, period) = test_aggregator();
        record(&log, "s1", UserType::User, "cv help", Category::CvCoverLetter);
        record(&log, "s2", UserType::User, "cv help again", Category::CvCoverLetter);

        let histogram = agg.category_histogram(period).unwrap();
        assert_eq!(histogram.len(), ALL_CATEGORIES.len());
        assert_eq!(histogram[0].category, Category::CvCoverLetter);
        assert_eq!(histogram[0].count, 2);
        assert!(histogram.iter().skip(1).all(|b| b.count == 0));
    }

    #[test]
    fn test_usage_summary_partitions_and_totals() {
        let (agg, log, period) = test_aggregator();
        record(&log, "s1", UserType::User, "q1", Category::General);
        record(&log, "s1", UserType::User, "q2", Category::General);
        record(&log, "s2", UserType::Alumni, "q3", Category::General);

        let summary = agg.usage_summary(period).unwrap();
        assert_eq!(summary.unique_sessions, 2);
        assert_eq!(summary.users_count, 2);
        assert_eq!(summary.alumni_count, 1);
        assert_eq!(summary.total, summary.users_count + summary.alumni_count);
    }

    #[test]
    fn test_daily_usage_zero_filled() {
        let (agg, log, period) = test_aggregator();
        record(&log, "s1", UserType::User, "q1", Category::General);
        record(&log, "s2", UserType::User, "q2", Category::General);

        let series = agg.daily_usage(period).unwrap();
        assert_eq!(series.len(), period.days_in_month().unwrap() as usize);
        // Days are 1..=N in order
        for (i, bucket) in series.iter().enumerate() {
            assert_eq!(bucket.day, (i + 1) as u32);
        }
        let today = Period::local_day(chrono::Utc::now(), log.tz());
        let bucket = &series[(today - 1) as usize];
        assert_eq!(bucket.total_interactions, 2);
        assert_eq!(bucket.unique_sessions, 2);
    }

    #[test]
    fn test_daily_usage_requires_month() {
        let (agg, _log, _period) = test_aggregator();
        assert!(matches!(
            agg.daily_usage(Period::year(2025)),
            Err(Error::InvalidPeriod(_))
        ));
    }

    #[test]
    fn test_top_questions_normalizes_and_ranks() {
        let (agg, log, period) = test_aggregator();
        record(&log, "s1", UserType::User, "How do I write a CV?", Category::CvCoverLetter);
        record(&log, "s2", UserType::User, "  how do i write a cv?  ", Category::CvCoverLetter);
        record(&log, "s3", UserType::User, "Where are the workshops?", Category::WorkshopsEvents);

        let top = agg.top_questions(period, None).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].question, "how do i write a cv?");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].count, 1);
    }

    #[test]
    fn test_top_questions_respects_limit() {
        let (agg, log, period) = test_aggregator();
        for i in 0..8 {
            record(&log, "s1", UserType::User, &format!("question {}", i), Category::General);
        }
        assert_eq!(agg.top_questions(period, None).unwrap().len(), 5);
        assert_eq!(agg.top_questions(period, Some(3)).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_period_yields_empty_aggregates() {
        let (agg, _log, _period) = test_aggregator();
        let past = Period::month(2001, 6).unwrap();

        let summary = agg.usage_summary(past).unwrap();
        assert_eq!(summary, UsageSummary::default());
        assert!(agg.top_questions(past, None).unwrap().is_empty());
        let series = agg.daily_usage(past).unwrap();
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|b| b.total_interactions == 0));
    }
}
