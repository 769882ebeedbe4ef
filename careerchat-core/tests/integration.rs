//! Integration tests for the careerchat record-and-aggregate flow
//!
//! These tests run the full path from the chat facade into the
//! interaction log and back out through the analytics aggregator, over
//! a real (temp-file) SQLite database.

use careerchat_core::analytics::Aggregator;
use careerchat_core::chat::ChatService;
use careerchat_core::config::AnalyticsConfig;
use careerchat_core::db::Database;
use careerchat_core::faq::{FaqStore, FileFaqStore, NewFaq, SqliteFaqStore};
use careerchat_core::interactions::{InteractionLog, NewInteraction};
use careerchat_core::types::{Category, Period, UserType, ALL_CATEGORIES};
use chrono::Datelike;
use std::sync::Arc;
use tempfile::TempDir;

struct TestHarness {
    log: Arc<InteractionLog>,
    aggregator: Aggregator,
    _dir: TempDir,
}

fn harness() -> TestHarness {
    let dir = TempDir::new().unwrap();
    let db = Arc::new(Database::open(&dir.path().join("data.db")).unwrap());
    db.migrate().unwrap();

    let config = AnalyticsConfig::default();
    let log = Arc::new(InteractionLog::new(db, &config).unwrap());
    let aggregator = Aggregator::new(log.clone(), &config);

    TestHarness {
        log,
        aggregator,
        _dir: dir,
    }
}

fn current_period(log: &InteractionLog) -> Period {
    let now = chrono::Utc::now().with_timezone(&log.tz());
    Period::month(now.year(), now.month()).unwrap()
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

// ============================================
// Record-then-aggregate laws
// ============================================

#[test]
fn test_aggregates_agree_on_totals() {
    let h = harness();
    record(&h.log, "s1", UserType::User, "cv question", Category::CvCoverLetter);
    record(&h.log, "s1", UserType::User, "job question", Category::JobSearch);
    record(&h.log, "s2", UserType::Alumni, "cv question", Category::CvCoverLetter);

    let period = current_period(&h.log);

    let summary = h.aggregator.usage_summary(period).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.unique_sessions, 2);

    // Histogram buckets sum to the same total
    let histogram = h.aggregator.category_histogram(period).unwrap();
    let histogram_total: u64 = histogram.iter().map(|b| b.count).sum();
    assert_eq!(histogram_total, summary.total);

    // Daily series sums to the same total
    let series = h.aggregator.daily_usage(period).unwrap();
    let series_total: u64 = series.iter().map(|b| b.total_interactions).sum();
    assert_eq!(series_total, summary.total);
}

#[test]
fn test_aggregates_are_deterministic() {
    let h = harness();
    for i in 0..10 {
        record(
            &h.log,
            &format!("s{}", i % 3),
            if i % 2 == 0 { UserType::User } else { UserType::Alumni },
            &format!("question {}", i % 4),
            ALL_CATEGORIES[i % ALL_CATEGORIES.len()],
        );
    }

    let period = current_period(&h.log);
    let first = h.aggregator.usage_summary(period).unwrap();
    let second = h.aggregator.usage_summary(period).unwrap();
    assert_eq!(first, second);

    assert_eq!(
        h.aggregator.top_questions(period, None).unwrap(),
        h.aggregator.top_questions(period, None).unwrap()
    );
}

#[test]
fn test_period_isolation() {
    let h = harness();
    record(&h.log, "s1", UserType::User, "q", Category::General);

    // A different year sees nothing
    let other_year = Period::year(2001);
    let summary = h.aggregator.usage_summary(other_year).unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.unique_sessions, 0);
}

#[test]
fn test_recent_feed_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    let config = AnalyticsConfig::default();

    {
        let db = Arc::new(Database::open(&path).unwrap());
        db.migrate().unwrap();
        let log = InteractionLog::new(db, &config).unwrap();
        log.record(NewInteraction {
            session_id: "s1".to_string(),
            user_type: UserType::User,
            question: "persisted?".to_string(),
            answer: "yes".to_string(),
            category: Category::General,
        })
        .unwrap();
    }

    let db = Arc::new(Database::open(&path).unwrap());
    db.migrate().unwrap();
    let log = InteractionLog::new(db, &config).unwrap();
    let recent = log.recent(None).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].question, "persisted?");
}

// ============================================
// FAQ stores behave identically
// ============================================

fn faq_contract(store: &dyn FaqStore) {
    let a = store
        .add(NewFaq {
            questions: vec!["How do I book an appointment?".to_string()],
            answer: "Through the portal.".to_string(),
            category: Category::CareerGuidanceAppointment,
            common: false,
        })
        .unwrap();
    let b = store
        .add(NewFaq {
            questions: vec![
                "When are CV workshops?".to_string(),
                "CV workshop times?".to_string(),
            ],
            answer: "Every Tuesday.".to_string(),
            category: Category::WorkshopsEvents,
            common: false,
        })
        .unwrap();

    assert_eq!(store.list().unwrap().len(), 2);
    assert!(store.common().unwrap().is_empty());

    let toggled = store.toggle_common(b.id).unwrap();
    assert_eq!(toggled.questions.len(), 2);
    assert_eq!(toggled.common_questions.len(), 1);
    assert_eq!(toggled.common_questions[0].id, b.id);

    let updated = store
        .update(a.id, NewFaq {
            questions: vec!["How do I book a careers appointment?".to_string()],
            answer: "Through the student portal.".to_string(),
            category: Category::CareerGuidanceAppointment,
            common: false,
        })
        .unwrap();
    assert_eq!(updated.answer, "Through the student portal.");

    store.delete(a.id).unwrap();
    assert_eq!(store.list().unwrap().len(), 1);
    assert!(store.toggle_common(a.id).is_err());
}

#[test]
fn test_faq_contract_file_store() {
    let dir = TempDir::new().unwrap();
    let store = FileFaqStore::open(dir.path().join("faq.json")).unwrap();
    faq_contract(&store);
}

#[test]
fn test_faq_contract_sqlite_store() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    db.migrate().unwrap();
    let store = SqliteFaqStore::new(db);
    faq_contract(&store);
}

// ============================================
// Chat facade end to end (FAQ path; no model configured)
// ============================================

#[tokio::test]
async fn test_common_question_flow_feeds_analytics() {
    let dir = TempDir::new().unwrap();
    let db = Arc::new(Database::open(&dir.path().join("data.db")).unwrap());
    db.migrate().unwrap();

    let config = AnalyticsConfig::default();
    let log = Arc::new(InteractionLog::new(db.clone(), &config).unwrap());
    let aggregator = Aggregator::new(log.clone(), &config);
    let faq = Arc::new(SqliteFaqStore::new(db));

    let entry = faq
        .add(NewFaq {
            questions: vec!["Where can I find internships?".to_string()],
            answer: "Start with the internships board.".to_string(),
            category: Category::InternshipsVolunteering,
            common: false,
        })
        .unwrap();
    faq.toggle_common(entry.id).unwrap();

    let service = ChatService::new(log.clone(), faq, None);
    assert_eq!(service.common_questions().unwrap().len(), 1);

    let answer = service
        .answer_common("session-a", UserType::User, entry.id)
        .unwrap();
    assert_eq!(answer, "Start with the internships board.");

    let greeting = service.ask("session-b", UserType::Alumni, "hello").await.unwrap();
    assert!(!greeting.is_empty());

    let period = current_period(&log);
    let summary = aggregator.usage_summary(period).unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.users_count, 1);
    assert_eq!(summary.alumni_count, 1);
    assert_eq!(summary.unique_sessions, 2);

    let histogram = aggregator.category_histogram(period).unwrap();
    let internships = histogram
        .iter()
        .find(|b| b.category == Category::InternshipsVolunteering)
        .unwrap();
    assert_eq!(internships.count, 1);
}
