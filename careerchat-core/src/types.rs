//! Core domain types for careerchat
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Interaction** | One logged chatbot question/answer exchange |
//! | **Session id** | Opaque UUID from the `anon_sid` cookie; correlates chat turns without identifying anyone |
//! | **FAQ entry** | A curated question/answer record; `common = true` entries surface as quick suggestions |
//! | **Period** | A calendar year or year+month window in the service timezone |
//!
//! The interaction log is append-only: once written, a record is never
//! updated or deleted, so every type here that describes an interaction is
//! a snapshot taken at write time.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================
// User type
// ============================================

/// Who is talking to the chatbot.
///
/// Supplied by the client; anything unrecognized falls back to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    User,
    Alumni,
}

impl UserType {
    /// Identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::User => "user",
            UserType::Alumni => "alumni",
        }
    }

    /// Parse a client-supplied label, defaulting to `User`
    pub fn from_label(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some("alumni") => UserType::Alumni,
            _ => UserType::User,
        }
    }
}

impl Default for UserType {
    fn default() -> Self {
        UserType::User
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserType::User),
            "alumni" => Ok(UserType::Alumni),
            _ => Err(format!("unknown user type: {}", s)),
        }
    }
}

// ============================================
// Category
// ============================================

/// Closed set of question categories.
///
/// Categories are stored and compared as the enum, never as free text, so
/// histogram buckets cannot drift on case or whitespace. Interaction writes
/// fold unknown labels to `General` (the category is a snapshot from the
/// model); FAQ writes reject unknown labels outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    CvCoverLetter,
    InternshipsVolunteering,
    JobSearch,
    CareerGuidanceAppointment,
    WorkshopsEvents,
    General,
}

/// Every category, in display order
pub const ALL_CATEGORIES: [Category; 6] = [
    Category::CvCoverLetter,
    Category::InternshipsVolunteering,
    Category::JobSearch,
    Category::CareerGuidanceAppointment,
    Category::WorkshopsEvents,
    Category::General,
];

impl Category {
    /// The display label, also used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CvCoverLetter => "CV & Cover Letter",
            Category::InternshipsVolunteering => "Internships & Volunteering",
            Category::JobSearch => "Job Search",
            Category::CareerGuidanceAppointment => "Career Guidance & Appointment",
            Category::WorkshopsEvents => "Workshops & Events",
            Category::General => "General",
        }
    }

    /// Strict parse; unknown labels are an error
    pub fn from_label(s: &str) -> Result<Self> {
        match s.trim() {
            "CV & Cover Letter" => Ok(Category::CvCoverLetter),
            "Internships & Volunteering" => Ok(Category::InternshipsVolunteering),
            "Job Search" => Ok(Category::JobSearch),
            "Career Guidance & Appointment" => Ok(Category::CareerGuidanceAppointment),
            "Workshops & Events" => Ok(Category::WorkshopsEvents),
            "General" => Ok(Category::General),
            other => Err(Error::Validation(format!("unknown category: {}", other))),
        }
    }

    /// Lenient parse for interaction snapshots: empty or unknown folds to `General`
    pub fn from_label_lossy(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some(label) if !label.is_empty() => {
                Category::from_label(label).unwrap_or(Category::General)
            }
            _ => Category::General,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Category::from_label(&s).map_err(|e| e.to_string())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> String {
        c.as_str().to_string()
    }
}

// ============================================
// Interactions
// ============================================

/// One logged chatbot exchange (append-only; immutable once written)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique identifier (UUID v4, assigned at write time)
    pub id: String,
    /// Anonymous session id from the `anon_sid` cookie
    pub session_id: String,
    /// Who asked
    pub user_type: UserType,
    /// The question as asked (trimmed)
    pub question: String,
    /// The answer that was returned
    pub answer: String,
    /// Category snapshot at answer time
    pub category: Category,
    /// Server-assigned write timestamp; never mutated
    pub created_at: DateTime<Utc>,
}

// ============================================
// FAQ entries
// ============================================

/// A curated question/answer record in the FAQ dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Unique within the store
    pub id: i64,
    /// Phrasings that map to the same answer
    pub questions: Vec<String>,
    /// The canned answer
    pub answer: String,
    /// Category from the closed set
    pub category: Category,
    /// Whether this entry surfaces as a quick suggestion on the chat home screen
    pub common: bool,
}

/// Both partitions after a toggle, for the dashboard to swap in wholesale
#[derive(Debug, Clone, Serialize)]
pub struct ToggledFaq {
    /// Full entry list after the toggle
    pub questions: Vec<FaqEntry>,
    /// The `common = true` subset
    pub common_questions: Vec<FaqEntry>,
}

// ============================================
// Periods
// ============================================

/// A calendar-year or calendar-month window.
///
/// Month is 1-12 only; the legacy 0-11 convention is rejected at
/// construction. Bounds are half-open `[start, end)` at local midnight in
/// the service timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: i32,
    month: Option<u32>,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidPeriod(format!(
                "month must be 1-12, got {}",
                month
            )));
        }
        Ok(Self {
            year,
            month: Some(month),
        })
    }

    pub fn new(year: i32, month: Option<u32>) -> Result<Self> {
        match month {
            Some(m) => Self::month(year, m),
            None => Ok(Self::year(year)),
        }
    }

    pub fn year_value(&self) -> i32 {
        self.year
    }

    pub fn month_value(&self) -> Option<u32> {
        self.month
    }

    /// Number of days in the queried month (requires a month)
    pub fn days_in_month(&self) -> Option<u32> {
        let month = self.month?;
        let (next_y, next_m) = if month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, month + 1)
        };
        let first = chrono::NaiveDate::from_ymd_opt(self.year, month, 1)?;
        let next = chrono::NaiveDate::from_ymd_opt(next_y, next_m, 1)?;
        Some((next - first).num_days() as u32)
    }

    /// Half-open `[start, end)` bounds in UTC, computed at local midnight in `tz`.
    ///
    /// DST transitions at midnight resolve to the earliest valid instant.
    pub fn bounds(&self, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let local_midnight = |y: i32, m: u32| -> Result<DateTime<Utc>> {
            tz.with_ymd_and_hms(y, m, 1, 0, 0, 0)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| {
                    Error::InvalidPeriod(format!("no valid midnight for {}-{:02}", y, m))
                })
        };

        match self.month {
            Some(m) => {
                let start = local_midnight(self.year, m)?;
                let end = if m == 12 {
                    local_midnight(self.year + 1, 1)?
                } else {
                    local_midnight(self.year, m + 1)?
                };
                Ok((start, end))
            }
            None => {
                let start = local_midnight(self.year, 1)?;
                let end = local_midnight(self.year + 1, 1)?;
                Ok((start, end))
            }
        }
    }

    /// Calendar day-of-month of `ts` in `tz` (for day bucketing)
    pub fn local_day(ts: DateTime<Utc>, tz: Tz) -> u32 {
        ts.with_timezone(&tz).day()
    }
}

// ============================================
// Derived aggregates (never persisted)
// ============================================

/// One pie-chart bucket: interactions per category in a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: Category,
    pub count: u64,
}

/// Headline usage numbers for a period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    /// Cardinality of distinct non-empty session ids
    pub unique_sessions: u64,
    pub users_count: u64,
    pub alumni_count: u64,
    /// Always `users_count + alumni_count`
    pub total: u64,
}

/// One bar-chart bucket: activity on a single calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsage {
    /// Day of month, 1-based
    pub day: u32,
    pub unique_sessions: u64,
    pub total_interactions: u64,
}

/// One row of the top-questions table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCount {
    /// Trimmed, lower-cased question text
    pub question: String,
    pub count: u64,
}
