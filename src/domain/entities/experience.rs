use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::AppError;

// ───── Constants ──────────────────────────────────────────────────────
pub const ANONYMOUS_PLACEHOLDER: &str = "Anonymous";
const MIN_NARRATIVE_LENGTH: u64 = 10;

// ───── Status ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExperienceStatus {
    Pending,
    Approved,
    Rejected,
}

impl ExperienceStatus {
    pub const ALL: [ExperienceStatus; 3] = [
        ExperienceStatus::Pending,
        ExperienceStatus::Approved,
        ExperienceStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceStatus::Pending => "pending",
            ExperienceStatus::Approved => "approved",
            ExperienceStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ExperienceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperienceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ExperienceStatus::Pending),
            "approved" => Ok(ExperienceStatus::Approved),
            "rejected" => Ok(ExperienceStatus::Rejected),
            other => Err(AppError::BadRequest(format!("Invalid status: {}", other))),
        }
    }
}

/// Status selector for the admin listing: `all` or a single status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ExperienceStatus),
}

impl StatusFilter {
    pub fn as_status(&self) -> Option<ExperienceStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(StatusFilter::All),
            raw if raw.eq_ignore_ascii_case("all") => Ok(StatusFilter::All),
            raw => raw.parse().map(StatusFilter::Only),
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewDate {
    pub label: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InterviewExperience {
    pub id: Uuid,
    pub student_name: String,
    pub linkedin_url: String,
    pub company: String,
    pub position: String,
    pub interview_dates: Json<Vec<InterviewDate>>,
    pub phone_screens: i32,
    pub technical_interviews: i32,
    pub behavioral_interviews: i32,
    pub other_interviews: i32,
    pub interview_questions: String,
    pub advice_tips: String,
    pub is_anonymous: bool,
    pub status: ExperienceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewExperience {
    pub fn is_public(&self) -> bool {
        self.status == ExperienceStatus::Approved
    }
}

/// A validated submission ready for insertion. Always starts out pending.
#[derive(Debug, Clone)]
pub struct ExperienceInsert {
    pub student_name: String,
    pub linkedin_url: String,
    pub company: String,
    pub position: String,
    pub interview_dates: Vec<InterviewDate>,
    pub phone_screens: i32,
    pub technical_interviews: i32,
    pub behavioral_interviews: i32,
    pub other_interviews: i32,
    pub interview_questions: String,
    pub advice_tips: String,
    pub is_anonymous: bool,
    pub status: ExperienceStatus,
}

// ───── API Response Models ──────────────────────────────────────────

/// Public view of an approved experience, with identity masked when anonymous.
#[derive(Debug, Serialize)]
pub struct PublicExperience {
    pub id: Uuid,
    pub student_name: String,
    pub linkedin_url: String,
    pub company: String,
    pub position: String,
    pub interview_dates: Vec<InterviewDate>,
    pub phone_screens: i32,
    pub technical_interviews: i32,
    pub behavioral_interviews: i32,
    pub other_interviews: i32,
    pub interview_questions: String,
    pub advice_tips: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl From<InterviewExperience> for PublicExperience {
    fn from(exp: InterviewExperience) -> Self {
        let (student_name, linkedin_url) = if exp.is_anonymous {
            (ANONYMOUS_PLACEHOLDER.to_string(), String::new())
        } else {
            (exp.student_name, exp.linkedin_url)
        };

        PublicExperience {
            id: exp.id,
            student_name,
            linkedin_url,
            company: exp.company,
            position: exp.position,
            interview_dates: exp.interview_dates.0,
            phone_screens: exp.phone_screens,
            technical_interviews: exp.technical_interviews,
            behavioral_interviews: exp.behavioral_interviews,
            other_interviews: exp.other_interviews,
            interview_questions: exp.interview_questions,
            advice_tips: exp.advice_tips,
            is_anonymous: exp.is_anonymous,
            created_at: exp.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub total: i64,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Untrusted public submission payload.
///
/// Every field has a serde default so that missing values surface as field
/// violations instead of a payload error, letting the caller show all of them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct NewSubmission {
    #[serde(default)]
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: String,

    #[serde(default)]
    #[validate(
        url(message = "Must be a valid LinkedIn URL"),
        contains(pattern = "linkedin.com", message = "Must be a LinkedIn URL")
    )]
    pub linkedin_url: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,

    #[serde(default)]
    pub interview_dates: Vec<InterviewDate>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Must be zero or more"))]
    pub phone_screens: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "Must be zero or more"))]
    pub technical_interviews: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "Must be zero or more"))]
    pub behavioral_interviews: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "Must be zero or more"))]
    pub other_interviews: i32,

    #[serde(default)]
    #[validate(length(
        min = MIN_NARRATIVE_LENGTH,
        message = "Please provide interview questions (minimum 10 characters)"
    ))]
    pub interview_questions: String,

    #[serde(default)]
    #[validate(length(
        min = MIN_NARRATIVE_LENGTH,
        message = "Please provide advice/tips (minimum 10 characters)"
    ))]
    pub advice_tips: String,

    #[serde(default)]
    pub is_anonymous: bool,

    #[serde(default)]
    #[validate(custom(function = "validate_consent"))]
    pub consent_given: bool,
}

impl NewSubmission {
    fn normalize(&mut self) {
        trim_in_place(&mut self.student_name);
        trim_in_place(&mut self.linkedin_url);
        trim_in_place(&mut self.company);
        trim_in_place(&mut self.position);
        trim_in_place(&mut self.interview_questions);
        trim_in_place(&mut self.advice_tips);
        trim_dates(&mut self.interview_dates);
    }
}

impl TryFrom<NewSubmission> for ExperienceInsert {
    type Error = AppError;

    /// Normalizes and validates the payload. `consent_given` is checked here
    /// and then dropped: it never reaches the store.
    fn try_from(mut submission: NewSubmission) -> Result<Self, Self::Error> {
        submission.normalize();
        submission.validate()?;

        Ok(ExperienceInsert {
            student_name: submission.student_name,
            linkedin_url: submission.linkedin_url,
            company: submission.company,
            position: submission.position,
            interview_dates: submission.interview_dates,
            phone_screens: submission.phone_screens,
            technical_interviews: submission.technical_interviews,
            behavioral_interviews: submission.behavioral_interviews,
            other_interviews: submission.other_interviews,
            interview_questions: submission.interview_questions,
            advice_tips: submission.advice_tips,
            is_anonymous: submission.is_anonymous,
            status: ExperienceStatus::Pending,
        })
    }
}

/// Partial set of field values applied by a moderator edit.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ExperienceChanges {
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: Option<String>,

    #[validate(
        url(message = "Must be a valid LinkedIn URL"),
        contains(pattern = "linkedin.com", message = "Must be a LinkedIn URL")
    )]
    pub linkedin_url: Option<String>,

    #[validate(length(min = 1, message = "Company name is required"))]
    pub company: Option<String>,

    #[validate(length(min = 1, message = "Position is required"))]
    pub position: Option<String>,

    pub interview_dates: Option<Vec<InterviewDate>>,

    #[validate(range(min = 0, message = "Must be zero or more"))]
    pub phone_screens: Option<i32>,

    #[validate(range(min = 0, message = "Must be zero or more"))]
    pub technical_interviews: Option<i32>,

    #[validate(range(min = 0, message = "Must be zero or more"))]
    pub behavioral_interviews: Option<i32>,

    #[validate(range(min = 0, message = "Must be zero or more"))]
    pub other_interviews: Option<i32>,

    #[validate(length(
        min = MIN_NARRATIVE_LENGTH,
        message = "Please provide interview questions (minimum 10 characters)"
    ))]
    pub interview_questions: Option<String>,

    #[validate(length(
        min = MIN_NARRATIVE_LENGTH,
        message = "Please provide advice/tips (minimum 10 characters)"
    ))]
    pub advice_tips: Option<String>,

    pub is_anonymous: Option<bool>,

    pub status: Option<ExperienceStatus>,
}

impl ExperienceChanges {
    pub fn status_only(status: ExperienceStatus) -> Self {
        ExperienceChanges {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.student_name.is_none()
            && self.linkedin_url.is_none()
            && self.company.is_none()
            && self.position.is_none()
            && self.interview_dates.is_none()
            && self.phone_screens.is_none()
            && self.technical_interviews.is_none()
            && self.behavioral_interviews.is_none()
            && self.other_interviews.is_none()
            && self.interview_questions.is_none()
            && self.advice_tips.is_none()
            && self.is_anonymous.is_none()
            && self.status.is_none()
    }

    pub fn normalize(&mut self) {
        for field in [
            &mut self.student_name,
            &mut self.linkedin_url,
            &mut self.company,
            &mut self.position,
            &mut self.interview_questions,
            &mut self.advice_tips,
        ] {
            if let Some(value) = field.as_mut() {
                trim_in_place(value);
            }
        }
        if let Some(dates) = self.interview_dates.as_mut() {
            trim_dates(dates);
        }
    }

    /// Applies the present fields onto `record`. Used by stores that keep
    /// records in memory; SQL stores express the same merge with `COALESCE`.
    pub fn apply_to(&self, record: &mut InterviewExperience) {
        if let Some(v) = &self.student_name {
            record.student_name = v.clone();
        }
        if let Some(v) = &self.linkedin_url {
            record.linkedin_url = v.clone();
        }
        if let Some(v) = &self.company {
            record.company = v.clone();
        }
        if let Some(v) = &self.position {
            record.position = v.clone();
        }
        if let Some(v) = &self.interview_dates {
            record.interview_dates = Json(v.clone());
        }
        if let Some(v) = self.phone_screens {
            record.phone_screens = v;
        }
        if let Some(v) = self.technical_interviews {
            record.technical_interviews = v;
        }
        if let Some(v) = self.behavioral_interviews {
            record.behavioral_interviews = v;
        }
        if let Some(v) = self.other_interviews {
            record.other_interviews = v;
        }
        if let Some(v) = &self.interview_questions {
            record.interview_questions = v.clone();
        }
        if let Some(v) = &self.advice_tips {
            record.advice_tips = v.clone();
        }
        if let Some(v) = self.is_anonymous {
            record.is_anonymous = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        record.updated_at = Utc::now();
    }
}

/// PATCH body: the target id plus any editable fields.
#[derive(Debug, Deserialize)]
pub struct UpdateSubmissionRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(flatten)]
    pub changes: ExperienceChanges,
}

// ───── Query Filters ─────────────────────────────────────────────────

/// Selection criteria shared by the public and admin listings.
///
/// `company` is a case-insensitive substring match on the company name.
/// `keyword` is a case-insensitive substring match on any of questions,
/// tips, position or company. Present criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceFilter {
    pub status: Option<ExperienceStatus>,
    pub keyword: Option<String>,
    pub company: Option<String>,
}

impl ExperienceFilter {
    pub fn approved() -> Self {
        ExperienceFilter {
            status: Some(ExperienceStatus::Approved),
            ..Default::default()
        }
    }

    pub fn with_keyword(mut self, keyword: Option<&str>) -> Self {
        self.keyword = non_blank(keyword);
        self
    }

    pub fn with_company(mut self, company: Option<&str>) -> Self {
        self.company = non_blank(company);
        self
    }

    pub fn matches(&self, exp: &InterviewExperience) -> bool {
        if let Some(status) = self.status {
            if exp.status != status {
                return false;
            }
        }

        if let Some(company) = &self.company {
            if !contains_ignore_case(&exp.company, company) {
                return false;
            }
        }

        if let Some(keyword) = &self.keyword {
            let hit = [
                &exp.interview_questions,
                &exp.advice_tips,
                &exp.position,
                &exp.company,
            ]
            .iter()
            .any(|field| contains_ignore_case(field, keyword));

            if !hit {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Deserialize)]
pub struct PublicQueryParams {
    pub keyword: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminListParams {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

// ───── Helpers ──────────────────────────────────────────────────────

pub fn validate_consent(consent: &bool) -> Result<(), ValidationError> {
    if *consent {
        Ok(())
    } else {
        let mut error = ValidationError::new("consent_required");
        error.message = Some("You must give consent to proceed".into());
        Err(error)
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_dates(dates: &mut [InterviewDate]) {
    for entry in dates.iter_mut() {
        trim_in_place(&mut entry.label);
        trim_in_place(&mut entry.date);
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
