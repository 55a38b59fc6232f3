#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use interview_board::{
    entities::experience::{
        ExperienceChanges, ExperienceFilter, ExperienceInsert, ExperienceStatus, InterviewExperience,
    },
    errors::AppError,
    repositories::experience::{ExperienceRepository, SharedExperienceRepo},
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use sqlx::types::Json;
use uuid::Uuid;

pub const ADMIN_SECRET: &str = "test-admin-secret";
pub const CRON_SECRET: &str = "test-cron-secret";

/// Store double that keeps records in insertion order and can be switched
/// into a failing mode to exercise error paths.
#[derive(Default)]
pub struct InMemoryExperienceRepo {
    records: Mutex<Vec<InterviewExperience>>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryExperienceRepo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, record: InterviewExperience) -> Uuid {
        let id = record.id;
        self.records.lock().push(record);
        id
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of store operations attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn get(&self, id: Uuid) -> Option<InterviewExperience> {
        self.records.lock().iter().find(|r| r.id == id).cloned()
    }

    fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            Err(AppError::StoreError("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ExperienceRepository for InMemoryExperienceRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        self.enter()
    }

    async fn create_experience(&self, insert: &ExperienceInsert) -> Result<InterviewExperience, AppError> {
        self.enter()?;
        let now = Utc::now();
        let record = InterviewExperience {
            id: Uuid::new_v4(),
            student_name: insert.student_name.clone(),
            linkedin_url: insert.linkedin_url.clone(),
            company: insert.company.clone(),
            position: insert.position.clone(),
            interview_dates: Json(insert.interview_dates.clone()),
            phone_screens: insert.phone_screens,
            technical_interviews: insert.technical_interviews,
            behavioral_interviews: insert.behavioral_interviews,
            other_interviews: insert.other_interviews,
            interview_questions: insert.interview_questions.clone(),
            advice_tips: insert.advice_tips.clone(),
            is_anonymous: insert.is_anonymous,
            status: insert.status,
            created_at: now,
            updated_at: now,
        };
        self.records.lock().push(record.clone());
        Ok(record)
    }

    async fn get_experience_by_id(&self, id: &Uuid) -> Result<Option<InterviewExperience>, AppError> {
        self.enter()?;
        Ok(self.get(*id))
    }

    async fn list_experiences(&self, filter: &ExperienceFilter) -> Result<Vec<InterviewExperience>, AppError> {
        self.enter()?;
        let mut matching: Vec<InterviewExperience> = self.records
            .lock()
            .iter()
            .rev()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        // Stable sort keeps later insertions first on equal timestamps.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn update_experience(&self, id: &Uuid, changes: &ExperienceChanges) -> Result<InterviewExperience, AppError> {
        self.enter()?;
        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;
        changes.apply_to(record);
        Ok(record.clone())
    }

    async fn delete_experience(&self, id: &Uuid) -> Result<(), AppError> {
        self.enter()?;
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|r| r.id != *id);
        if records.len() == before {
            return Err(AppError::NotFound("Submission not found".into()));
        }
        Ok(())
    }

    async fn count_experiences(&self, status: Option<ExperienceStatus>) -> Result<i64, AppError> {
        self.enter()?;
        let count = self.records
            .lock()
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .count();
        Ok(count as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        self.enter()?;
        Ok(self.records.lock().iter().filter(|r| r.created_at >= since).count() as i64)
    }

    async fn count_created_before(&self, before: DateTime<Utc>) -> Result<i64, AppError> {
        self.enter()?;
        Ok(self.records.lock().iter().filter(|r| r.created_at < before).count() as i64)
    }

    async fn count_incomplete_records(&self) -> Result<i64, AppError> {
        self.enter()?;
        let count = self.records
            .lock()
            .iter()
            .filter(|r| {
                [
                    &r.student_name,
                    &r.linkedin_url,
                    &r.company,
                    &r.position,
                    &r.interview_questions,
                    &r.advice_tips,
                ]
                .iter()
                .any(|field| field.trim().is_empty())
            })
            .count();
        Ok(count as i64)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Interview Board Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: "postgres://localhost/unused".into(),
        cors_allowed_origins: vec!["*".to_string()],
        admin_secret: Some(ADMIN_SECRET.to_string().into()),
        cron_secret: Some(CRON_SECRET.to_string().into()),
        health_recent_window_days: 7,
        health_retention_days: 365,
    }
}

pub fn test_state(repo: &Arc<InMemoryExperienceRepo>) -> web::Data<AppState> {
    state_with_config(repo, &test_config())
}

pub fn state_with_config(repo: &Arc<InMemoryExperienceRepo>, config: &AppConfig) -> web::Data<AppState> {
    let shared: SharedExperienceRepo = repo.clone();
    web::Data::new(AppState::with_repository(config, shared))
}

pub fn bearer(secret: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", secret))
}

pub fn valid_submission() -> Value {
    json!({
        "student_name": "Ada Lovelace",
        "linkedin_url": "https://www.linkedin.com/in/ada-lovelace",
        "company": "Analytical Engines Ltd",
        "position": "Software Engineer Intern",
        "interview_dates": [
            {"label": "Phone screen", "date": "2025-02-03"},
            {"label": "Onsite", "date": "2025-02-17"}
        ],
        "phone_screens": 1,
        "technical_interviews": 2,
        "behavioral_interviews": 1,
        "other_interviews": 0,
        "interview_questions": "Implement an LRU cache and discuss eviction trade-offs",
        "advice_tips": "Talk through your reasoning before writing code",
        "is_anonymous": false,
        "consent_given": true
    })
}

pub fn record(company: &str, status: ExperienceStatus, created_at: DateTime<Utc>) -> InterviewExperience {
    InterviewExperience {
        id: Uuid::new_v4(),
        student_name: "Grace Hopper".into(),
        linkedin_url: "https://linkedin.com/in/grace-hopper".into(),
        company: company.into(),
        position: "Compiler Engineer".into(),
        interview_dates: Json(vec![]),
        phone_screens: 1,
        technical_interviews: 2,
        behavioral_interviews: 1,
        other_interviews: 0,
        interview_questions: "Explain how a linker resolves symbols".into(),
        advice_tips: "Review the basics of assembly language".into(),
        is_anonymous: false,
        status,
        created_at,
        updated_at: created_at,
    }
}
