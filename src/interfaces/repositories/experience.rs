use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::experience::{
        ExperienceChanges, ExperienceFilter, ExperienceInsert, ExperienceStatus, InterviewExperience,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxExperienceRepo,
};

/// Store of interview experience records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<InterviewExperience, AppError>;
    async fn get_experience_by_id(&self, id: &Uuid) -> Result<Option<InterviewExperience>, AppError>;
    /// Newest first.
    async fn list_experiences(&self, filter: &ExperienceFilter) -> Result<Vec<InterviewExperience>, AppError>;
    async fn update_experience(&self, id: &Uuid, changes: &ExperienceChanges) -> Result<InterviewExperience, AppError>;
    async fn delete_experience(&self, id: &Uuid) -> Result<(), AppError>;
    async fn count_experiences(&self, status: Option<ExperienceStatus>) -> Result<i64, AppError>;
    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, AppError>;
    async fn count_created_before(&self, before: DateTime<Utc>) -> Result<i64, AppError>;
    async fn count_incomplete_records(&self) -> Result<i64, AppError>;
}

pub type SharedExperienceRepo = Arc<dyn ExperienceRepository>;

#[async_trait]
impl<T> ExperienceRepository for Arc<T>
where
    T: ExperienceRepository + ?Sized,
{
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<InterviewExperience, AppError> {
        (**self).create_experience(experience).await
    }

    async fn get_experience_by_id(&self, id: &Uuid) -> Result<Option<InterviewExperience>, AppError> {
        (**self).get_experience_by_id(id).await
    }

    async fn list_experiences(&self, filter: &ExperienceFilter) -> Result<Vec<InterviewExperience>, AppError> {
        (**self).list_experiences(filter).await
    }

    async fn update_experience(&self, id: &Uuid, changes: &ExperienceChanges) -> Result<InterviewExperience, AppError> {
        (**self).update_experience(id, changes).await
    }

    async fn delete_experience(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_experience(id).await
    }

    async fn count_experiences(&self, status: Option<ExperienceStatus>) -> Result<i64, AppError> {
        (**self).count_experiences(status).await
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        (**self).count_created_since(since).await
    }

    async fn count_created_before(&self, before: DateTime<Utc>) -> Result<i64, AppError> {
        (**self).count_created_before(before).await
    }

    async fn count_incomplete_records(&self) -> Result<i64, AppError> {
        (**self).count_incomplete_records().await
    }
}

impl SqlxExperienceRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }
}

/// Escapes LIKE wildcards so the term is matched literally as a substring.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ExperienceFilter) {
    builder.push(" WHERE TRUE");

    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }

    if let Some(company) = &filter.company {
        builder.push(" AND company ILIKE ").push_bind(like_pattern(company));
    }

    if let Some(keyword) = &filter.keyword {
        let pattern = like_pattern(keyword);
        builder.push(" AND (interview_questions ILIKE ").push_bind(pattern.clone());
        builder.push(" OR advice_tips ILIKE ").push_bind(pattern.clone());
        builder.push(" OR position ILIKE ").push_bind(pattern.clone());
        builder.push(" OR company ILIKE ").push_bind(pattern);
        builder.push(")");
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<InterviewExperience, AppError> {
        let created = sqlx::query_as::<_, InterviewExperience>(
            r#"
            INSERT INTO interview_experiences (
                student_name, linkedin_url, company, position, interview_dates,
                phone_screens, technical_interviews, behavioral_interviews, other_interviews,
                interview_questions, advice_tips, is_anonymous, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#
        )
        .bind(&experience.student_name)
        .bind(&experience.linkedin_url)
        .bind(&experience.company)
        .bind(&experience.position)
        .bind(Json(&experience.interview_dates))
        .bind(experience.phone_screens)
        .bind(experience.technical_interviews)
        .bind(experience.behavioral_interviews)
        .bind(experience.other_interviews)
        .bind(&experience.interview_questions)
        .bind(&experience.advice_tips)
        .bind(experience.is_anonymous)
        .bind(experience.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_experience_by_id(&self, id: &Uuid) -> Result<Option<InterviewExperience>, AppError> {
        sqlx::query_as::<_, InterviewExperience>(
            "SELECT * FROM interview_experiences WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_experiences(&self, filter: &ExperienceFilter) -> Result<Vec<InterviewExperience>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM interview_experiences");
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");

        let query = builder.build_query_as::<InterviewExperience>();
        let experiences = query.fetch_all(&self.pool).await?;

        Ok(experiences)
    }

    async fn update_experience(&self, id: &Uuid, changes: &ExperienceChanges) -> Result<InterviewExperience, AppError> {
        // COALESCE keeps the stored value for every field left as None
        let updated = sqlx::query_as::<_, InterviewExperience>(
            r#"
            UPDATE interview_experiences SET
                student_name = COALESCE($1, student_name),
                linkedin_url = COALESCE($2, linkedin_url),
                company = COALESCE($3, company),
                position = COALESCE($4, position),
                interview_dates = COALESCE($5, interview_dates),
                phone_screens = COALESCE($6, phone_screens),
                technical_interviews = COALESCE($7, technical_interviews),
                behavioral_interviews = COALESCE($8, behavioral_interviews),
                other_interviews = COALESCE($9, other_interviews),
                interview_questions = COALESCE($10, interview_questions),
                advice_tips = COALESCE($11, advice_tips),
                is_anonymous = COALESCE($12, is_anonymous),
                status = COALESCE($13, status),
                updated_at = NOW()
            WHERE id = $14
            RETURNING *
            "#
        )
        .bind(changes.student_name.as_deref())
        .bind(changes.linkedin_url.as_deref())
        .bind(changes.company.as_deref())
        .bind(changes.position.as_deref())
        .bind(changes.interview_dates.as_ref().map(Json))
        .bind(changes.phone_screens)
        .bind(changes.technical_interviews)
        .bind(changes.behavioral_interviews)
        .bind(changes.other_interviews)
        .bind(changes.interview_questions.as_deref())
        .bind(changes.advice_tips.as_deref())
        .bind(changes.is_anonymous)
        .bind(changes.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound("Submission not found".into()))
    }

    async fn delete_experience(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM interview_experiences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Submission not found".into()));
        }

        Ok(())
    }

    async fn count_experiences(&self, status: Option<ExperienceStatus>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM interview_experiences
            WHERE ($1::experience_status IS NULL OR status = $1)
            "#
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM interview_experiences WHERE created_at >= $1"
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_created_before(&self, before: DateTime<Utc>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM interview_experiences WHERE created_at < $1"
        )
        .bind(before)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_incomplete_records(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM interview_experiences
            WHERE btrim(COALESCE(student_name, '')) = ''
               OR btrim(COALESCE(linkedin_url, '')) = ''
               OR btrim(COALESCE(company, '')) = ''
               OR btrim(COALESCE(position, '')) = ''
               OR btrim(COALESCE(interview_questions, '')) = ''
               OR btrim(COALESCE(advice_tips, '')) = ''
            "#
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
