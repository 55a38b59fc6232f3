use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::moderation::{transition, ModerationDecision, Transition},
    entities::experience::{
        ExperienceChanges, ExperienceFilter, ExperienceStatus, InterviewExperience, MessageResponse,
        StatusCounts, StatusFilter,
    },
    errors::AppError,
    export::csv_export::{export_filename, render_experiences, CsvExport},
    repositories::experience::ExperienceRepository,
    utils::valid_uuid::valid_uuid,
};

/// Moderator-only retrieval and mutation of submissions in any status.
pub struct ModerationHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
}

impl<R> ModerationHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R) -> Self {
        ModerationHandler { experience_repo }
    }

    /// Lists submissions newest first. `status` is `all` or a single status.
    pub async fn list_submissions(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<InterviewExperience>, AppError> {
        let status_filter: StatusFilter = status.unwrap_or("all").parse()?;

        let filter = ExperienceFilter {
            status: status_filter.as_status(),
            ..Default::default()
        };

        self.experience_repo.list_experiences(&filter).await
    }

    /// Applies a moderator edit. A `status` in the edit goes through the
    /// same lifecycle check as an explicit approve or reject.
    pub async fn update_submission(
        &self,
        id: Option<&str>,
        mut changes: ExperienceChanges,
    ) -> Result<MessageResponse<InterviewExperience>, AppError> {
        let id = required_id(id)?;

        changes.normalize();
        changes.validate()?;

        if changes.is_empty() {
            return Err(AppError::BadRequest("No fields to update".into()));
        }

        if let Some(target) = changes.status {
            let current = self.find(&id).await?;

            match transition(current.status, target)? {
                Transition::Unchanged(status) => {
                    tracing::info!(%id, %status, "Edit requested current status; status left unchanged");
                    changes.status = None;
                    if changes.is_empty() {
                        return Ok(MessageResponse {
                            message: "Updated successfully".to_string(),
                            data: current,
                        });
                    }
                }
                Transition::Changed { from, to } => {
                    tracing::info!(%id, %from, %to, "Status change requested through edit");
                }
            }
        }

        let updated = self.experience_repo.update_experience(&id, &changes).await?;

        tracing::info!(%id, status = %updated.status, "Submission updated by moderator");

        Ok(MessageResponse {
            message: "Updated successfully".to_string(),
            data: updated,
        })
    }

    /// Approves or rejects a submission. Repeating a decision leaves the
    /// record untouched but is still logged.
    pub async fn decide(
        &self,
        id: &str,
        decision: ModerationDecision,
    ) -> Result<MessageResponse<InterviewExperience>, AppError> {
        let id = valid_uuid(id)?;
        let current = self.find(&id).await?;

        let outcome = transition(current.status, decision.target())?;
        let status = outcome.resulting_status();

        if !outcome.is_change() {
            tracing::info!(%id, %decision, %status, "Moderation decision repeated; no change");

            return Ok(MessageResponse {
                message: format!("Submission already {}", status),
                data: current,
            });
        }

        let updated = self.experience_repo
            .update_experience(&id, &ExperienceChanges::status_only(status))
            .await?;

        tracing::info!(%id, %decision, from = %current.status, to = %status, "Moderation decision applied");

        Ok(MessageResponse {
            message: format!("Submission {}", status),
            data: updated,
        })
    }

    pub async fn delete_submission(&self, id: Option<&str>) -> Result<(), AppError> {
        let id = required_id(id)?;

        self.experience_repo
            .delete_experience(&id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Submission not found".to_string()),
                _ => e,
            })?;

        tracing::info!(%id, "Submission deleted by moderator");
        Ok(())
    }

    /// Renders every approved submission, newest first, as CSV.
    pub async fn export_approved(&self, today: NaiveDate) -> Result<CsvExport, AppError> {
        let approved = self.experience_repo
            .list_experiences(&ExperienceFilter::approved())
            .await?;

        if approved.is_empty() {
            return Err(AppError::NoData("No data to export".into()));
        }

        let body = render_experiences(&approved)?;

        tracing::info!(rows = approved.len(), "Exported approved submissions");

        Ok(CsvExport {
            filename: export_filename(today),
            body,
        })
    }

    pub async fn status_counts(&self) -> Result<StatusCounts, AppError> {
        let mut counts = StatusCounts { pending: 0, approved: 0, rejected: 0, total: 0 };

        for status in ExperienceStatus::ALL {
            let count = self.experience_repo.count_experiences(Some(status)).await?;
            match status {
                ExperienceStatus::Pending => counts.pending = count,
                ExperienceStatus::Approved => counts.approved = count,
                ExperienceStatus::Rejected => counts.rejected = count,
            }
            counts.total += count;
        }

        Ok(counts)
    }

    async fn find(&self, id: &Uuid) -> Result<InterviewExperience, AppError> {
        self.experience_repo
            .get_experience_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".into()))
    }
}

fn required_id(id: Option<&str>) -> Result<Uuid, AppError> {
    let id = id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("ID is required".into()))?;

    valid_uuid(id)
}
