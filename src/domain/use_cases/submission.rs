use crate::{
    entities::experience::{ExperienceInsert, InterviewExperience, MessageResponse, NewSubmission},
    errors::AppError,
    repositories::experience::ExperienceRepository,
};

const SUBMISSION_RECEIVED: &str =
    "Submission successful! Your entry will be reviewed before being published.";

pub struct SubmissionHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
}

impl<R> SubmissionHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R) -> Self {
        SubmissionHandler { experience_repo }
    }

    /// Validates a public submission and stores it as pending.
    /// Nothing reaches the store unless every rule passes.
    pub async fn submit(
        &self,
        request: NewSubmission,
    ) -> Result<MessageResponse<InterviewExperience>, AppError> {
        let insert = ExperienceInsert::try_from(request)?;

        let created = self.experience_repo.create_experience(&insert).await?;

        tracing::info!(id = %created.id, company = %created.company, "New submission stored as pending");

        Ok(MessageResponse {
            message: SUBMISSION_RECEIVED.to_string(),
            data: created,
        })
    }
}
