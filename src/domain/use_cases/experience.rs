use crate::{
    entities::experience::{ExperienceFilter, PublicExperience},
    errors::AppError,
    repositories::experience::ExperienceRepository,
};

/// Read-only access to approved experiences for the public listing.
pub struct ExperienceQueryHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
}

impl<R> ExperienceQueryHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R) -> Self {
        ExperienceQueryHandler { experience_repo }
    }

    /// Lists approved experiences, newest first, optionally narrowed by
    /// keyword and company. Anonymous entries come back masked.
    pub async fn search_approved(
        &self,
        keyword: Option<&str>,
        company: Option<&str>,
    ) -> Result<Vec<PublicExperience>, AppError> {
        let filter = ExperienceFilter::approved()
            .with_keyword(keyword)
            .with_company(company);

        let experiences = self.experience_repo
            .list_experiences(&filter)
            .await?
            .into_iter()
            // The store already filters on status; this keeps the guarantee local.
            .filter(|exp| exp.is_public())
            .map(PublicExperience::from)
            .collect();

        Ok(experiences)
    }
}
