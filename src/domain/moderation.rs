use derive_more::Display;

use crate::entities::experience::ExperienceStatus;

/// A moderator's verdict on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ModerationDecision {
    #[display("approve")]
    Approve,
    #[display("reject")]
    Reject,
}

impl ModerationDecision {
    pub fn target(self) -> ExperienceStatus {
        match self {
            ModerationDecision::Approve => ExperienceStatus::Approved,
            ModerationDecision::Reject => ExperienceStatus::Rejected,
        }
    }
}

/// Outcome of checking a requested status change against the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed {
        from: ExperienceStatus,
        to: ExperienceStatus,
    },
    Unchanged(ExperienceStatus),
}

impl Transition {
    pub fn is_change(&self) -> bool {
        matches!(self, Transition::Changed { .. })
    }

    pub fn resulting_status(&self) -> ExperienceStatus {
        match self {
            Transition::Changed { to, .. } => *to,
            Transition::Unchanged(status) => *status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ModerationError {
    #[display("A {_0} submission cannot be moved back to pending")]
    CannotReopen(ExperienceStatus),
}

/// Checks a requested status change.
///
/// Submissions leave `pending` only through a moderation decision, and a
/// decided submission can be flipped between `approved` and `rejected` but
/// never returned to `pending`. Requesting the current status is a no-op.
pub fn transition(
    from: ExperienceStatus,
    to: ExperienceStatus,
) -> Result<Transition, ModerationError> {
    use ExperienceStatus::*;

    match (from, to) {
        (from, to) if from == to => Ok(Transition::Unchanged(from)),
        (Approved | Rejected, Pending) => Err(ModerationError::CannotReopen(from)),
        (from, to) => Ok(Transition::Changed { from, to }),
    }
}
