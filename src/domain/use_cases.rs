pub mod experience;
pub mod extractors;
pub mod health;
pub mod moderation;
pub mod submission;
