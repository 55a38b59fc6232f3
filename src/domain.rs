pub mod entities;
pub mod moderation;
pub mod use_cases;
