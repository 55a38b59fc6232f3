pub mod experience;
pub mod health;
