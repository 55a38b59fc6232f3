pub mod admin;
pub mod cron;
pub mod experiences;
pub mod home;
pub mod submissions;
