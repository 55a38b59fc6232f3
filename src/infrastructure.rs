pub mod auth;
pub mod db;
pub mod export;
pub mod utils;
