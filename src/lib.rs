pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod menu;
pub mod models;
pub mod seed;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use db::{CourseStore, Database};
