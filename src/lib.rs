pub mod config;
pub mod gpa;
pub mod logger;

pub use gpa::GpaError;
