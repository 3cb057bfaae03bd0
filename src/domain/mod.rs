pub mod config;
pub mod error;
pub mod predicate;
pub mod report;
