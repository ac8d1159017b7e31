//! Conversational advisor that collects an applicant's exam scores step by
//! step and reports which university programs they qualify for.

pub mod admissions;
pub mod config;
pub mod error;
pub mod telemetry;
