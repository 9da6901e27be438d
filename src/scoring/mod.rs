// src/scoring/mod.rs

pub mod grader;
pub mod stats;

pub use grader::grade;
pub use stats::aggregate;
