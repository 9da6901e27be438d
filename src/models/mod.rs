// src/models/mod.rs

pub mod color;
pub mod note;
pub mod row;
pub mod stats;
pub mod submission;
