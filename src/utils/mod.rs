// src/utils/mod.rs

pub mod audio;
pub mod auth;
pub mod in_flight;
