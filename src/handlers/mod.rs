// src/handlers/mod.rs

pub mod diagnostics;
pub mod home;
pub mod quiz;
