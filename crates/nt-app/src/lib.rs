//! NutriTrack Application Orchestration Layer
//!
//! This crate contains the use cases behind every screen intent and the
//! navigation gate that decides which screen the user lands on.

pub mod deps;
pub mod usecases;

pub use deps::AppDeps;
