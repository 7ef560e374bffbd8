pub mod bootstrap;
pub mod commands;
pub mod console;

pub use bootstrap::{AppRuntime, UseCases};
