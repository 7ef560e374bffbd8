//! Intents issued by the presentation layer.
//!
//! Each command opens a root span, builds its use case through
//! `runtime.usecases()` and maps failures with [`error::map_err`].

pub mod account;
pub mod error;
pub mod home;
pub mod navigation;
pub mod profile;
pub mod settings;

pub use error::{map_err, CommandError};
