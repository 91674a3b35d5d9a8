pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{LocalReportSink, MongoBookStore};
pub use crate::core::{engine::DemoEngine, sequence::StepSequence};
pub use utils::error::{DemoError, Result};
