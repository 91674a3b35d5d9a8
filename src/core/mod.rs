pub mod engine;
pub mod sequence;

pub use crate::domain::model::{Book, RunSummary, StepSummary};
pub use crate::domain::ports::{BookStore, ConfigProvider, FindSpec, ReportSink};
pub use crate::utils::error::Result;
