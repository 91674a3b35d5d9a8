use crate::domain::ports::ReportSink;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Writes run reports as files under a base directory.
#[derive(Debug, Clone)]
pub struct LocalReportSink {
    base_path: String,
}

impl LocalReportSink {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl ReportSink for LocalReportSink {
    async fn write_report(&self, name: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.to_string_lossy().into_owned())
    }
}
