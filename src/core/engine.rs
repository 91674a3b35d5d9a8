use crate::app::steps;
use crate::core::sequence::{StepReport, StepSequence};
use crate::domain::model::{RunSummary, StepSummary};
use crate::domain::ports::{BookStore, ConfigProvider, ReportSink};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Drives one complete tour: builds the step sequence from the configuration,
/// executes it against the store, prints the totals and optionally writes the
/// JSON run report.
pub struct DemoEngine<C: ConfigProvider, R: ReportSink> {
    config: C,
    report_sink: Option<R>,
    monitor_enabled: bool,
}

impl<C: ConfigProvider, R: ReportSink> DemoEngine<C, R> {
    pub fn new(config: C, report_sink: Option<R>) -> Self {
        Self {
            config,
            report_sink,
            monitor_enabled: false,
        }
    }

    pub fn new_with_monitoring(config: C, report_sink: Option<R>, monitor_enabled: bool) -> Self {
        Self {
            config,
            report_sink,
            monitor_enabled,
        }
    }

    pub async fn run(&self, store: &dyn BookStore) -> Result<RunSummary> {
        let started_at = Utc::now();
        let execution_id = format!("run-{}", started_at.format("%Y%m%d%H%M%S"));

        println!("Starting bookstore query tour ({})...", execution_id);
        if self.config.read_only() {
            tracing::info!("🔒 Read-only mode: steps that modify the collection are skipped");
        }

        let mut sequence = StepSequence::new(execution_id.clone())
            .with_monitoring(self.monitor_enabled)
            .with_read_only(self.config.read_only())
            .with_seed(self.config.seed());

        for step in steps::full_tour(self.config.page_size()) {
            sequence.add_step(step);
        }

        let reports = sequence.execute_all(store).await?;
        let summary = build_summary(execution_id, started_at, &reports);

        println!();
        println!(
            "Executed {} steps touching {} documents in {} ms",
            summary.executed_steps, summary.total_documents, summary.total_duration_ms
        );

        if let Some(sink) = &self.report_sink {
            let data = serde_json::to_vec_pretty(&summary)?;
            let file_name = format!("{}.json", summary.execution_id);
            let path = sink.write_report(&file_name, &data).await?;
            tracing::info!("📁 Run report written to {}", path);
        }

        Ok(summary)
    }
}

pub fn build_summary(
    execution_id: String,
    started_at: DateTime<Utc>,
    reports: &[StepReport],
) -> RunSummary {
    let steps = reports
        .iter()
        .map(|r| StepSummary {
            name: r.step_name.clone(),
            section: r.section.clone(),
            summary: r.summary.clone(),
            document_count: r.documents.len(),
            duration_ms: r.duration.as_millis() as u64,
        })
        .collect::<Vec<_>>();

    RunSummary {
        execution_id,
        started_at,
        executed_steps: steps.len(),
        total_documents: steps.iter().map(|s| s.document_count).sum(),
        total_duration_ms: steps.iter().map(|s| s.duration_ms).sum(),
        steps,
    }
}
