use crate::domain::ports::BookStore;
use crate::utils::error::{DemoError, Result};
use crate::utils::monitor::SystemMonitor;
use async_trait::async_trait;
use mongodb::bson::Document;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// What a single step produced: the documents the database returned plus a
/// one-line human summary.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub documents: Vec<Document>,
    pub summary: String,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl StepOutcome {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            documents: Vec::new(),
            summary: summary.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }
}

/// Step execution record kept in the context and aggregated into the report.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step_name: String,
    pub section: String,
    pub documents: Vec<Document>,
    pub summary: String,
    pub duration: Duration,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Execution context threaded through the sequence so later steps can see
/// what already happened.
#[derive(Debug, Clone)]
pub struct StepContext {
    pub previous_reports: Vec<StepReport>,
    pub shared_data: HashMap<String, serde_json::Value>,
    pub execution_id: String,
    pub read_only: bool,
    pub seed_requested: bool,
}

impl StepContext {
    pub fn new(execution_id: String) -> Self {
        Self {
            previous_reports: Vec::new(),
            shared_data: HashMap::new(),
            execution_id,
            read_only: false,
            seed_requested: false,
        }
    }

    pub fn get_previous_report(&self) -> Option<&StepReport> {
        self.previous_reports.last()
    }

    pub fn get_report_by_name(&self, name: &str) -> Option<&StepReport> {
        self.previous_reports.iter().find(|r| r.step_name == name)
    }

    pub fn total_documents(&self) -> usize {
        self.previous_reports.iter().map(|r| r.documents.len()).sum()
    }

    pub fn add_shared_data(&mut self, key: String, value: serde_json::Value) {
        self.shared_data.insert(key, value);
    }

    pub fn get_shared_data(&self, key: &str) -> Option<&serde_json::Value> {
        self.shared_data.get(key)
    }

    pub fn add_report(&mut self, report: StepReport) {
        self.previous_reports.push(report);
    }
}

/// One hard-coded query of the tour.
#[async_trait]
pub trait QueryStep: Send + Sync {
    fn name(&self) -> &str;

    /// Banner the step is grouped under in the printed output.
    fn section(&self) -> &str {
        ""
    }

    /// Steps that mutate the deployment opt out here in read-only mode.
    fn should_run(&self, _context: &StepContext) -> bool {
        true
    }

    async fn run(&self, store: &dyn BookStore, context: &StepContext) -> Result<StepOutcome>;
}

/// Runs steps strictly in the order they were added. The first failure aborts
/// the remainder of the sequence.
pub struct StepSequence {
    steps: Vec<Box<dyn QueryStep>>,
    monitor: Option<SystemMonitor>,
    monitor_enabled: bool,
    execution_id: String,
    read_only: bool,
    seed_requested: bool,
}

impl StepSequence {
    pub fn new(execution_id: String) -> Self {
        Self {
            steps: Vec::new(),
            monitor: None,
            monitor_enabled: false,
            execution_id,
            read_only: false,
            seed_requested: false,
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor_enabled = enabled;
        if enabled {
            self.monitor = Some(SystemMonitor::new(enabled));
        }
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_seed(mut self, seed_requested: bool) -> Self {
        self.seed_requested = seed_requested;
        self
    }

    pub fn add_step(&mut self, step: Box<dyn QueryStep>) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub async fn execute_all(&mut self, store: &dyn BookStore) -> Result<Vec<StepReport>> {
        let mut results = Vec::new();
        let mut context = StepContext::new(self.execution_id.clone());
        context.read_only = self.read_only;
        context.seed_requested = self.seed_requested;

        if self.monitor_enabled {
            if let Some(monitor) = &self.monitor {
                monitor.log_stats("Query sequence started");
            }
        }

        let mut current_section = String::new();

        for step in &self.steps {
            if step.section() != current_section {
                current_section = step.section().to_string();
                println!("\n--- {} ---", current_section);
            }

            if !step.should_run(&context) {
                tracing::info!("⏭️ Skipping step: {} (condition not met)", step.name());
                continue;
            }

            let start_time = Instant::now();

            match step.run(store, &context).await {
                Ok(outcome) => {
                    let duration = start_time.elapsed();

                    println!("{}: {}", step.name(), outcome.summary);
                    for doc in &outcome.documents {
                        println!("  {}", doc);
                    }

                    let report = StepReport {
                        step_name: step.name().to_string(),
                        section: step.section().to_string(),
                        documents: outcome.documents,
                        summary: outcome.summary,
                        duration,
                        metadata: outcome.metadata,
                    };

                    tracing::info!(
                        "✅ Step executed: {} (documents: {}, duration: {:?})",
                        report.step_name,
                        report.documents.len(),
                        report.duration
                    );

                    context.add_report(report.clone());
                    results.push(report);
                }
                Err(e) => {
                    tracing::error!("❌ Step failed: {}: {}", step.name(), e);
                    return Err(DemoError::StepError {
                        step: step.name().to_string(),
                        details: e.to_string(),
                    });
                }
            }
        }

        if self.monitor_enabled {
            if let Some(monitor) = &self.monitor {
                monitor.log_final_stats();
            }
        }

        Ok(results)
    }

    pub fn get_execution_summary(results: &[StepReport]) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        let total_documents: usize = results.iter().map(|r| r.documents.len()).sum();
        let total_duration_ms: u64 = results.iter().map(|r| r.duration.as_millis() as u64).sum();
        let executed_steps: Vec<serde_json::Value> = results
            .iter()
            .map(|r| serde_json::Value::String(r.step_name.clone()))
            .collect();

        summary.insert(
            "total_steps".to_string(),
            serde_json::Value::Number(results.len().into()),
        );
        summary.insert(
            "total_documents".to_string(),
            serde_json::Value::Number(total_documents.into()),
        );
        summary.insert(
            "total_duration_ms".to_string(),
            serde_json::Value::Number(total_duration_ms.into()),
        );
        summary.insert(
            "executed_steps".to_string(),
            serde_json::Value::Array(executed_steps),
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FindSpec;
    use mongodb::bson::doc;

    struct NullStore;

    #[async_trait]
    impl BookStore for NullStore {
        async fn find_books(&self, _filter: Document, _spec: FindSpec) -> Result<Vec<Document>> {
            Ok(Vec::new())
        }

        async fn update_one(&self, _filter: Document, _update: Document) -> Result<u64> {
            Ok(0)
        }

        async fn delete_one(&self, _filter: Document) -> Result<u64> {
            Ok(0)
        }

        async fn aggregate(&self, _pipeline: Vec<Document>) -> Result<Vec<Document>> {
            Ok(Vec::new())
        }

        async fn create_index(&self, _keys: Document) -> Result<String> {
            Ok("index_1".to_string())
        }

        async fn explain_find(&self, _filter: Document) -> Result<Document> {
            Ok(doc! {})
        }

        async fn insert_books(&self, _books: Vec<Document>) -> Result<u64> {
            Ok(0)
        }

        async fn count_books(&self) -> Result<u64> {
            Ok(0)
        }
    }

    struct MockStep {
        name: String,
        section: String,
        documents: Vec<Document>,
        runs_in_read_only: bool,
        fails: bool,
    }

    impl MockStep {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                section: "Mock".to_string(),
                documents: Vec::new(),
                runs_in_read_only: true,
                fails: false,
            }
        }

        fn with_documents(mut self, documents: Vec<Document>) -> Self {
            self.documents = documents;
            self
        }

        fn mutating(mut self) -> Self {
            self.runs_in_read_only = false;
            self
        }

        fn failing(mut self) -> Self {
            self.fails = true;
            self
        }
    }

    #[async_trait]
    impl QueryStep for MockStep {
        fn name(&self) -> &str {
            &self.name
        }

        fn section(&self) -> &str {
            &self.section
        }

        fn should_run(&self, context: &StepContext) -> bool {
            self.runs_in_read_only || !context.read_only
        }

        async fn run(&self, _store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
            if self.fails {
                return Err(DemoError::ConfigError {
                    message: "mock failure".to_string(),
                });
            }
            Ok(StepOutcome::new(format!("{} documents", self.documents.len()))
                .with_documents(self.documents.clone()))
        }
    }

    fn sample_doc(title: &str) -> Document {
        doc! { "title": title }
    }

    #[test]
    fn test_step_context_new() {
        let context = StepContext::new("test_execution".to_string());
        assert_eq!(context.execution_id, "test_execution");
        assert!(context.previous_reports.is_empty());
        assert!(context.shared_data.is_empty());
        assert!(!context.read_only);
    }

    #[test]
    fn test_step_context_shared_data() {
        let mut context = StepContext::new("test".to_string());

        context.add_shared_data(
            "seeded".to_string(),
            serde_json::Value::Number(12.into()),
        );

        assert_eq!(
            context.get_shared_data("seeded").unwrap(),
            &serde_json::Value::Number(12.into())
        );
        assert!(context.get_shared_data("missing").is_none());
    }

    #[test]
    fn test_step_context_reports() {
        let mut context = StepContext::new("test".to_string());

        let report = StepReport {
            step_name: "find-by-genre".to_string(),
            section: "Basic Queries".to_string(),
            documents: vec![sample_doc("1984")],
            summary: "1 book".to_string(),
            duration: Duration::from_millis(5),
            metadata: HashMap::new(),
        };
        context.add_report(report);

        assert!(context.get_report_by_name("find-by-genre").is_some());
        assert!(context.get_report_by_name("missing").is_none());
        assert_eq!(
            context.get_previous_report().unwrap().step_name,
            "find-by-genre"
        );
        assert_eq!(context.total_documents(), 1);
    }

    #[tokio::test]
    async fn test_sequence_executes_in_order() {
        let mut sequence = StepSequence::new("test_sequence".to_string());
        sequence.add_step(Box::new(
            MockStep::new("first").with_documents(vec![sample_doc("a")]),
        ));
        sequence.add_step(Box::new(
            MockStep::new("second").with_documents(vec![sample_doc("b"), sample_doc("c")]),
        ));

        let results = sequence.execute_all(&NullStore).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].step_name, "first");
        assert_eq!(results[1].step_name, "second");
        assert_eq!(results[1].documents.len(), 2);
    }

    #[tokio::test]
    async fn test_sequence_skips_mutating_steps_in_read_only_mode() {
        let mut sequence = StepSequence::new("read_only".to_string()).with_read_only(true);
        sequence.add_step(Box::new(MockStep::new("reader")));
        sequence.add_step(Box::new(MockStep::new("writer").mutating()));
        sequence.add_step(Box::new(MockStep::new("another-reader")));

        let results = sequence.execute_all(&NullStore).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].step_name, "reader");
        assert_eq!(results[1].step_name, "another-reader");
    }

    #[tokio::test]
    async fn test_sequence_aborts_on_first_failure() {
        let mut sequence = StepSequence::new("failing".to_string());
        sequence.add_step(Box::new(MockStep::new("ok")));
        sequence.add_step(Box::new(MockStep::new("broken").failing()));
        sequence.add_step(Box::new(MockStep::new("never-reached")));

        let err = sequence.execute_all(&NullStore).await.unwrap_err();

        match err {
            DemoError::StepError { step, .. } => assert_eq!(step, "broken"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execution_summary_totals() {
        let mut sequence = StepSequence::new("summary".to_string());
        sequence.add_step(Box::new(
            MockStep::new("one").with_documents(vec![sample_doc("a")]),
        ));
        sequence.add_step(Box::new(
            MockStep::new("two").with_documents(vec![sample_doc("b"), sample_doc("c")]),
        ));

        let results = sequence.execute_all(&NullStore).await.unwrap();
        let summary = StepSequence::get_execution_summary(&results);

        assert_eq!(
            summary.get("total_steps").unwrap(),
            &serde_json::Value::Number(2.into())
        );
        assert_eq!(
            summary.get("total_documents").unwrap(),
            &serde_json::Value::Number(3.into())
        );

        let executed = summary.get("executed_steps").unwrap().as_array().unwrap();
        assert_eq!(executed.len(), 2);
        assert_eq!(executed[0], serde_json::Value::String("one".to_string()));
    }
}
