use crate::core::sequence::{QueryStep, StepContext, StepOutcome};
use crate::domain::ports::BookStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};

const SECTION: &str = "Indexing";

pub struct TitleIndex;

#[async_trait]
impl QueryStep for TitleIndex {
    fn name(&self) -> &str {
        "create-title-index"
    }

    fn section(&self) -> &str {
        SECTION
    }

    fn should_run(&self, context: &StepContext) -> bool {
        !context.read_only
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let index_name = store.create_index(doc! { "title": 1 }).await?;

        Ok(StepOutcome::new(format!("created index: {}", index_name))
            .with_metadata("index_name", serde_json::Value::String(index_name)))
    }
}

pub struct AuthorYearIndex;

#[async_trait]
impl QueryStep for AuthorYearIndex {
    fn name(&self) -> &str {
        "create-author-year-index"
    }

    fn section(&self) -> &str {
        SECTION
    }

    fn should_run(&self, context: &StepContext) -> bool {
        !context.read_only
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let index_name = store
            .create_index(doc! { "author": 1, "published_year": 1 })
            .await?;

        Ok(
            StepOutcome::new(format!("created compound index: {}", index_name))
                .with_metadata("index_name", serde_json::Value::String(index_name)),
        )
    }
}

/// Asks the server to explain a find-by-title with executionStats verbosity,
/// showing whether the title index is used.
pub struct ExplainTitleLookup {
    title: String,
}

impl ExplainTitleLookup {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

fn stat_i64(stats: &Document, key: &str) -> Option<i64> {
    match stats.get(key) {
        Some(Bson::Int32(v)) => Some(*v as i64),
        Some(Bson::Int64(v)) => Some(*v),
        Some(Bson::Double(v)) => Some(*v as i64),
        _ => None,
    }
}

#[async_trait]
impl QueryStep for ExplainTitleLookup {
    fn name(&self) -> &str {
        "explain-title-lookup"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let explanation = store
            .explain_find(doc! { "title": self.title.as_str() })
            .await?;

        // Only the executionStats portion of the explanation is printed.
        let stats = match explanation.get_document("executionStats") {
            Ok(stats) => stats.clone(),
            Err(_) => explanation,
        };

        let summary = match (
            stat_i64(&stats, "totalDocsExamined"),
            stat_i64(&stats, "nReturned"),
            stat_i64(&stats, "executionTimeMillis"),
        ) {
            (Some(examined), Some(returned), Some(millis)) => format!(
                "find '{}' examined {} documents, returned {} in {} ms",
                self.title, examined, returned, millis
            ),
            _ => format!("explanation for find '{}'", self.title),
        };

        Ok(StepOutcome::new(summary).with_documents(vec![stats]))
    }
}

pub fn steps() -> Vec<Box<dyn QueryStep>> {
    vec![
        Box::new(TitleIndex),
        Box::new(AuthorYearIndex),
        Box::new(ExplainTitleLookup::new("1984")),
    ]
}
