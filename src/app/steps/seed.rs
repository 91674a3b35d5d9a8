use crate::core::sequence::{QueryStep, StepContext, StepOutcome};
use crate::domain::model::sample_books;
use crate::domain::ports::BookStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::to_document;

const SECTION: &str = "Setup";

/// Inserts the curated sample books, but only into an empty collection; a
/// populated collection is left untouched.
pub struct SeedBooks;

#[async_trait]
impl QueryStep for SeedBooks {
    fn name(&self) -> &str {
        "seed-sample-books"
    }

    fn section(&self) -> &str {
        SECTION
    }

    fn should_run(&self, context: &StepContext) -> bool {
        context.seed_requested && !context.read_only
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let existing = store.count_books().await?;
        if existing > 0 {
            return Ok(StepOutcome::new(format!(
                "collection already holds {} books, seed skipped",
                existing
            ))
            .with_metadata("inserted", serde_json::Value::Number(0.into())));
        }

        let documents = sample_books()
            .iter()
            .map(to_document)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let inserted = store.insert_books(documents).await?;

        Ok(
            StepOutcome::new(format!("inserted {} sample books", inserted))
                .with_metadata("inserted", serde_json::Value::Number(inserted.into())),
        )
    }
}

pub fn steps() -> Vec<Box<dyn QueryStep>> {
    vec![Box::new(SeedBooks)]
}
