use crate::core::sequence::{QueryStep, StepContext, StepOutcome};
use crate::domain::ports::BookStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::doc;

const SECTION: &str = "Aggregations";

pub struct AveragePriceByGenre;

#[async_trait]
impl QueryStep for AveragePriceByGenre {
    fn name(&self) -> &str {
        "average-price-by-genre"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let documents = store
            .aggregate(vec![doc! {
                "$group": {
                    "_id": "$genre",
                    "avgPrice": { "$avg": "$price" },
                }
            }])
            .await?;

        Ok(
            StepOutcome::new(format!("average price for {} genres", documents.len()))
                .with_documents(documents),
        )
    }
}

pub struct MostProlificAuthor;

#[async_trait]
impl QueryStep for MostProlificAuthor {
    fn name(&self) -> &str {
        "most-prolific-author"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let documents = store
            .aggregate(vec![
                doc! { "$group": { "_id": "$author", "count": { "$sum": 1 } } },
                doc! { "$sort": { "count": -1 } },
                doc! { "$limit": 1 },
            ])
            .await?;

        let summary = documents
            .first()
            .and_then(|d| d.get_str("_id").ok().map(String::from))
            .map(|author| format!("author with the most books: {}", author))
            .unwrap_or_else(|| "no authors found".to_string());

        Ok(StepOutcome::new(summary).with_documents(documents))
    }
}

/// Buckets books into publication decades ("1990s", "2020s", ...) using the
/// same string/arithmetic expression the aggregation engine evaluates.
pub struct BooksByDecade;

#[async_trait]
impl QueryStep for BooksByDecade {
    fn name(&self) -> &str {
        "books-by-decade"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let documents = store
            .aggregate(vec![doc! {
                "$group": {
                    "_id": {
                        "$concat": [
                            {
                                "$toString": {
                                    "$subtract": [
                                        "$published_year",
                                        { "$mod": ["$published_year", 10] },
                                    ]
                                }
                            },
                            "s",
                        ]
                    },
                    "count": { "$sum": 1 },
                }
            }])
            .await?;

        Ok(
            StepOutcome::new(format!("books grouped into {} decades", documents.len()))
                .with_documents(documents),
        )
    }
}

pub fn steps() -> Vec<Box<dyn QueryStep>> {
    vec![
        Box::new(AveragePriceByGenre),
        Box::new(MostProlificAuthor),
        Box::new(BooksByDecade),
    ]
}
