use crate::core::sequence::{QueryStep, StepContext, StepOutcome};
use crate::domain::ports::{BookStore, FindSpec};
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::doc;

const SECTION: &str = "Basic Queries";

pub struct GenreFilter {
    genre: String,
}

impl GenreFilter {
    pub fn new(genre: &str) -> Self {
        Self {
            genre: genre.to_string(),
        }
    }
}

#[async_trait]
impl QueryStep for GenreFilter {
    fn name(&self) -> &str {
        "find-by-genre"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let documents = store
            .find_books(doc! { "genre": self.genre.as_str() }, FindSpec::default())
            .await?;

        Ok(
            StepOutcome::new(format!("{} {} books", documents.len(), self.genre))
                .with_documents(documents),
        )
    }
}

pub struct PublishedAfter {
    year: i32,
}

impl PublishedAfter {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

#[async_trait]
impl QueryStep for PublishedAfter {
    fn name(&self) -> &str {
        "find-published-after"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let documents = store
            .find_books(
                doc! { "published_year": { "$gt": self.year } },
                FindSpec::default(),
            )
            .await?;

        Ok(StepOutcome::new(format!(
            "{} books published after {}",
            documents.len(),
            self.year
        ))
        .with_documents(documents))
    }
}

pub struct AuthorFilter {
    author: String,
}

impl AuthorFilter {
    pub fn new(author: &str) -> Self {
        Self {
            author: author.to_string(),
        }
    }
}

#[async_trait]
impl QueryStep for AuthorFilter {
    fn name(&self) -> &str {
        "find-by-author"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let documents = store
            .find_books(doc! { "author": self.author.as_str() }, FindSpec::default())
            .await?;

        Ok(StepOutcome::new(format!(
            "{} books by {}",
            documents.len(),
            self.author
        ))
        .with_documents(documents))
    }
}

pub struct PriceUpdate {
    title: String,
    price: f64,
}

impl PriceUpdate {
    pub fn new(title: &str, price: f64) -> Self {
        Self {
            title: title.to_string(),
            price,
        }
    }
}

#[async_trait]
impl QueryStep for PriceUpdate {
    fn name(&self) -> &str {
        "update-price"
    }

    fn section(&self) -> &str {
        SECTION
    }

    fn should_run(&self, context: &StepContext) -> bool {
        !context.read_only
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let modified = store
            .update_one(
                doc! { "title": self.title.as_str() },
                doc! { "$set": { "price": self.price } },
            )
            .await?;

        Ok(StepOutcome::new(format!(
            "set price of '{}' to {:.2} ({} document modified)",
            self.title, self.price, modified
        ))
        .with_metadata("modified_count", serde_json::Value::Number(modified.into())))
    }
}

pub struct TitleDelete {
    title: String,
}

impl TitleDelete {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

#[async_trait]
impl QueryStep for TitleDelete {
    fn name(&self) -> &str {
        "delete-by-title"
    }

    fn section(&self) -> &str {
        SECTION
    }

    fn should_run(&self, context: &StepContext) -> bool {
        !context.read_only
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let deleted = store
            .delete_one(doc! { "title": self.title.as_str() })
            .await?;

        Ok(StepOutcome::new(format!(
            "deleted '{}' ({} document removed)",
            self.title, deleted
        ))
        .with_metadata("deleted_count", serde_json::Value::Number(deleted.into())))
    }
}

pub fn steps() -> Vec<Box<dyn QueryStep>> {
    vec![
        Box::new(GenreFilter::new("Programming")),
        Box::new(PublishedAfter::new(2010)),
        Box::new(AuthorFilter::new("J.K. Rowling")),
        Box::new(PriceUpdate::new("1984", 17.0)),
        Box::new(TitleDelete::new("The Great Gatsby")),
    ]
}
