use crate::core::sequence::{QueryStep, StepContext, StepOutcome};
use crate::domain::ports::{BookStore, FindSpec};
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::doc;

const SECTION: &str = "Advanced Queries";

pub struct InStockPublishedAfter {
    year: i32,
}

impl InStockPublishedAfter {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

#[async_trait]
impl QueryStep for InStockPublishedAfter {
    fn name(&self) -> &str {
        "find-in-stock-recent"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let documents = store
            .find_books(
                doc! {
                    "in_stock": true,
                    "published_year": { "$gt": self.year },
                },
                FindSpec::default(),
            )
            .await?;

        Ok(StepOutcome::new(format!(
            "{} books in stock and published after {}",
            documents.len(),
            self.year
        ))
        .with_documents(documents))
    }
}

/// Projects every book down to title, author and price, dropping `_id`.
pub struct CatalogProjection;

#[async_trait]
impl QueryStep for CatalogProjection {
    fn name(&self) -> &str {
        "project-catalog"
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let spec = FindSpec {
            projection: Some(doc! { "title": 1, "author": 1, "price": 1, "_id": 0 }),
            ..FindSpec::default()
        };
        let documents = store.find_books(doc! {}, spec).await?;

        Ok(StepOutcome::new(format!(
            "{} books projected to title/author/price",
            documents.len()
        ))
        .with_documents(documents))
    }
}

pub struct PriceSort {
    ascending: bool,
}

impl PriceSort {
    pub fn ascending() -> Self {
        Self { ascending: true }
    }

    pub fn descending() -> Self {
        Self { ascending: false }
    }
}

#[async_trait]
impl QueryStep for PriceSort {
    fn name(&self) -> &str {
        if self.ascending {
            "sort-by-price-asc"
        } else {
            "sort-by-price-desc"
        }
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let direction = if self.ascending { 1 } else { -1 };
        let spec = FindSpec {
            sort: Some(doc! { "price": direction }),
            ..FindSpec::default()
        };
        let documents = store.find_books(doc! {}, spec).await?;

        Ok(StepOutcome::new(format!(
            "{} books sorted by price ({})",
            documents.len(),
            if self.ascending {
                "ascending"
            } else {
                "descending"
            }
        ))
        .with_documents(documents))
    }
}

pub struct Paginate {
    name: String,
    page: u64,
    page_size: i64,
}

impl Paginate {
    pub fn new(page: u64, page_size: i64) -> Self {
        Self {
            name: format!("page-{}", page),
            page,
            page_size,
        }
    }
}

pub fn offset_for_page(page: u64, page_size: i64) -> u64 {
    page.saturating_sub(1) * page_size.max(0) as u64
}

#[async_trait]
impl QueryStep for Paginate {
    fn name(&self) -> &str {
        &self.name
    }

    fn section(&self) -> &str {
        SECTION
    }

    async fn run(&self, store: &dyn BookStore, _context: &StepContext) -> Result<StepOutcome> {
        let offset = offset_for_page(self.page, self.page_size);
        let spec = FindSpec {
            skip: (offset > 0).then_some(offset),
            limit: Some(self.page_size),
            ..FindSpec::default()
        };
        let documents = store.find_books(doc! {}, spec).await?;

        Ok(StepOutcome::new(format!(
            "page {} ({} books, {} per page)",
            self.page,
            documents.len(),
            self.page_size
        ))
        .with_documents(documents))
    }
}

pub fn steps(page_size: i64) -> Vec<Box<dyn QueryStep>> {
    vec![
        Box::new(InStockPublishedAfter::new(2010)),
        Box::new(CatalogProjection),
        Box::new(PriceSort::ascending()),
        Box::new(PriceSort::descending()),
        Box::new(Paginate::new(1, page_size)),
        Box::new(Paginate::new(2, page_size)),
    ]
}
