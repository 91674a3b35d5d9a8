use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::Document;

/// Options forwarded to a find, kept as plain data.
#[derive(Debug, Clone, Default)]
pub struct FindSpec {
    pub projection: Option<Document>,
    pub sort: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

/// The seam in front of the external database. Every query the tour issues
/// goes through this trait; the only implementation outside of tests wraps the
/// mongodb driver.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_books(&self, filter: Document, spec: FindSpec) -> Result<Vec<Document>>;

    /// Returns the number of modified documents.
    async fn update_one(&self, filter: Document, update: Document) -> Result<u64>;

    /// Returns the number of deleted documents.
    async fn delete_one(&self, filter: Document) -> Result<u64>;

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>>;

    /// Returns the name of the created index.
    async fn create_index(&self, keys: Document) -> Result<String>;

    /// Runs the server-side explain command for a find with the given filter
    /// and returns the full explanation document.
    async fn explain_find(&self, filter: Document) -> Result<Document>;

    /// Returns the number of inserted documents.
    async fn insert_books(&self, books: Vec<Document>) -> Result<u64>;

    async fn count_books(&self) -> Result<u64>;
}

pub trait ConfigProvider: Send + Sync {
    fn connection_uri(&self) -> &str;
    fn database(&self) -> &str;
    fn collection(&self) -> &str;
    fn page_size(&self) -> i64;
    fn read_only(&self) -> bool;
    fn seed(&self) -> bool;
    fn report_path(&self) -> Option<&str>;
}

/// Destination for the serialized run report.
pub trait ReportSink: Send + Sync {
    fn write_report(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
