use crate::domain::ports::{BookStore, FindSpec};
use crate::utils::error::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database, IndexModel};

/// Concrete `BookStore` backed by the mongodb driver. Owns one client for the
/// lifetime of the run; the connection is released when the value drops.
pub struct MongoBookStore {
    database: Database,
    collection: Collection<Document>,
    collection_name: String,
}

impl MongoBookStore {
    /// Parses the URI, builds the client and round-trips a `ping` before any
    /// query step runs.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;
        let database = client.database(database);
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!("Connected to {}/{}", database.name(), collection);

        Ok(Self {
            collection: database.collection::<Document>(collection),
            collection_name: collection.to_string(),
            database,
        })
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn find_books(&self, filter: Document, spec: FindSpec) -> Result<Vec<Document>> {
        let mut find = self.collection.find(filter);
        if let Some(projection) = spec.projection {
            find = find.projection(projection);
        }
        if let Some(sort) = spec.sort {
            find = find.sort(sort);
        }
        if let Some(skip) = spec.skip {
            find = find.skip(skip);
        }
        if let Some(limit) = spec.limit {
            find = find.limit(limit);
        }

        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_one(&self, filter: Document, update: Document) -> Result<u64> {
        let result = self.collection.update_one(filter, update).await?;
        Ok(result.modified_count)
    }

    async fn delete_one(&self, filter: Document) -> Result<u64> {
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>> {
        let cursor = self.collection.aggregate(pipeline).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn create_index(&self, keys: Document) -> Result<String> {
        let result = self
            .collection
            .create_index(IndexModel::builder().keys(keys).build())
            .await?;
        Ok(result.index_name)
    }

    async fn explain_find(&self, filter: Document) -> Result<Document> {
        // The driver exposes no cursor-level explain; issue the database
        // command directly.
        let command = doc! {
            "explain": {
                "find": self.collection_name.as_str(),
                "filter": filter,
            },
            "verbosity": "executionStats",
        };
        Ok(self.database.run_command(command).await?)
    }

    async fn insert_books(&self, books: Vec<Document>) -> Result<u64> {
        let result = self.collection.insert_many(books).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn count_books(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}
