// Document store trait and the readiness handle loaders guard on
use crate::domain::contact::CONTACTS_COLLECTION;
use crate::domain::document::{CollectionQuery, Document, FieldValue};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store is not initialized: {0}")]
    NotInitialized(String),

    #[error("request to document store failed: {0}")]
    Transport(String),

    #[error("document store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed document store response: {0}")]
    Decode(String),

    #[error("document {collection}/{id} does not exist")]
    Missing { collection: String, id: String },
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a collection, optionally ordered and limited
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<Document>, StoreError>;

    /// Number of documents in a collection
    async fn count(&self, collection: &str) -> Result<usize, StoreError>;

    /// Fetch one document; `Ok(None)` when it does not exist
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Overwrite a single field of an existing document
    async fn update_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StoreError>;

    /// Remove a document by id
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Outcome of the one-time store initialization
#[derive(Clone)]
pub enum StoreHandle {
    Ready(Arc<dyn DocumentStore>),
    Failed(String),
}

impl StoreHandle {
    /// Probe the store once with a single-document read
    pub async fn initialize(store: Arc<dyn DocumentStore>) -> Self {
        let probe = CollectionQuery::all(CONTACTS_COLLECTION).limit(1);
        match store.query(&probe).await {
            Ok(docs) => {
                tracing::info!(
                    has_data = !docs.is_empty(),
                    "Document store connection successful"
                );
                StoreHandle::Ready(store)
            }
            Err(e) => {
                tracing::error!(error = %e, "Document store connection failed");
                StoreHandle::Failed(e.to_string())
            }
        }
    }

    pub fn require(&self) -> Result<&Arc<dyn DocumentStore>, StoreError> {
        match self {
            StoreHandle::Ready(store) => Ok(store),
            StoreHandle::Failed(reason) => Err(StoreError::NotInitialized(reason.clone())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, StoreHandle::Ready(_))
    }
}
