// In-memory document store for local development and tests
use crate::application::document_store::{DocumentStore, StoreError};
use crate::domain::document::{CollectionQuery, Direction, Document, FieldValue};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

type Collection = BTreeMap<String, Document>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    failing: AtomicBool,
    failing_writes: AtomicBool,
    latency: std::sync::Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, collection: &str, doc: Document) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(doc.id.clone(), doc);
    }

    /// Every call fails with a transport error while set
    #[cfg(test)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Updates and deletes fail while set; reads still succeed
    #[cfg(test)]
    pub fn set_failing_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    /// Delay applied after a read has taken its snapshot
    #[cfg(test)]
    pub fn set_latency(&self, latency: Option<Duration>) {
        if let Ok(mut guard) = self.latency.lock() {
            *guard = latency;
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("memory store is set to fail".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        self.check()?;
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("memory store is set to reject writes".to_string()));
        }
        Ok(())
    }

    async fn delay(&self) {
        let latency = self.latency.lock().ok().and_then(|g| *g);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<Document>, StoreError> {
        self.check()?;
        let mut docs: Vec<Document> = {
            let collections = self.collections.read().await;
            collections
                .get(&query.collection)
                .map(|c| c.values().cloned().collect())
                .unwrap_or_default()
        };

        if let Some((field, direction)) = &query.order_by {
            // orderBy excludes documents lacking the field
            docs.retain(|d| d.get(field).is_some());
            docs.sort_by(|a, b| {
                let ord = a
                    .get(field)
                    .unwrap_or(&FieldValue::Null)
                    .order_cmp(b.get(field).unwrap_or(&FieldValue::Null));
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }

        self.delay().await;
        Ok(docs)
    }

    async fn count(&self, collection: &str) -> Result<usize, StoreError> {
        self.check()?;
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map(BTreeMap::len).unwrap_or(0))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.check()?;
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|c| c.get(id)).cloned())
    }

    async fn update_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| StoreError::Missing {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        doc.fields.insert(field.to_string(), value);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check_write()?;
        let mut collections = self.collections.write().await;
        if let Some(c) = collections.get_mut(collection) {
            c.remove(id);
        }
        Ok(())
    }
}
