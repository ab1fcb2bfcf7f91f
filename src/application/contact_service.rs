// Contact service - list loader and the row-level view/delete/export actions
use crate::application::document_store::{DocumentStore, StoreError};
use crate::domain::contact::{CONTACTS_COLLECTION, Contact, ContactDetails, ContactStatus};
use crate::domain::document::{CollectionQuery, Direction, FieldValue};
use crate::domain::view::ContactsTable;
use crate::infrastructure::csv_export::{CsvExport, contacts_csv, export_filename};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct ContactService;

impl ContactService {
    pub fn new() -> Self {
        Self
    }

    fn newest_first() -> CollectionQuery {
        CollectionQuery::all(CONTACTS_COLLECTION).order_by("timestamp", Direction::Descending)
    }

    async fn fetch_all(&self, store: &Arc<dyn DocumentStore>) -> Result<Vec<Contact>, StoreError> {
        let docs = store.query(&Self::newest_first()).await?;
        Ok(docs.iter().map(Contact::from_document).collect())
    }

    /// Contacts table content; errors become an inline error row
    pub async fn list(&self, store: &Arc<dyn DocumentStore>) -> ContactsTable {
        match self.fetch_all(store).await {
            Ok(contacts) => {
                tracing::info!(count = contacts.len(), "Loaded contacts");
                ContactsTable::from_rows(contacts.iter().map(Contact::to_row).collect())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading contacts");
                ContactsTable::error(&e.to_string())
            }
        }
    }

    /// Full details of one contact, or `None` if it does not exist
    pub async fn details(
        &self,
        store: &Arc<dyn DocumentStore>,
        id: &str,
    ) -> Result<Option<ContactDetails>, StoreError> {
        let doc = store.get(CONTACTS_COLLECTION, id).await?;
        Ok(doc.map(|d| Contact::from_document(&d).to_details()))
    }

    pub async fn mark_read(&self, store: &Arc<dyn DocumentStore>, id: &str) -> Result<(), StoreError> {
        store
            .update_field(
                CONTACTS_COLLECTION,
                id,
                "status",
                FieldValue::String(ContactStatus::Read.as_str().to_string()),
            )
            .await?;
        tracing::info!(id, "Contact marked as read");
        Ok(())
    }

    pub async fn delete(&self, store: &Arc<dyn DocumentStore>, id: &str) -> Result<(), StoreError> {
        store.delete(CONTACTS_COLLECTION, id).await?;
        tracing::info!(id, "Contact deleted");
        Ok(())
    }

    /// CSV of every contact, newest first; `None` when there is nothing to export
    pub async fn export(
        &self,
        store: &Arc<dyn DocumentStore>,
        now: DateTime<Utc>,
    ) -> Result<Option<CsvExport>, StoreError> {
        let contacts = self.fetch_all(store).await?;
        if contacts.is_empty() {
            tracing::info!("No contacts found to export");
            return Ok(None);
        }

        let body = contacts_csv(&contacts).map_err(|e| StoreError::Decode(e.to_string()))?;
        tracing::info!(count = contacts.len(), "Exported contacts to CSV");
        Ok(Some(CsvExport {
            filename: export_filename(now.date_naive()),
            body,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Document;
    use crate::infrastructure::memory_store::MemoryStore;
    use chrono::TimeZone;

    fn contact(id: &str, hour: u32, message: &str) -> Document {
        Document::new(id)
            .with_field("name", FieldValue::String(format!("Name {}", id)))
            .with_field("email", FieldValue::String(format!("{}@example.com", id)))
            .with_field("subject", FieldValue::String("Hello".to_string()))
            .with_field("message", FieldValue::String(message.to_string()))
            .with_field("status", FieldValue::String("new".to_string()))
            .with_field(
                "timestamp",
                FieldValue::Timestamp(Utc.with_ymd_and_hms(2025, 5, 1, hour, 0, 0).unwrap()),
            )
    }

    async fn seeded() -> Arc<dyn DocumentStore> {
        let store = MemoryStore::new();
        store.insert(CONTACTS_COLLECTION, contact("old", 8, "first")).await;
        store.insert(CONTACTS_COLLECTION, contact("new", 9, "second \"quoted\"")).await;
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = seeded().await;
        let table = ContactService::new().list(&store).await;
        assert_eq!(table.ids(), vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_empty_collection_shows_placeholder() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let table = ContactService::new().list(&store).await;
        assert_eq!(table, ContactsTable::empty());
    }

    #[tokio::test]
    async fn test_list_failure_is_inline_error() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let store: Arc<dyn DocumentStore> = Arc::new(store);
        let table = ContactService::new().list(&store).await;
        assert!(matches!(table, ContactsTable::Error { ref message } if message.starts_with("Error loading contacts:")));
    }

    #[tokio::test]
    async fn test_delete_removes_from_list() {
        let store = seeded().await;
        let service = ContactService::new();
        service.delete(&store, "old").await.unwrap();
        assert_eq!(service.list(&store).await.ids(), vec!["new"]);
    }

    #[tokio::test]
    async fn test_mark_read_updates_status() {
        let store = seeded().await;
        let service = ContactService::new();
        service.mark_read(&store, "new").await.unwrap();
        let details = service.details(&store, "new").await.unwrap().unwrap();
        assert_eq!(details.status, ContactStatus::Read);
    }

    #[tokio::test]
    async fn test_details_of_missing_contact() {
        let store = seeded().await;
        assert!(ContactService::new().details(&store, "ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_export_is_stable_for_same_snapshot() {
        let store = seeded().await;
        let service = ContactService::new();
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
        let first = service.export(&store, now).await.unwrap().unwrap();
        let second = service.export(&store, now).await.unwrap().unwrap();
        assert_eq!(first.body, second.body);
        assert_eq!(first.filename, "grosity-contacts-2025-06-02.csv");
        assert!(first.body.contains("\"second \"\"quoted\"\"\""));
    }

    #[tokio::test]
    async fn test_export_empty_collection() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let out = ContactService::new().export(&store, Utc::now()).await.unwrap();
        assert!(out.is_none());
    }
}
