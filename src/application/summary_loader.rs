// Dashboard summary loader - contact count plus 30-day analytics figures
use crate::application::document_store::DocumentStore;
use crate::domain::analytics::{
    ANALYTICS_COLLECTION, ANALYTICS_WINDOW_DAYS, AnalyticsDay, AnalyticsTotals, format_count,
};
use crate::domain::contact::CONTACTS_COLLECTION;
use crate::domain::document::{CollectionQuery, Direction};
use crate::domain::view::SummaryPanel;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct SummaryLoader;

impl SummaryLoader {
    pub fn new() -> Self {
        Self
    }

    /// Both reads run concurrently; each failure degrades only its own figures
    pub async fn load(&self, store: &Arc<dyn DocumentStore>) -> SummaryPanel {
        let (contacts, analytics) = futures::join!(
            self.fetch_contact_count(store),
            self.fetch_analytics(store)
        );

        let mut panel = SummaryPanel::default();
        if let Some(count) = contacts {
            panel.total_contacts = count.to_string();
        }
        if let Some(totals) = analytics {
            panel.total_views = format_count(totals.total_views);
            panel.chatbot_interactions = format_count(totals.total_chatbot);
            panel.avg_time = totals.average_session();
        }
        panel
    }

    async fn fetch_contact_count(&self, store: &Arc<dyn DocumentStore>) -> Option<usize> {
        match store.count(CONTACTS_COLLECTION).await {
            Ok(count) => {
                tracing::info!(count, "Loaded contact count");
                Some(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading contacts");
                None
            }
        }
    }

    async fn fetch_analytics(&self, store: &Arc<dyn DocumentStore>) -> Option<AnalyticsTotals> {
        let query = CollectionQuery::all(ANALYTICS_COLLECTION)
            .order_by("date", Direction::Descending)
            .limit(ANALYTICS_WINDOW_DAYS);

        match store.query(&query).await {
            Ok(docs) => {
                let days: Vec<AnalyticsDay> = docs.iter().map(AnalyticsDay::from_document).collect();
                let totals = AnalyticsTotals::from_days(&days);
                tracing::info!(
                    total_views = totals.total_views,
                    chatbot_interactions = totals.total_chatbot,
                    days = totals.days,
                    "Loaded analytics summary"
                );
                Some(totals)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading analytics");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{Document, FieldValue};
    use crate::infrastructure::memory_store::MemoryStore;

    fn analytics_doc(date: &str, views: i64, chatbot: i64, duration: f64) -> Document {
        Document::new(date)
            .with_field("date", FieldValue::String(date.to_string()))
            .with_field("pageViews", FieldValue::Integer(views))
            .with_field("chatbotInteractions", FieldValue::Integer(chatbot))
            .with_field("avgSessionDuration", FieldValue::Double(duration))
    }

    #[tokio::test]
    async fn test_three_days_total_views() {
        let store = MemoryStore::new();
        store.insert(ANALYTICS_COLLECTION, analytics_doc("2025-01-01", 10, 1, 60.0)).await;
        store.insert(ANALYTICS_COLLECTION, analytics_doc("2025-01-02", 20, 2, 90.0)).await;
        store.insert(ANALYTICS_COLLECTION, analytics_doc("2025-01-03", 30, 3, 95.0)).await;
        store.insert(CONTACTS_COLLECTION, Document::new("a")).await;
        let store: Arc<dyn DocumentStore> = Arc::new(store);

        let panel = SummaryLoader::new().load(&store).await;
        assert_eq!(panel.total_views, "60");
        assert_eq!(panel.chatbot_interactions, "6");
        assert_eq!(panel.total_contacts, "1");
        // floor(245 / 3) = 81s
        assert_eq!(panel.avg_time, "1m 21s");
    }

    #[tokio::test]
    async fn test_only_latest_thirty_days_count() {
        let store = MemoryStore::new();
        for d in 1..=31 {
            store
                .insert(ANALYTICS_COLLECTION, analytics_doc(&format!("2025-01-{:02}", d), 1000, 0, 0.0))
                .await;
        }
        let store: Arc<dyn DocumentStore> = Arc::new(store);

        let panel = SummaryLoader::new().load(&store).await;
        assert_eq!(panel.total_views, "30,000");
        assert_eq!(panel.avg_time, "0s");
    }

    #[tokio::test]
    async fn test_failure_degrades_to_zero() {
        let store = MemoryStore::new();
        store.insert(ANALYTICS_COLLECTION, analytics_doc("2025-01-01", 10, 1, 60.0)).await;
        store.set_failing(true);
        let store: Arc<dyn DocumentStore> = Arc::new(store);

        let panel = SummaryLoader::new().load(&store).await;
        assert_eq!(panel, SummaryPanel::default());
    }
}
