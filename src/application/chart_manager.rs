// Chart manager - owns the chart registry and rebuilds every slot on each analytics load
use crate::application::chart_panels::{DataAvailability, build_panels};
use crate::application::document_store::DocumentStore;
use crate::domain::analytics::{ANALYTICS_COLLECTION, ANALYTICS_WINDOW_DAYS, AnalyticsDay, chronological};
use crate::domain::chart::{ChartPalette, ChartSlot, SlotContent};
use crate::domain::document::{CollectionQuery, Direction};
use crate::domain::session::Theme;
use crate::domain::view::ChartSlotView;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::Mutex;

/// A built chart bound to one slot. Only the registry holds instances.
#[derive(Debug)]
pub struct ChartInstance {
    id: u64,
    slot: ChartSlot,
    content: SlotContent,
}

impl ChartInstance {
    fn new(id: u64, slot: ChartSlot, content: SlotContent) -> Self {
        Self { id, slot, content }
    }

    #[cfg(test)]
    pub fn id(&self) -> u64 {
        self.id
    }

    fn view(&self) -> ChartSlotView {
        ChartSlotView {
            slot: self.slot,
            canvas_id: self.slot.canvas_id(),
            instance: self.id,
            content: self.content.clone(),
        }
    }

    fn destroy(self) {
        tracing::trace!(slot = ?self.slot, instance = self.id, "Destroyed chart instance");
    }
}

/// At most one live instance per slot
#[derive(Debug, Default)]
pub struct ChartRegistry {
    instances: BTreeMap<ChartSlot, ChartInstance>,
}

impl ChartRegistry {
    /// Releases any instance already bound to the slot before binding the new one
    pub fn insert(&mut self, instance: ChartInstance) {
        if let Some(previous) = self.instances.remove(&instance.slot) {
            previous.destroy();
        }
        self.instances.insert(instance.slot, instance);
    }

    /// Releases every instance; returns how many were live
    pub fn destroy_all(&mut self) -> usize {
        let released = self.instances.len();
        for (_, instance) in std::mem::take(&mut self.instances) {
            instance.destroy();
        }
        released
    }

    #[cfg(test)]
    pub fn instance_ids(&self) -> Vec<u64> {
        self.instances.values().map(ChartInstance::id).collect()
    }

    pub fn views(&self) -> Vec<ChartSlotView> {
        self.instances.values().map(ChartInstance::view).collect()
    }
}

/// Completion report of one analytics load
#[derive(Debug, Clone)]
pub struct ChartBuild {
    pub views: Vec<ChartSlotView>,
    pub data: &'static str,
    pub released: usize,
    pub elapsed_ms: u64,
}

pub struct ChartManager {
    registry: Mutex<ChartRegistry>,
    next_instance: AtomicU64,
}

impl Default for ChartManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartManager {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(ChartRegistry::default()),
            next_instance: AtomicU64::new(1),
        }
    }

    /// Destroys every chart, queries the analytics window and rebuilds all slots.
    /// The registry stays locked for the whole load so concurrent loads run one after another.
    pub async fn load(&self, store: &Arc<dyn DocumentStore>, theme: Theme) -> ChartBuild {
        let started = Instant::now();
        let mut registry = self.registry.lock().await;

        let released = registry.destroy_all();

        let availability = DataAvailability::from_days(self.fetch_days(store).await);
        let palette = ChartPalette::for_theme(theme);

        for (slot, content) in build_panels(&availability, &palette) {
            let id = self.next_instance.fetch_add(1, Ordering::Relaxed);
            registry.insert(ChartInstance::new(id, slot, content));
        }

        let build = ChartBuild {
            views: registry.views(),
            data: availability.label(),
            released,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            slots = build.views.len(),
            released = build.released,
            data = build.data,
            elapsed_ms = build.elapsed_ms,
            "Analytics charts loaded"
        );

        build
    }

    /// Chronological days, or `None` when the query failed
    async fn fetch_days(&self, store: &Arc<dyn DocumentStore>) -> Option<Vec<AnalyticsDay>> {
        let query = CollectionQuery::all(ANALYTICS_COLLECTION)
            .order_by("date", Direction::Descending)
            .limit(ANALYTICS_WINDOW_DAYS);

        match store.query(&query).await {
            Ok(docs) => {
                let newest_first: Vec<AnalyticsDay> = docs.iter().map(AnalyticsDay::from_document).collect();
                tracing::info!(days = newest_first.len(), "Loaded analytics data for charts");
                Some(chronological(newest_first))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading analytics for charts; using sample data");
                None
            }
        }
    }

    #[cfg(test)]
    pub async fn instance_ids(&self) -> Vec<u64> {
        self.registry.lock().await.instance_ids()
    }
}
