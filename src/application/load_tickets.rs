// Per-panel load tickets so a superseded load never overwrites a newer one
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Summary,
    Contacts,
    Analytics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    panel: Panel,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct LoadTickets {
    summary: AtomicU64,
    contacts: AtomicU64,
    analytics: AtomicU64,
}

impl LoadTickets {
    fn counter(&self, panel: Panel) -> &AtomicU64 {
        match panel {
            Panel::Summary => &self.summary,
            Panel::Contacts => &self.contacts,
            Panel::Analytics => &self.analytics,
        }
    }

    /// Starts a load; every earlier ticket for the panel becomes stale
    pub fn issue(&self, panel: Panel) -> LoadTicket {
        let seq = self.counter(panel).fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { panel, seq }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.counter(ticket.panel).load(Ordering::SeqCst) == ticket.seq
    }
}
