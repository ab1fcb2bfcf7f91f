// Page view model: section visibility plus the content of every panel
use super::chart::{ChartSlot, SlotContent};
use super::contact::ContactRow;
use super::session::{Session, Theme};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Login,
    Dashboard,
    Contacts,
    Analytics,
    Settings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Login,
        Section::Dashboard,
        Section::Contacts,
        Section::Analytics,
        Section::Settings,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "login" | "login-section" => Some(Section::Login),
            "dashboard" => Some(Section::Dashboard),
            "contacts" => Some(Section::Contacts),
            "analytics" => Some(Section::Analytics),
            "settings" => Some(Section::Settings),
            _ => None,
        }
    }

    pub fn element_id(&self) -> &'static str {
        match self {
            Section::Login => "login-section",
            Section::Dashboard => "dashboard",
            Section::Contacts => "contacts",
            Section::Analytics => "analytics",
            Section::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Hidden,
    /// Laid out but not shown yet (waiting on chart construction)
    Pending,
    Visible,
}

/// When the client should fade the target section back in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Reveal {
    Immediate,
    OnChartsReady,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionPlan {
    pub target: Section,
    pub fade_out_ms: u64,
    pub settle_ms: u64,
    pub offset_px: u32,
    pub reveal: Reveal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPanel {
    pub total_contacts: String,
    pub total_views: String,
    pub chatbot_interactions: String,
    pub avg_time: String,
}

impl Default for SummaryPanel {
    fn default() -> Self {
        Self {
            total_contacts: "0".to_string(),
            total_views: "0".to_string(),
            chatbot_interactions: "0".to_string(),
            avg_time: "0s".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ContactsTable {
    Loading { message: String },
    Rows { rows: Vec<ContactRow> },
    Empty { message: String },
    Error { message: String },
}

impl ContactsTable {
    pub fn loading() -> Self {
        ContactsTable::Loading {
            message: "Loading contacts...".to_string(),
        }
    }

    pub fn empty() -> Self {
        ContactsTable::Empty {
            message: "No contacts yet. Contacts from the website will appear here.".to_string(),
        }
    }

    pub fn error(reason: &str) -> Self {
        ContactsTable::Error {
            message: format!("Error loading contacts: {}", reason),
        }
    }

    pub fn from_rows(rows: Vec<ContactRow>) -> Self {
        if rows.is_empty() {
            Self::empty()
        } else {
            ContactsTable::Rows { rows }
        }
    }

    /// Ids of the contacts currently listed
    #[cfg(test)]
    pub fn ids(&self) -> Vec<&str> {
        match self {
            ContactsTable::Rows { rows } => rows.iter().map(|r| r.id.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSlotView {
    pub slot: ChartSlot,
    pub canvas_id: &'static str,
    pub instance: u64,
    pub content: SlotContent,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub submitting: bool,
    pub alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub sections: BTreeMap<Section, Visibility>,
    pub session: Session,
    pub theme: Theme,
    pub login: LoginForm,
    pub summary: SummaryPanel,
    pub contacts: ContactsTable,
    pub charts: Vec<ChartSlotView>,
}

impl Page {
    pub fn new(session: Session, theme: Theme) -> Self {
        let mut page = Self {
            sections: BTreeMap::new(),
            session,
            theme,
            login: LoginForm::default(),
            summary: SummaryPanel::default(),
            contacts: ContactsTable::loading(),
            charts: Vec::new(),
        };
        page.show_only(Section::Login, Visibility::Visible);
        page
    }

    /// Hides every section except `target`, which gets `visibility`
    pub fn show_only(&mut self, target: Section, visibility: Visibility) {
        for section in Section::ALL {
            let v = if section == target { visibility } else { Visibility::Hidden };
            self.sections.insert(section, v);
        }
    }

    pub fn visibility(&self, section: Section) -> Visibility {
        self.sections.get(&section).copied().unwrap_or(Visibility::Hidden)
    }

    /// The one section that is visible or about to be
    pub fn current_section(&self) -> Option<Section> {
        self.sections
            .iter()
            .find(|(_, v)| **v != Visibility::Hidden)
            .map(|(s, _)| *s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_shows_login_only() {
        let page = Page::new(Session::logged_out(), Theme::Light);
        assert_eq!(page.current_section(), Some(Section::Login));
        let shown = page.sections.values().filter(|v| **v != Visibility::Hidden).count();
        assert_eq!(shown, 1);
    }

    #[test]
    fn test_show_only_hides_others() {
        let mut page = Page::new(Session::logged_out(), Theme::Light);
        page.show_only(Section::Analytics, Visibility::Pending);
        assert_eq!(page.visibility(Section::Login), Visibility::Hidden);
        assert_eq!(page.visibility(Section::Analytics), Visibility::Pending);
        assert_eq!(page.current_section(), Some(Section::Analytics));
    }

    #[test]
    fn test_parse_sections() {
        assert_eq!(Section::parse("contacts"), Some(Section::Contacts));
        assert_eq!(Section::parse("login-section"), Some(Section::Login));
        assert_eq!(Section::parse("reports"), None);
    }

    #[test]
    fn test_empty_rows_become_placeholder() {
        assert_eq!(ContactsTable::from_rows(Vec::new()), ContactsTable::empty());
    }
}
