// Chart panel domain models
use super::session::Theme;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartSlot {
    Visitors,
    UserTypes,
    Contacts,
    Engagement,
    Traffic,
    Sources,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 6] = [
        ChartSlot::Visitors,
        ChartSlot::UserTypes,
        ChartSlot::Contacts,
        ChartSlot::Engagement,
        ChartSlot::Traffic,
        ChartSlot::Sources,
    ];

    /// Element id of the slot's canvas on the page
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::Visitors => "visitorsChart",
            ChartSlot::UserTypes => "userTypesChart",
            ChartSlot::Contacts => "contactsChart",
            ChartSlot::Engagement => "engagementChart",
            ChartSlot::Traffic => "trafficChart",
            ChartSlot::Sources => "sourcesChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    Line,
    Radar,
    Pie,
}

/// Where a panel's numbers come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Sample,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub colors: Vec<String>,
}

impl Dataset {
    pub fn new(label: &str, data: Vec<f64>, colors: Vec<&str>) -> Self {
        Self {
            label: label.to_string(),
            data,
            colors: colors.into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub source: DataSource,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub palette: ChartPalette,
}

/// What currently occupies a chart slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlotContent {
    Chart(ChartSpec),
    EmptyState { message: String },
}

impl SlotContent {
    pub fn empty_state() -> Self {
        SlotContent::EmptyState {
            message: "No data yet\nVisit your website to start tracking".to_string(),
        }
    }

    #[cfg(test)]
    pub fn source(&self) -> Option<DataSource> {
        match self {
            SlotContent::Chart(spec) => Some(spec.source),
            SlotContent::EmptyState { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPalette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub tertiary: &'static str,
    pub quaternary: &'static str,
    pub quinary: &'static str,
    pub senary: &'static str,
    pub text: &'static str,
    pub grid: &'static str,
    pub background: &'static str,
}

impl ChartPalette {
    pub fn for_theme(theme: Theme) -> Self {
        let dark = theme == Theme::Dark;
        Self {
            primary: "#FFD700",
            secondary: "#22C55E",
            tertiary: "#3b82f6",
            quaternary: "#ef4444",
            quinary: "#8b5cf6",
            senary: "#f59e0b",
            text: if dark { "#ffffff" } else { "#000000" },
            grid: if dark { "rgba(255, 255, 255, 0.1)" } else { "rgba(0, 0, 0, 0.1)" },
            background: if dark { "rgba(255, 215, 0, 0.1)" } else { "rgba(255, 215, 0, 0.05)" },
        }
    }
}
