// Chart panel builders: the live-data path, the sample-data path and the empty state
use crate::domain::analytics::{AnalyticsDay, short_range};
use crate::domain::chart::{ChartKind, ChartPalette, ChartSlot, ChartSpec, DataSource, Dataset, SlotContent};

/// What the analytics query produced, decided before any panel is built
#[derive(Debug, Clone, PartialEq)]
pub enum DataAvailability {
    /// Chronological days, at least one
    Live(Vec<AnalyticsDay>),
    /// The query succeeded but returned nothing
    Empty,
    /// The query failed
    Unavailable,
}

impl DataAvailability {
    /// `None` means the query failed
    pub fn from_days(days: Option<Vec<AnalyticsDay>>) -> Self {
        match days {
            Some(days) if short_range(&days).is_empty() => DataAvailability::Empty,
            Some(days) => DataAvailability::Live(days),
            None => DataAvailability::Unavailable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataAvailability::Live(_) => "live",
            DataAvailability::Empty => "empty",
            DataAvailability::Unavailable => "sample",
        }
    }
}

pub fn build_panels(availability: &DataAvailability, palette: &ChartPalette) -> Vec<(ChartSlot, SlotContent)> {
    match availability {
        DataAvailability::Live(days) => live_panels(short_range(days), palette),
        DataAvailability::Empty => ChartSlot::ALL
            .into_iter()
            .map(|slot| (slot, SlotContent::empty_state()))
            .collect(),
        DataAvailability::Unavailable => sample_panels(palette),
    }
}

/// Weekly visitors from the store; every other panel is still illustrative
fn live_panels(window: &[AnalyticsDay], palette: &ChartPalette) -> Vec<(ChartSlot, SlotContent)> {
    let visitors = ChartSpec {
        kind: ChartKind::Bar,
        source: DataSource::Live,
        labels: window.iter().map(AnalyticsDay::weekday_label).collect(),
        datasets: vec![Dataset::new(
            "Page Views",
            window.iter().map(|d| d.page_views as f64).collect(),
            vec![palette.primary],
        )],
        palette: palette.clone(),
    };

    let mut panels = vec![(ChartSlot::Visitors, SlotContent::Chart(visitors))];
    panels.extend(illustrative_panels(palette));
    panels
}

fn sample_panels(palette: &ChartPalette) -> Vec<(ChartSlot, SlotContent)> {
    let visitors = sample_chart(
        ChartKind::Bar,
        &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        vec![Dataset::new(
            "Visitors (Sample)",
            vec![5.0, 8.0, 3.0, 12.0, 15.0, 10.0, 7.0],
            vec![palette.primary],
        )],
        palette,
    );

    let mut panels = vec![(ChartSlot::Visitors, SlotContent::Chart(visitors))];
    panels.extend(illustrative_panels(palette));
    panels
}

// Nothing in the store backs these yet.
fn illustrative_panels(palette: &ChartPalette) -> Vec<(ChartSlot, SlotContent)> {
    let user_types = sample_chart(
        ChartKind::Doughnut,
        &["Farmers", "Vendors", "Consumers"],
        vec![Dataset::new(
            "User Types (Sample)",
            vec![35.0, 28.0, 37.0],
            vec![palette.secondary, palette.primary, palette.tertiary],
        )],
        palette,
    );

    let contacts = sample_chart(
        ChartKind::Line,
        &["Week 1", "Week 2", "Week 3", "Week 4"],
        vec![Dataset::new(
            "Submissions (Sample)",
            vec![12.0, 19.0, 15.0, 25.0],
            vec![palette.secondary],
        )],
        palette,
    );

    let engagement = sample_chart(
        ChartKind::Radar,
        &["Home", "About", "Services", "Contact", "Network"],
        vec![Dataset::new(
            "Engagement Score (Sample)",
            vec![85.0, 72.0, 68.0, 90.0, 78.0],
            vec![palette.primary],
        )],
        palette,
    );

    let traffic = sample_chart(
        ChartKind::Line,
        &["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
        vec![
            Dataset::new(
                "Page Views (Sample)",
                vec![
                    1200.0, 1900.0, 1500.0, 2100.0, 2400.0, 2200.0, 2800.0, 3100.0, 2900.0, 3400.0,
                    3600.0, 3800.0,
                ],
                vec![palette.primary],
            ),
            Dataset::new(
                "Unique Visitors (Sample)",
                vec![
                    800.0, 1200.0, 1000.0, 1400.0, 1600.0, 1500.0, 1900.0, 2100.0, 2000.0, 2300.0,
                    2500.0, 2700.0,
                ],
                vec![palette.secondary],
            ),
        ],
        palette,
    );

    let sources = sample_chart(
        ChartKind::Pie,
        &["Direct", "Social Media", "Search", "Referral", "Email"],
        vec![Dataset::new(
            "Traffic Sources (Sample)",
            vec![30.0, 25.0, 20.0, 15.0, 10.0],
            vec![
                palette.primary,
                palette.secondary,
                palette.tertiary,
                palette.quaternary,
                palette.quinary,
            ],
        )],
        palette,
    );

    vec![
        (ChartSlot::UserTypes, SlotContent::Chart(user_types)),
        (ChartSlot::Contacts, SlotContent::Chart(contacts)),
        (ChartSlot::Engagement, SlotContent::Chart(engagement)),
        (ChartSlot::Traffic, SlotContent::Chart(traffic)),
        (ChartSlot::Sources, SlotContent::Chart(sources)),
    ]
}

fn sample_chart(kind: ChartKind, labels: &[&str], datasets: Vec<Dataset>, palette: &ChartPalette) -> ChartSpec {
    ChartSpec {
        kind,
        source: DataSource::Sample,
        labels: labels.iter().map(|l| l.to_string()).collect(),
        datasets,
        palette: palette.clone(),
    }
}
