// Analytics day domain model and the figures derived from it
use super::document::{Document, FieldValue};
use chrono::NaiveDate;

pub const ANALYTICS_COLLECTION: &str = "admin_analytics";

/// Number of most recent days read for the summary and the charts
pub const ANALYTICS_WINDOW_DAYS: usize = 30;

/// Number of days shown by the short-range charts
pub const SHORT_RANGE_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsDay {
    pub date: String,
    pub page_views: i64,
    pub chatbot_interactions: i64,
    pub avg_session_duration: f64,
}

impl AnalyticsDay {
    pub fn new(date: impl Into<String>, page_views: i64, chatbot_interactions: i64, avg_session_duration: f64) -> Self {
        Self {
            date: date.into(),
            page_views,
            chatbot_interactions,
            avg_session_duration,
        }
    }

    pub fn from_document(doc: &Document) -> Self {
        let number = |name: &str| doc.get(name).and_then(FieldValue::as_i64).unwrap_or(0);
        Self::new(
            doc.string("date").unwrap_or_else(|| doc.id.clone()),
            number("pageViews"),
            number("chatbotInteractions"),
            doc.get("avgSessionDuration")
                .and_then(FieldValue::as_f64)
                .unwrap_or(0.0),
        )
    }

    /// Short weekday name for the date, e.g. `Mon`; falls back to the raw key
    pub fn weekday_label(&self) -> String {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map(|d| d.format("%a").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

/// Sums over a set of analytics days
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsTotals {
    pub total_views: i64,
    pub total_chatbot: i64,
    pub total_engagement: f64,
    pub days: usize,
}

impl AnalyticsTotals {
    pub fn from_days(days: &[AnalyticsDay]) -> Self {
        days.iter().fold(Self::default(), |mut acc, day| {
            acc.total_views = acc.total_views.saturating_add(day.page_views);
            acc.total_chatbot = acc.total_chatbot.saturating_add(day.chatbot_interactions);
            acc.total_engagement += day.avg_session_duration;
            acc.days += 1;
            acc
        })
    }

    pub fn average_session(&self) -> String {
        format_avg_session(self.total_engagement, self.days)
    }
}

/// `floor(sum / days)` seconds as `Mm Ss`; `0s` when there is nothing to average
pub fn format_avg_session(total_seconds: f64, days: usize) -> String {
    if days == 0 || total_seconds <= 0.0 {
        return "0s".to_string();
    }
    let avg = (total_seconds / days as f64).floor() as i64;
    format!("{}m {}s", avg / 60, avg % 60)
}

/// Integer with thousands separators, e.g. `12,345`
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Converts a newest-first query result into chronological order
pub fn chronological(mut newest_first: Vec<AnalyticsDay>) -> Vec<AnalyticsDay> {
    newest_first.reverse();
    newest_first
}

/// The most recent `SHORT_RANGE_DAYS` entries of a chronological series
pub fn short_range(days: &[AnalyticsDay]) -> &[AnalyticsDay] {
    let start = days.len().saturating_sub(SHORT_RANGE_DAYS);
    &days[start..]
}
