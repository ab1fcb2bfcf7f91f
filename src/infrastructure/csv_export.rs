// CSV serialization of contacts for download
use crate::domain::contact::Contact;
use chrono::NaiveDate;

const HEADER: &str = "Date,Name,Email,Subject,Message,Status\n";

#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("grosity-contacts-{}.csv", date.format("%Y-%m-%d"))
}

/// Plain header line, then one row per contact with every field quoted
/// and embedded quotes doubled.
pub fn contacts_csv(contacts: &[Contact]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(HEADER.as_bytes().to_vec());

    for contact in contacts {
        writer.write_record([
            contact.full_date().as_str(),
            contact.name.as_deref().unwrap_or_default(),
            contact.email.as_deref().unwrap_or_default(),
            contact.subject.as_deref().unwrap_or_default(),
            contact.message.as_deref().unwrap_or_default(),
            contact.status.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
