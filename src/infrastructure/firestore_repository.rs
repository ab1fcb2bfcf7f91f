// Firestore REST repository implementation
use crate::application::document_store::{DocumentStore, StoreError};
use crate::domain::document::{CollectionQuery, Direction, Document, FieldValue};
use crate::infrastructure::config::StoreSettings;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct FirestoreRepository {
    client: reqwest::Client,
    documents_url: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

/// A document as returned by the REST API
#[derive(Debug, Deserialize)]
pub struct FirestoreDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<FirestoreDocument>,
}

impl FirestoreRepository {
    pub fn new(settings: &StoreSettings) -> anyhow::Result<Self> {
        let project_id = settings
            .project_id
            .as_deref()
            .context("store.project_id is required for the firestore backend")?;
        let base = settings.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            documents_url: documents_url(base, project_id),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
            access_token: settings.access_token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.documents_url,
            urlencoding::encode(collection),
            urlencoding::encode(id)
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        };
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request; any non-success status except 404 becomes an error
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Option<reqwest::Response>, StoreError> {
        let response = self
            .authorize(request)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(Some(response))
    }

    async fn run_query(&self, body: Value) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.documents_url);
        tracing::debug!(%url, query = %body, "Executing Firestore query");

        let response = self
            .send(self.client.post(&url).json(&body))
            .await?
            .ok_or_else(|| StoreError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: "database not found".to_string(),
            })?;

        let items = response
            .json::<Vec<RunQueryItem>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        items
            .into_iter()
            .filter_map(|item| item.document)
            .map(decode_document)
            .collect()
    }
}

#[async_trait]
impl DocumentStore for FirestoreRepository {
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<Document>, StoreError> {
        self.run_query(structured_query(query, false)).await
    }

    async fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let docs = self
            .run_query(structured_query(&CollectionQuery::all(collection), true))
            .await?;
        Ok(docs.len())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.document_url(collection, id);
        match self.send(self.client.get(&url)).await? {
            Some(response) => {
                let doc = response
                    .json::<FirestoreDocument>()
                    .await
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                decode_document(doc).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn update_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        let body = json!({ "fields": { field: encode_value(&value) } });
        let request = self
            .client
            .patch(&url)
            .query(&[("updateMask.fieldPaths", field), ("currentDocument.exists", "true")])
            .json(&body);

        match self.send(request).await? {
            Some(_) => Ok(()),
            None => Err(StoreError::Missing {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

pub fn documents_url(base: &str, project_id: &str) -> String {
    format!(
        "{}/projects/{}/databases/(default)/documents",
        base.trim_end_matches('/'),
        project_id
    )
}

/// `structuredQuery` body for `:runQuery`; `names_only` selects just the document names
pub fn structured_query(query: &CollectionQuery, names_only: bool) -> Value {
    let mut structured = json!({
        "from": [{ "collectionId": query.collection }],
    });

    if names_only {
        structured["select"] = json!({ "fields": [{ "fieldPath": "__name__" }] });
    }
    if let Some((field, direction)) = &query.order_by {
        let direction = match direction {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        };
        structured["orderBy"] = json!([{ "field": { "fieldPath": field }, "direction": direction }]);
    }
    if let Some(limit) = query.limit {
        structured["limit"] = json!(limit);
    }

    json!({ "structuredQuery": structured })
}

pub fn decode_document(doc: FirestoreDocument) -> Result<Document, StoreError> {
    let id = doc
        .name
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StoreError::Decode(format!("document name without id: {}", doc.name)))?;

    let mut decoded = Document::new(urlencoding::decode(id).map(|s| s.into_owned()).unwrap_or_else(|_| id.to_string()));
    for (name, value) in &doc.fields {
        decoded.fields.insert(name.clone(), decode_value(value));
    }
    Ok(decoded)
}

/// Typed value wrapper (`{"stringValue": ...}` etc.) to a field value.
/// Maps, arrays, references and geo points are not used by this dashboard and decode as null.
pub fn decode_value(value: &Value) -> FieldValue {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return FieldValue::Null;
    };

    match kind.as_str() {
        "stringValue" => inner.as_str().map(|s| FieldValue::String(s.to_string())).unwrap_or(FieldValue::Null),
        // int64 travels as a JSON string
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map(FieldValue::Integer)
            .unwrap_or(FieldValue::Null),
        "doubleValue" => inner
            .as_f64()
            .or_else(|| inner.as_str().and_then(|s| s.parse::<f64>().ok()))
            .map(FieldValue::Double)
            .unwrap_or(FieldValue::Null),
        "timestampValue" => inner
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| FieldValue::Timestamp(t.with_timezone(&Utc)))
            .unwrap_or(FieldValue::Null),
        "booleanValue" => inner.as_bool().map(FieldValue::Bool).unwrap_or(FieldValue::Null),
        _ => FieldValue::Null,
    }
}

pub fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Integer(i) => json!({ "integerValue": i.to_string() }),
        FieldValue::Double(d) => json!({ "doubleValue": d }),
        FieldValue::Timestamp(t) => json!({ "timestampValue": t.to_rfc3339() }),
        FieldValue::Bool(b) => json!({ "booleanValue": b }),
        FieldValue::Null => json!({ "nullValue": null }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_documents_url() {
        assert_eq!(
            documents_url("https://firestore.googleapis.com/v1/", "grosityindia"),
            "https://firestore.googleapis.com/v1/projects/grosityindia/databases/(default)/documents"
        );
    }

    #[test]
    fn test_structured_query_order_and_limit() {
        let query = CollectionQuery::all("admin_analytics")
            .order_by("date", Direction::Descending)
            .limit(30);
        let body = structured_query(&query, false);
        assert_eq!(
            body,
            json!({
                "structuredQuery": {
                    "from": [{ "collectionId": "admin_analytics" }],
                    "orderBy": [{ "field": { "fieldPath": "date" }, "direction": "DESCENDING" }],
                    "limit": 30
                }
            })
        );
    }

    #[test]
    fn test_count_query_selects_names_only() {
        let body = structured_query(&CollectionQuery::all("contacts"), true);
        assert_eq!(body["structuredQuery"]["select"]["fields"][0]["fieldPath"], "__name__");
        assert!(body["structuredQuery"].get("orderBy").is_none());
    }

    #[test]
    fn test_decode_document() {
        let raw = json!({
            "name": "projects/p/databases/(default)/documents/contacts/abc123",
            "fields": {
                "name": { "stringValue": "Meera" },
                "pageViews": { "integerValue": "42" },
                "avgSessionDuration": { "doubleValue": 93.5 },
                "timestamp": { "timestampValue": "2025-04-01T10:15:00.123456Z" },
                "tags": { "arrayValue": { "values": [] } }
            },
            "createTime": "2025-04-01T10:15:00Z"
        });
        let doc: FirestoreDocument = serde_json::from_value(raw).unwrap();
        let decoded = decode_document(doc).unwrap();

        assert_eq!(decoded.id, "abc123");
        assert_eq!(decoded.string("name").as_deref(), Some("Meera"));
        assert_eq!(decoded.get("pageViews"), Some(&FieldValue::Integer(42)));
        assert_eq!(decoded.get("avgSessionDuration"), Some(&FieldValue::Double(93.5)));
        assert_eq!(decoded.get("tags"), Some(&FieldValue::Null));
        let ts = decoded.get("timestamp").and_then(FieldValue::as_timestamp).unwrap();
        assert_eq!(ts.date_naive(), Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap().date_naive());
    }

    #[test]
    fn test_encode_status_update() {
        assert_eq!(
            encode_value(&FieldValue::String("read".to_string())),
            json!({ "stringValue": "read" })
        );
        assert_eq!(encode_value(&FieldValue::Integer(7)), json!({ "integerValue": "7" }));
    }

    #[test]
    fn test_new_requires_project_id() {
        assert!(FirestoreRepository::new(&StoreSettings::default()).is_err());
    }
}
