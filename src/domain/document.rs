// Stored document model shared by every document store
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value; doubles are truncated toward zero
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Double(d) => Some(*d as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Ordering used by `orderBy`: nulls first, then numbers, then
    /// strings, then timestamps. Values of different kinds never compare equal.
    pub fn order_cmp(&self, other: &FieldValue) -> Ordering {
        fn rank(v: &FieldValue) -> u8 {
            match v {
                FieldValue::Null => 0,
                FieldValue::Bool(_) => 1,
                FieldValue::Integer(_) | FieldValue::Double(_) => 2,
                FieldValue::Timestamp(_) => 3,
                FieldValue::String(_) => 4,
            }
        }

        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (a, b) if rank(a) == 2 && rank(b) == 2 => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: HashMap<String, FieldValue>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn string(&self, name: &str) -> Option<String> {
        self.get(name).and_then(FieldValue::as_str).map(str::to_string)
    }
}

/// Sort direction for collection queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A collection read: optional ordering on one field plus an optional limit
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuery {
    pub collection: String,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl CollectionQuery {
    pub fn all(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            order_by: None,
            limit: None,
        }
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_compare_across_encodings() {
        let a = FieldValue::Integer(3);
        let b = FieldValue::Double(2.5);
        assert_eq!(a.order_cmp(&b), Ordering::Greater);
        assert_eq!(b.as_i64(), Some(2));
    }

    #[test]
    fn test_null_sorts_before_strings() {
        let null = FieldValue::Null;
        let s = FieldValue::String("2024-01-01".to_string());
        assert_eq!(null.order_cmp(&s), Ordering::Less);
    }
}
