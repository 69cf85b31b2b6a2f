//! Order and product records loaded from the JSON database.

use crate::error::CoreError;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One order/product entry. Field order from the source file is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field rendered as a match keyword.
    ///
    /// Strings and numbers produce a keyword; absent, empty, and structured
    /// values do not.
    pub fn keyword(&self, field: &str) -> Option<String> {
        let keyword = match self.0.get(field)? {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            _ => return None,
        };
        if keyword.trim().is_empty() {
            None
        } else {
            Some(keyword)
        }
    }

    /// Compact JSON used when the record is embedded in a prompt.
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

/// Read-only, ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Parse a JSON array of objects.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        let entries = match value {
            Value::Array(entries) => entries,
            other => {
                return Err(CoreError::InvalidStore(format!(
                    "expected a JSON array, got {}",
                    json_kind(&other)
                )));
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.into_iter().enumerate() {
            match entry {
                Value::Object(fields) => records.push(Record(fields)),
                other => {
                    return Err(CoreError::InvalidStore(format!(
                        "entry {idx} is {}, expected an object",
                        json_kind(&other)
                    )));
                }
            }
        }
        debug!("parsed record store (records={})", records.len());
        Ok(Self { records })
    }

    /// Parse the database, falling back to an empty store on error.
    ///
    /// A malformed database behaves like one with no relevant data.
    pub fn from_json_or_empty(text: &str) -> Self {
        match Self::from_json(text) {
            Ok(store) => store,
            Err(err) => {
                error!("failed to parse database as JSON records: {err}");
                Self::default()
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
