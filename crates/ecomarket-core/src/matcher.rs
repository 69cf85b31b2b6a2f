//! Keyword relevance matcher over the record store.

use crate::records::{Record, RecordStore};
use ecomarket_config::RetrievalSettings;
use log::debug;

/// Finds the first record whose keyword fields appear in the query.
///
/// There is no ranking: store order decides between several matches.
#[derive(Debug, Clone)]
pub struct RelevanceMatcher {
    fields: Vec<String>,
}

impl RelevanceMatcher {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn from_settings(settings: &RetrievalSettings) -> Self {
        Self::new(settings.keyword_fields.clone())
    }

    pub fn find_relevant<'s>(&self, records: &'s RecordStore, query: &str) -> Option<&'s Record> {
        let query = query.to_lowercase();
        for (idx, record) in records.iter().enumerate() {
            let hit = self
                .fields
                .iter()
                .filter_map(|field| record.keyword(field))
                .find(|keyword| query.contains(&keyword.to_lowercase()));
            if let Some(keyword) = hit {
                debug!("record {idx} matched keyword `{keyword}`");
                return Some(record);
            }
        }
        None
    }
}

impl Default for RelevanceMatcher {
    fn default() -> Self {
        Self::from_settings(&RetrievalSettings::default())
    }
}
