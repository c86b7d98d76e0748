use crate::error::StorageError;
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored mapping from a short code to its target.
///
/// The short code itself is the key in [`LinkTable`] and is not repeated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The URL visitors are redirected to.
    pub target_url: String,
    /// Number of successful redirects. Absent counters are read as zero.
    #[serde(default)]
    pub clicks: u64,
    /// When the record was created. Never changes.
    pub created_at: Timestamp,
    /// Refreshed on every mutation, never earlier than `created_at`.
    pub updated_at: Timestamp,
}

impl LinkRecord {
    pub fn new(target_url: impl Into<String>, now: Timestamp) -> Self {
        Self {
            target_url: target_url.into(),
            clicks: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Counts one redirect through this record.
    pub fn record_visit(&mut self, now: Timestamp) {
        self.clicks = self.clicks.saturating_add(1);
        self.touch(now);
    }

    /// Points the record at a new target URL.
    pub fn retarget(&mut self, target_url: impl Into<String>, now: Timestamp) {
        self.target_url = target_url.into();
        self.touch(now);
    }

    // a clock stepping backwards must not move updated_at behind a previous value
    fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at);
    }
}

/// Read-only projection of a record, as reported by the stats endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStats {
    pub short_code: ShortCode,
    pub target_url: String,
    pub clicks: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The full set of records, persisted as a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTable(BTreeMap<ShortCode, LinkRecord>);

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &ShortCode) -> Option<&LinkRecord> {
        self.0.get(code)
    }

    pub fn get_mut(&mut self, code: &ShortCode) -> Option<&mut LinkRecord> {
        self.0.get_mut(code)
    }

    pub fn contains(&self, code: &ShortCode) -> bool {
        self.0.contains_key(code)
    }

    /// Inserts a record, returning the one previously stored under `code`.
    pub fn insert(&mut self, code: ShortCode, record: LinkRecord) -> Option<LinkRecord> {
        self.0.insert(code, record)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShortCode, &LinkRecord)> {
        self.0.iter()
    }

    pub fn stats(&self, code: &ShortCode) -> Option<LinkStats> {
        self.0.get(code).map(|record| LinkStats {
            short_code: code.clone(),
            target_url: record.target_url.clone(),
            clicks: record.clicks,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Checks the per-record invariants that deserialization alone cannot.
    ///
    /// Key validity is already enforced by [`ShortCode`]'s deserializer.
    pub fn validate(&self) -> Result<(), StorageError> {
        for (code, record) in &self.0 {
            if record.updated_at < record.created_at {
                return Err(StorageError::InvalidData(format!(
                    "record '{}' was updated at {} before it was created at {}",
                    code, record.updated_at, record.created_at
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[test]
    fn new_record_starts_at_zero_clicks() {
        let now = Timestamp::now();
        let record = LinkRecord::new("https://example.com", now);

        assert_eq!(record.clicks, 0);
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn visit_increments_by_one() {
        let created = Timestamp::now();
        let mut record = LinkRecord::new("https://example.com", created);

        let later = created + SignedDuration::from_secs(5);
        record.record_visit(later);
        assert_eq!(record.clicks, 1);
        assert_eq!(record.updated_at, later);

        record.record_visit(later);
        assert_eq!(record.clicks, 2);
    }

    #[test]
    fn retarget_keeps_created_at() {
        let created = Timestamp::now();
        let mut record = LinkRecord::new("https://example.com", created);

        let later = created + SignedDuration::from_secs(60);
        record.retarget("https://example.org", later);

        assert_eq!(record.target_url, "https://example.org");
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let created = Timestamp::now();
        let mut record = LinkRecord::new("https://example.com", created);

        record.record_visit(created - SignedDuration::from_hours(1));
        assert_eq!(record.updated_at, created);
        assert_eq!(record.clicks, 1);
    }

    #[test]
    fn reads_the_persisted_document_shape() {
        let json = r#"{
          "abc123": {
            "target_url": "https://newexample.com",
            "clicks": 3,
            "created_at": "2025-02-10T08:30:00.000Z",
            "updated_at": "2025-02-11T09:00:00.000Z"
          },
          "V1StGX": {
            "target_url": "https://example.com",
            "created_at": "2025-02-10T08:30:00.000Z",
            "updated_at": "2025-02-10T08:30:00.000Z"
          }
        }"#;

        let table: LinkTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&code("abc123")).unwrap().clicks, 3);
        // missing counter defaults to zero
        assert_eq!(table.get(&code("V1StGX")).unwrap().clicks, 0);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn invalid_key_fails_to_deserialize() {
        let json = r#"{
          "": {
            "target_url": "https://example.com",
            "clicks": 0,
            "created_at": "2025-02-10T08:30:00Z",
            "updated_at": "2025-02-10T08:30:00Z"
          }
        }"#;

        assert!(serde_json::from_str::<LinkTable>(json).is_err());
    }

    #[test]
    fn validate_rejects_time_travel() {
        let created = Timestamp::now();
        let mut table = LinkTable::new();
        table.insert(
            code("abc123"),
            LinkRecord {
                target_url: "https://example.com".to_string(),
                clicks: 0,
                created_at: created,
                updated_at: created - SignedDuration::from_secs(1),
            },
        );

        let err = table.validate().unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }

    #[test]
    fn stats_projects_the_record() {
        let now = Timestamp::now();
        let mut table = LinkTable::new();
        table.insert(code("abc123"), LinkRecord::new("https://example.com", now));

        let stats = table.stats(&code("abc123")).unwrap();
        assert_eq!(stats.short_code.as_str(), "abc123");
        assert_eq!(stats.target_url, "https://example.com");
        assert_eq!(stats.clicks, 0);
        assert_eq!(stats.created_at, now);

        assert!(table.stats(&code("nope")).is_none());
    }
}
