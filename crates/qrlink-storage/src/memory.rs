use async_trait::async_trait;
use parking_lot::Mutex;
use qrlink_core::store::{LinkStore, Result};
use qrlink_core::LinkTable;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory implementation of [`LinkStore`].
///
/// Holds the table behind a mutex and counts saves, which lets tests assert
/// that an operation left the store untouched.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    table: Mutex<LinkTable>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `table`.
    pub fn with_table(table: LinkTable) -> Self {
        Self {
            table: Mutex::new(table),
            saves: AtomicUsize::new(0),
        }
    }

    /// Returns a copy of the current table.
    pub fn snapshot(&self) -> LinkTable {
        self.table.lock().clone()
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkStore for InMemoryStore {
    async fn load(&self) -> Result<LinkTable> {
        Ok(self.table.lock().clone())
    }

    async fn save(&self, table: &LinkTable) -> Result<()> {
        *self.table.lock() = table.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use qrlink_core::{LinkRecord, ShortCode};

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn starts_empty() {
        let store = InMemoryStore::new();

        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn save_replaces_the_table() {
        let store = InMemoryStore::new();

        let mut table = store.load().await.unwrap();
        table.insert(
            code("abc123"),
            LinkRecord::new("https://example.com", Timestamp::now()),
        );
        store.save(&table).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, table);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn loaded_table_is_a_copy() {
        let mut seeded = LinkTable::new();
        seeded.insert(
            code("abc123"),
            LinkRecord::new("https://example.com", Timestamp::now()),
        );
        let store = InMemoryStore::with_table(seeded.clone());

        let mut loaded = store.load().await.unwrap();
        loaded
            .get_mut(&code("abc123"))
            .unwrap()
            .record_visit(Timestamp::now());

        // not saved, so the store still holds the original
        assert_eq!(store.snapshot(), seeded);
    }
}
