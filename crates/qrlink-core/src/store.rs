use crate::error::StorageError;
use crate::record::LinkTable;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Whole-document persistence for the link table.
///
/// Every operation loads the full table and, if it mutates, saves the full
/// table back. Backends keep no state between calls beyond the persisted
/// document; callers serialize load-mutate-save cycles themselves.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Loads the full table.
    ///
    /// A backing resource that does not exist yet is an empty table. A
    /// resource that exists but cannot be read or parsed is an error, so that
    /// a subsequent `save` cannot clobber it with an empty snapshot.
    async fn load(&self) -> Result<LinkTable>;

    /// Replaces the persisted table. Readers never observe a partial write.
    async fn save(&self, table: &LinkTable) -> Result<()>;
}
