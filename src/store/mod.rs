pub mod remote;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Entry, EntryId, EntryList};

pub use remote::RemoteStore;

/// Typed access to the server's entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Unread entries, newest first, with the cursor at the first page.
    async fn fetch_unread(&self) -> Result<EntryList>;
    async fn fetch_entry(&self, id: EntryId) -> Result<Entry>;
    async fn mark_read(&self, ids: &[EntryId]) -> Result<()>;
}
