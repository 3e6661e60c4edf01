use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::app::Result;
use crate::domain::{Entry, EntryId, EntryList};
use crate::fetcher::RetryingClient;
use crate::store::EntryStore;

const UNREAD_PATH: &str = "/v1/entries?status=unread&direction=desc";
const ENTRIES_PATH: &str = "/v1/entries";

#[derive(Serialize)]
struct StatusUpdate<'a> {
    entry_ids: &'a [EntryId],
    status: &'static str,
}

/// [`EntryStore`] backed by the server's REST API.
pub struct RemoteStore {
    client: RetryingClient,
    base_url: String,
}

impl RemoteStore {
    pub fn new(client: RetryingClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<String> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?.into())
    }
}

#[async_trait]
impl EntryStore for RemoteStore {
    async fn fetch_unread(&self) -> Result<EntryList> {
        let body = self.client.get(&self.endpoint(UNREAD_PATH)?).await?;
        let mut list: EntryList = serde_json::from_slice(&body)?;
        list.position = 0;
        tracing::info!("Fetched {} unread entries (server total {})", list.len(), list.total);
        Ok(list)
    }

    async fn fetch_entry(&self, id: EntryId) -> Result<Entry> {
        let url = self.endpoint(&format!("{}/{}", ENTRIES_PATH, id))?;
        let body = self.client.get(&url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn mark_read(&self, ids: &[EntryId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let body = serde_json::to_vec(&StatusUpdate {
            entry_ids: ids,
            status: "read",
        })?;
        self.client
            .put(&self.endpoint(ENTRIES_PATH)?, body, "application/json")
            .await?;
        tracing::debug!("Marked {:?} read", ids);
        Ok(())
    }
}
