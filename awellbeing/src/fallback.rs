//! API-first store that falls back to a local store per call.

use std::sync::Arc;

use acommon::BoxFuture;
use tracing::warn;

use crate::{DataSource, UserStats, WellbeingEntry, WellbeingError, WellbeingStore};

/// Every call tries `api` first; any API error sends that one call to `local`.
#[derive(Clone)]
pub struct FallbackWellbeingStore {
    api: Arc<dyn WellbeingStore>,
    local: Arc<dyn WellbeingStore>,
}

impl FallbackWellbeingStore {
    pub fn new(api: Arc<dyn WellbeingStore>, local: Arc<dyn WellbeingStore>) -> Self {
        Self { api, local }
    }

    pub async fn stats_with_source(
        &self,
        user_id: &str,
    ) -> Result<(UserStats, DataSource), WellbeingError> {
        match self.api.stats(user_id).await {
            Ok(stats) => Ok((stats, DataSource::Api)),
            Err(error) => {
                warn!(user_id, error = %error, "wellbeing api unavailable, reading local data");
                let stats = self.local.stats(user_id).await?;
                Ok((stats, DataSource::Local))
            }
        }
    }

    pub async fn record_with_source(
        &self,
        entry: WellbeingEntry,
    ) -> Result<DataSource, WellbeingError> {
        match self.api.record(entry.clone()).await {
            Ok(()) => Ok(DataSource::Api),
            Err(error) => {
                warn!(user_id = %entry.user_id, error = %error, "wellbeing api unavailable, saving locally");
                self.local.record(entry).await?;
                Ok(DataSource::Local)
            }
        }
    }
}

impl WellbeingStore for FallbackWellbeingStore {
    fn stats<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserStats, WellbeingError>> {
        Box::pin(async move { Ok(self.stats_with_source(user_id).await?.0) })
    }

    fn record<'a>(&'a self, entry: WellbeingEntry) -> BoxFuture<'a, Result<(), WellbeingError>> {
        Box::pin(async move {
            self.record_with_source(entry).await?;
            Ok(())
        })
    }
}
