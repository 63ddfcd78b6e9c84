//! Pull the growth standards from a server into a local table or database.
//!
//! A single attempt per call. Nothing is written locally unless the fetch
//! succeeded in full.

use tumbuh_core::growth::StandardsTable;
use tumbuh_db::repositories::StandardRepo;
use tumbuh_db::DbPool;

use crate::api::TumbuhApi;
use crate::error::ClientError;

/// Fetch every reference entry from the server into an in-memory table.
pub async fn fetch_standards_table(api: &TumbuhApi) -> Result<StandardsTable, ClientError> {
    let entries = api.list_standards(None, None).await?;
    tracing::debug!(count = entries.len(), "Fetched growth standards");
    Ok(entries.into_iter().collect())
}

/// Mirror the server's standards into a local database.
///
/// Existing rows with the same key are overwritten. Returns the number of
/// rows written.
pub async fn mirror_standards(api: &TumbuhApi, pool: &DbPool) -> Result<u64, ClientError> {
    let entries = api.list_standards(None, None).await?;
    if entries.is_empty() {
        tracing::warn!("Server returned no growth standards, nothing mirrored");
        return Ok(0);
    }

    let written = StandardRepo::upsert_many(pool, &entries).await?;
    tracing::info!(written, "Mirrored growth standards");
    Ok(written)
}
