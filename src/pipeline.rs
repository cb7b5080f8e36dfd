use std::path::Path;

use crate::clean::clean;
use crate::error::AppError;
use crate::models::vacancy::VacancySet;
use crate::providers::{SkippedItem, VacancySource, adapt};
use crate::query::QueryBuilder;
use crate::storage;

#[derive(Debug)]
pub struct SearchOutcome {
    /// Raw items the provider returned.
    pub fetched: usize,
    pub skipped: Vec<SkippedItem>,
    /// Validated set, as read back from the data file.
    pub records: VacancySet,
}

/// Fetch, adapt, clean and persist one search, replacing the data file.
pub async fn run_search(
    source: &dyn VacancySource,
    query: &QueryBuilder,
    data_file: &Path,
) -> Result<SearchOutcome, AppError> {
    let provider = source.provider();
    if provider != query.provider() {
        return Err(AppError::BadRequest(format!(
            "query was built for {} but source is {provider}",
            query.provider()
        )));
    }

    let params = query.build_query();
    tracing::info!("Searching {provider} with {} parameters", params.len());
    let raw = source.fetch(&params).await?;

    let adapted = adapt(&raw, provider)?;
    let fetched = adapted.records.len() + adapted.skipped.len();
    tracing::info!(
        "{provider} returned {fetched} items, {} adapted",
        adapted.records.len()
    );

    let cleaned = clean(adapted.records);
    let records = storage::replace(&cleaned, data_file)?;

    Ok(SearchOutcome {
        fetched,
        skipped: adapted.skipped,
        records,
    })
}
