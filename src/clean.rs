use std::collections::HashSet;

use crate::models::vacancy::VacancySet;

/// Drop records without a usable salary and later duplicates of an already
/// seen `(title, salary, employer)` listing.
///
/// Survivors keep their ids and relative order, so `clean(clean(x)) == clean(x)`.
pub fn clean(records: VacancySet) -> VacancySet {
    let total = records.len();
    let mut seen = HashSet::new();
    let mut unsalaried = 0usize;
    let mut duplicates = 0usize;

    let kept: VacancySet = records
        .into_iter()
        .filter(|(id, record)| {
            if record.usable_salary().is_none() {
                unsalaried += 1;
                return false;
            }
            if !seen.insert(record.dedup_key()) {
                tracing::debug!("Dropping {id}: duplicate of an earlier '{}'", record.title);
                duplicates += 1;
                return false;
            }
            true
        })
        .collect();

    tracing::info!(
        "Cleaned {total} records: {} kept, {unsalaried} without salary, {duplicates} duplicates",
        kept.len()
    );
    kept
}
