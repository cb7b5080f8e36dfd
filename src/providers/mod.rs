// Provider module: adapters that map each job board's schema onto
// `VacancyRecord`, plus the HTTP sources that fetch raw responses.

pub mod hh;
pub mod superjob;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::currency::{self, Conversion};
use crate::error::AppError;
use crate::models::vacancy::{CANONICAL_CURRENCY, VacancyRecord, VacancySet};
use crate::query::QueryParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ProviderId {
    /// hh.ru
    #[value(name = "hh")]
    HeadHunter,
    /// superjob.ru
    #[value(name = "superjob")]
    SuperJob,
}

impl ProviderId {
    pub fn adapter(self) -> &'static dyn ProviderAdapter {
        match self {
            ProviderId::HeadHunter => &hh::HeadHunter,
            ProviderId::SuperJob => &superjob::SuperJob,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderId::HeadHunter => "Head Hunter",
            ProviderId::SuperJob => "Super Job",
        })
    }
}

/// Why a single raw item did not become a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("item is not a JSON object")]
    NotAnObject,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("malformed publication date '{0}'")]
    MalformedDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// 1-based position in the provider's response.
    pub position: usize,
    pub reason: SkipReason,
}

/// Outcome of adapting one response: the records that made it and the items that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adapted {
    pub records: VacancySet,
    pub skipped: Vec<SkippedItem>,
}

/// Translates one provider's vocabulary, both its response schema and its
/// query parameters, into the canonical one.
pub trait ProviderAdapter: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Top-level key holding the list of raw items.
    fn envelope_key(&self) -> &'static str;

    fn adapt_item(&self, raw: &Value) -> Result<VacancyRecord, SkipReason>;

    fn keyword_params(&self, text: &str) -> QueryParams;

    fn salary_sort_params(&self) -> QueryParams;

    fn recency_sort_params(&self) -> QueryParams;
}

/// Fetches one raw response from a provider.
#[async_trait]
pub trait VacancySource: Send + Sync {
    fn provider(&self) -> ProviderId;

    async fn fetch(&self, params: &QueryParams) -> Result<Value, AppError>;
}

/// Map a raw provider response into canonical records keyed `item N`, where
/// `N` is the item's position in the response.
///
/// Malformed items are skipped and reported in [`Adapted::skipped`]; a
/// response without its item collection is an error.
pub fn adapt(raw: &Value, provider: ProviderId) -> Result<Adapted, AppError> {
    let adapter = provider.adapter();
    let key = adapter.envelope_key();
    let items = raw
        .get(key)
        .and_then(|v| v.as_array())
        .ok_or(AppError::MissingEnvelope { provider, key })?;

    let mut adapted = Adapted::default();
    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        let result = if item.is_object() {
            adapter.adapt_item(item)
        } else {
            Err(SkipReason::NotAnObject)
        };
        match result {
            Ok(record) => adapted.records.insert(format!("item {position}"), record),
            Err(reason) => {
                tracing::debug!("Skipping {provider} item {position}: {reason}");
                adapted.skipped.push(SkippedItem { position, reason });
            }
        }
    }

    if !adapted.skipped.is_empty() {
        tracing::warn!(
            "{provider}: skipped {} of {} items",
            adapted.skipped.len(),
            items.len()
        );
    }

    Ok(adapted)
}

/// Flatten parameters into `key=value` pairs for a query string.
pub fn query_pairs(params: &QueryParams) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let value = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), value)
        })
        .collect()
}

pub(crate) fn params<const N: usize>(pairs: [(&str, Value); N]) -> QueryParams {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub(crate) fn required_str(item: &Value, pointer: &'static str) -> Result<String, SkipReason> {
    item.pointer(pointer)
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or(SkipReason::MissingField(pointer.trim_start_matches('/')))
}

pub(crate) fn optional_str(item: &Value, pointer: &str) -> Option<String> {
    item.pointer(pointer)
        .and_then(|v| v.as_str())
        .map(String::from)
}

/// Upper bound if given, else lower bound. Only null or missing bounds count
/// as absent; a present `0` upper bound wins and leaves the record unsalaried.
pub(crate) fn pick_salary(upper: Option<&Value>, lower: Option<&Value>) -> Option<f64> {
    let bound = |v: Option<&Value>| v.and_then(|v| v.as_f64());
    bound(upper).or_else(|| bound(lower))
}

/// Settle an amount in rubles. Codes missing from the rate table pass through
/// unconverted under the canonical label.
pub(crate) fn settle(provider: ProviderId, amount: Option<f64>, currency: Option<&str>) -> Option<u64> {
    let amount = amount?;
    let code = match currency {
        Some(code) if !currency::is_settlement_currency(code) => code,
        _ => return Some(currency::floor_amount(amount)),
    };

    match currency::convert_to_canonical(amount, code) {
        Conversion::Converted(rubles) => Some(rubles),
        Conversion::Unsupported => {
            tracing::warn!(
                "{provider}: no exchange rate for '{code}', keeping {amount} as {CANONICAL_CURRENCY}"
            );
            Some(currency::floor_amount(amount))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_envelope_is_an_error() {
        let err = adapt(&json!({ "found": 0 }), ProviderId::HeadHunter).unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingEnvelope { key: "items", .. }
        ));

        let err = adapt(&json!({ "items": [] }), ProviderId::SuperJob).unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingEnvelope { key: "objects", .. }
        ));
    }

    #[test]
    fn upper_bound_wins() {
        assert_eq!(pick_salary(Some(&json!(200)), Some(&json!(100))), Some(200.0));
        assert_eq!(pick_salary(Some(&Value::Null), Some(&json!(100))), Some(100.0));
        assert_eq!(pick_salary(Some(&json!(0)), Some(&json!(100))), Some(0.0));
        assert_eq!(pick_salary(None, Some(&json!(100))), Some(100.0));
        assert_eq!(pick_salary(None, None), None);
    }

    #[test]
    fn settle_converts_and_passes_through() {
        assert_eq!(settle(ProviderId::HeadHunter, Some(100.0), Some("USD")), Some(8880));
        assert_eq!(settle(ProviderId::HeadHunter, Some(1000.0), Some("RUR")), Some(1000));
        assert_eq!(settle(ProviderId::SuperJob, Some(1000.0), Some("xyz")), Some(1000));
        assert_eq!(settle(ProviderId::SuperJob, Some(1000.0), None), Some(1000));
        assert_eq!(settle(ProviderId::SuperJob, None, Some("USD")), None);
    }

    #[test]
    fn query_pairs_render_scalars() {
        let pairs = query_pairs(&params([
            ("text", json!("rust dev")),
            ("per_page", json!(100)),
            ("only_with_salary", json!(true)),
        ]));
        assert!(pairs.contains(&("text".to_string(), "rust dev".to_string())));
        assert!(pairs.contains(&("per_page".to_string(), "100".to_string())));
        assert!(pairs.contains(&("only_with_salary".to_string(), "true".to_string())));
    }
}
