use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::models::vacancy::{CANONICAL_CURRENCY, Employer, VacancyRecord};
use crate::providers::{
    ProviderAdapter, ProviderId, SkipReason, VacancySource, optional_str, params, pick_salary,
    query_pairs, required_str, settle,
};
use crate::query::QueryParams;

const BASE_URL: &str = "https://api.superjob.ru/2.0/vacancies/";
/// Largest page the API serves.
const PAGE_SIZE: u32 = 100;

pub struct SuperJob;

impl ProviderAdapter for SuperJob {
    fn id(&self) -> ProviderId {
        ProviderId::SuperJob
    }

    fn envelope_key(&self) -> &'static str {
        "objects"
    }

    fn adapt_item(&self, raw: &Value) -> Result<VacancyRecord, SkipReason> {
        let amount = pick_salary(raw.get("payment_to"), raw.get("payment_from"));
        let currency = raw.get("currency").and_then(|v| v.as_str());

        Ok(VacancyRecord {
            title: required_str(raw, "/profession")?,
            url: required_str(raw, "/link")?,
            currency: CANONICAL_CURRENCY.to_string(),
            salary: settle(self.id(), amount, currency),
            description: optional_str(raw, "/candidat"),
            city: required_str(raw, "/town/title")?,
            published_at: parse_published_at(raw)?,
            employer: Employer {
                name: required_str(raw, "/client/title")?,
                url: required_str(raw, "/client/link")?,
            },
        })
    }

    fn keyword_params(&self, text: &str) -> QueryParams {
        params([("keyword", json!(text))])
    }

    fn salary_sort_params(&self) -> QueryParams {
        params([
            ("order_field", json!("payment")),
            ("order_direction", json!("desc")),
        ])
    }

    fn recency_sort_params(&self) -> QueryParams {
        params([
            ("order_field", json!("date")),
            ("order_direction", json!("desc")),
        ])
    }
}

/// `date_published` is Unix seconds; the canonical form is UTC.
fn parse_published_at(raw: &Value) -> Result<NaiveDateTime, SkipReason> {
    let value = raw
        .get("date_published")
        .filter(|v| !v.is_null())
        .ok_or(SkipReason::MissingField("date_published"))?;

    value
        .as_i64()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| SkipReason::MalformedDate(value.to_string()))
}

/// Parameters sent with every SuperJob search before user intents are applied.
pub fn base_params() -> QueryParams {
    params([("count", json!(PAGE_SIZE)), ("no_agreement", json!(1))])
}

pub struct SuperJobClient {
    client: reqwest::Client,
    api_key: String,
}

impl SuperJobClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::MissingApiKey);
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl VacancySource for SuperJobClient {
    fn provider(&self) -> ProviderId {
        ProviderId::SuperJob
    }

    async fn fetch(&self, query: &QueryParams) -> Result<Value, AppError> {
        let mut merged = base_params();
        merged.extend(query.clone());

        let resp = self
            .client
            .get(BASE_URL)
            .header("X-Api-App-Id", &self.api_key)
            .query(&query_pairs(&merged))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AppError::Provider(format!(
                "SuperJob returned {}",
                resp.status()
            )));
        }

        Ok(resp.json().await?)
    }
}
