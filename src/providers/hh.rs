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

const BASE_URL: &str = "https://api.hh.ru/vacancies";
const PAGE_SIZE: u32 = 100;

pub struct HeadHunter;

impl ProviderAdapter for HeadHunter {
    fn id(&self) -> ProviderId {
        ProviderId::HeadHunter
    }

    fn envelope_key(&self) -> &'static str {
        "items"
    }

    fn adapt_item(&self, raw: &Value) -> Result<VacancyRecord, SkipReason> {
        // Listings without a published range (`salary: null`) are skipped outright.
        let salary = raw
            .get("salary")
            .filter(|s| s.is_object())
            .ok_or(SkipReason::MissingField("salary"))?;
        let amount = pick_salary(salary.get("to"), salary.get("from"));
        let currency = salary.get("currency").and_then(|v| v.as_str());

        let published = required_str(raw, "/published_at")?;

        Ok(VacancyRecord {
            title: required_str(raw, "/name")?,
            url: required_str(raw, "/alternate_url")?,
            currency: CANONICAL_CURRENCY.to_string(),
            salary: settle(self.id(), amount, currency),
            description: optional_str(raw, "/snippet/requirement"),
            city: required_str(raw, "/area/name")?,
            published_at: parse_published_at(&published)?,
            employer: Employer {
                name: required_str(raw, "/employer/name")?,
                url: required_str(raw, "/employer/alternate_url")?,
            },
        })
    }

    fn keyword_params(&self, text: &str) -> QueryParams {
        params([("text", json!(text))])
    }

    fn salary_sort_params(&self) -> QueryParams {
        params([("order_by", json!("salary_desc"))])
    }

    fn recency_sort_params(&self) -> QueryParams {
        params([("order_by", json!("publication_time"))])
    }
}

/// HH publishes ISO-8601 timestamps, usually with a colon-less offset
/// (`2024-01-15T10:30:00+0300`). The wall-clock time is kept as published.
fn parse_published_at(text: &str) -> Result<NaiveDateTime, SkipReason> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| SkipReason::MalformedDate(text.to_string()))
}

/// Parameters sent with every HH search before user intents are applied.
pub fn base_params() -> QueryParams {
    params([
        ("only_with_salary", json!("true")),
        ("per_page", json!(PAGE_SIZE)),
        ("search_field", json!("name")),
    ])
}

pub struct HhClient {
    client: reqwest::Client,
}

impl HhClient {
    pub fn new() -> Result<Self, AppError> {
        // HH rejects requests without a descriptive User-Agent.
        let client = reqwest::Client::builder()
            .user_agent(concat!("vacancy-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl VacancySource for HhClient {
    fn provider(&self) -> ProviderId {
        ProviderId::HeadHunter
    }

    async fn fetch(&self, query: &QueryParams) -> Result<Value, AppError> {
        let mut merged = base_params();
        merged.extend(query.clone());

        let resp = self
            .client
            .get(BASE_URL)
            .query(&query_pairs(&merged))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AppError::Provider(format!(
                "HeadHunter returned {}",
                resp.status()
            )));
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Value {
        json!({
            "name": "Rust developer",
            "alternate_url": "https://hh.ru/vacancy/1",
            "salary": { "from": 150000, "to": 250000, "currency": "RUR" },
            "snippet": { "requirement": "Опыт работы с <highlighttext>Rust</highlighttext>" },
            "area": { "name": "Москва" },
            "published_at": "2024-01-15T10:30:00+0300",
            "employer": { "name": "Яндекс", "alternate_url": "https://hh.ru/employer/1740" }
        })
    }

    #[test]
    fn adapts_full_item() {
        let record = HeadHunter.adapt_item(&item()).unwrap();

        assert_eq!(record.title, "Rust developer");
        assert_eq!(record.salary, Some(250000));
        assert_eq!(record.currency, "RUB");
        assert_eq!(record.city, "Москва");
        assert_eq!(record.published_at_text(), "2024-01-15 10:30:00");
        assert_eq!(record.employer.name, "Яндекс");
        assert!(record.description.unwrap().contains("Rust"));
    }

    #[test]
    fn converts_foreign_salary() {
        let mut raw = item();
        raw["salary"] = json!({ "from": 3000, "to": null, "currency": "USD" });

        let record = HeadHunter.adapt_item(&raw).unwrap();
        assert_eq!(record.salary, Some(266400));
        assert_eq!(record.currency, "RUB");
    }

    #[test]
    fn null_salary_is_skipped() {
        let mut raw = item();
        raw["salary"] = Value::Null;

        assert_eq!(
            HeadHunter.adapt_item(&raw).unwrap_err(),
            SkipReason::MissingField("salary")
        );
    }

    #[test]
    fn null_bounds_leave_salary_unknown() {
        let mut raw = item();
        raw["salary"] = json!({ "from": null, "to": null, "currency": "RUR" });

        assert_eq!(HeadHunter.adapt_item(&raw).unwrap().salary, None);
    }

    #[test]
    fn missing_employer_is_skipped() {
        let mut raw = item();
        raw.as_object_mut().unwrap().remove("employer");

        assert_eq!(
            HeadHunter.adapt_item(&raw).unwrap_err(),
            SkipReason::MissingField("employer/name")
        );
    }

    #[test]
    fn malformed_date_is_skipped() {
        let mut raw = item();
        raw["published_at"] = json!("yesterday");

        assert_eq!(
            HeadHunter.adapt_item(&raw).unwrap_err(),
            SkipReason::MalformedDate("yesterday".to_string())
        );
    }

    #[test]
    fn accepts_rfc3339_offsets() {
        let parsed = parse_published_at("2024-03-01T08:05:09+03:00").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-01 08:05:09");
    }

    #[test]
    fn null_description_is_none() {
        let mut raw = item();
        raw["snippet"]["requirement"] = Value::Null;

        assert_eq!(HeadHunter.adapt_item(&raw).unwrap().description, None);
    }
}
