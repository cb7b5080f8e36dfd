use serde_json::{Map, Value};

use crate::providers::ProviderId;

/// Provider-specific query parameters, as handed to a [`VacancySource`](crate::providers::VacancySource).
pub type QueryParams = Map<String, Value>;

/// Ordering a user can ask for, independent of any provider's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Highest salary first
    Salary,
    /// Most recently published first
    Recency,
}

/// Accumulates neutral search intents into one provider's query parameters.
///
/// Every `with_*` call leaves `self` untouched and returns the extended state,
/// so starting a new search is just building a fresh `QueryBuilder`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    provider: ProviderId,
    params: QueryParams,
}

impl QueryBuilder {
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            params: QueryParams::new(),
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    #[must_use]
    pub fn with_keyword(&self, text: &str) -> Self {
        self.merged(self.provider.adapter().keyword_params(text))
    }

    #[must_use]
    pub fn with_sort_by_salary_desc(&self) -> Self {
        self.merged(self.provider.adapter().salary_sort_params())
    }

    #[must_use]
    pub fn with_sort_by_recency(&self) -> Self {
        self.merged(self.provider.adapter().recency_sort_params())
    }

    #[must_use]
    pub fn with_sort(&self, order: SortOrder) -> Self {
        match order {
            SortOrder::Salary => self.with_sort_by_salary_desc(),
            SortOrder::Recency => self.with_sort_by_recency(),
        }
    }

    pub fn build_query(&self) -> QueryParams {
        self.params.clone()
    }

    fn merged(&self, params: QueryParams) -> Self {
        let mut next = self.clone();
        next.params.extend(params);
        next
    }
}
