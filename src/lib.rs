pub mod clean;
pub mod compare;
pub mod config;
pub mod currency;
pub mod display;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod query;
pub mod storage;

pub use clean::clean;
pub use compare::{SalaryComparison, compare_salary};
pub use currency::{Conversion, convert_to_canonical};
pub use error::AppError;
pub use models::vacancy::{Employer, VacancyRecord, VacancySet};
pub use providers::{Adapted, ProviderId, SkipReason, SkippedItem, adapt};
pub use query::{QueryBuilder, QueryParams, SortOrder};
