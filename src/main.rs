use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vacancy_scout::config::{Command, Config};
use vacancy_scout::display;
use vacancy_scout::pipeline::run_search;
use vacancy_scout::providers::hh::HhClient;
use vacancy_scout::providers::superjob::SuperJobClient;
use vacancy_scout::providers::{ProviderId, VacancySource};
use vacancy_scout::query::{QueryBuilder, SortOrder};
use vacancy_scout::{AppError, VacancyRecord, storage};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vacancy_scout=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_tracing(config.log_json);

    match config.command {
        Command::Search {
            provider,
            keyword,
            sort,
            top,
            superjob_key,
        } => {
            let source: Box<dyn VacancySource> = match provider {
                ProviderId::HeadHunter => Box::new(HhClient::new()?),
                ProviderId::SuperJob => {
                    let key = Config::superjob_key(superjob_key.as_deref())
                        .ok_or(AppError::MissingApiKey)?;
                    Box::new(SuperJobClient::new(key)?)
                }
            };

            let mut query = QueryBuilder::new(provider);
            if let Some(text) = keyword.as_deref() {
                query = query.with_keyword(text);
            }
            if let Some(order) = sort {
                query = query.with_sort(order);
            }

            let outcome = run_search(&*source, &query, &config.data_file).await?;
            if outcome.records.is_empty() {
                println!("Nothing found for your query.");
                return Ok(());
            }

            let label = match sort {
                Some(SortOrder::Salary) => "best-paid vacancies",
                Some(SortOrder::Recency) => "latest vacancies",
                None => "vacancies",
            };
            println!("Top {top} {label} on {provider}:");
            print!("{}", display::short_list(&outcome.records, top.into()));
        }
        Command::Show { top } => {
            let records = storage::load(&config.data_file)?;
            if records.is_empty() {
                println!("Nothing found for your query.");
                return Ok(());
            }
            print!("{}", display::short_list(&records, top.into()));
        }
        Command::View { position } => {
            let record = pick(&config.data_file, position)?;
            print!("{}", display::detail_card(&record));
        }
        Command::Compare { first, second } => {
            if first == second {
                anyhow::bail!("A vacancy cannot be compared with itself");
            }
            let a = pick(&config.data_file, first)?;
            let b = pick(&config.data_file, second)?;
            print!("{}", display::comparison_report(&a, &b));
        }
    }

    Ok(())
}

/// Load the saved set and take the record at a 1-based listing position.
fn pick(data_file: &Path, position: usize) -> anyhow::Result<VacancyRecord> {
    let records = storage::load(data_file)?;
    match records.nth(position) {
        Some((_, record)) => Ok(record.clone()),
        None => Err(AppError::BadRequest(format!(
            "Choose a vacancy between 1 and {}",
            records.len()
        ))
        .into()),
    }
}
