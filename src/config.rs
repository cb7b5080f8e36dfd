use std::path::PathBuf;

use clap::Parser;

use crate::providers::ProviderId;
use crate::query::SortOrder;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "vacancy-scout",
    about = "Search HeadHunter and SuperJob vacancies, then browse and compare them"
)]
pub struct Config {
    /// File holding the results of the latest search
    #[arg(long, env = "DATA_FILE", default_value = "optimize_data.json", global = true)]
    pub data_file: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a new search and replace the saved results
    Search {
        #[arg(long, value_enum)]
        provider: ProviderId,

        /// Only vacancies whose title matches this text
        #[arg(long)]
        keyword: Option<String>,

        #[arg(long, value_enum)]
        sort: Option<SortOrder>,

        /// How many vacancies to list
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(2..=30))]
        top: u16,

        /// SuperJob application key (falls back to API_KEY)
        #[arg(long, env = "SUPERJOB_API_KEY", hide_env_values = true)]
        superjob_key: Option<String>,
    },
    /// List the saved results
    Show {
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(2..=30))]
        top: u16,
    },
    /// Print the full card of one saved vacancy
    View {
        /// Position in the listing, starting at 1
        position: usize,
    },
    /// Compare the salaries of two saved vacancies
    Compare { first: usize, second: usize },
}

impl Config {
    /// SuperJob key from the flag, SUPERJOB_API_KEY, or the legacy API_KEY variable.
    pub fn superjob_key(flag: Option<&str>) -> Option<String> {
        flag.map(String::from)
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}
