mod collect;
mod progress;
mod stats;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] vacancy_collector::Error),
    #[error(transparent)]
    Store(#[from] persistence::Error),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect vacancies from hh.ru and persist them
    Collect {
        /// Vacancies count
        #[clap(short, long)]
        count: u32,
        /// Search area id
        #[clap(short, long)]
        area: u32,
    },
    /// Median salary per city, optionally narrowed to one role
    SalaryByArea {
        /// Role key, e.g. dev, qa, analytics
        #[clap(short, long)]
        role: Option<String>,
    },
    /// Specialization share percentages
    Proportions,
    /// Stored vacancies matching any of the given skills
    Skills {
        #[clap(required = true)]
        skills: Vec<String>,
    },
    /// Number of stored vacancies
    Count,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Collect { count, area } => collect::run(count, area).await,
        Commands::SalaryByArea { role } => stats::salary_by_area(role.as_deref()).await,
        Commands::Proportions => stats::proportions().await,
        Commands::Skills { skills } => stats::skills(&skills).await,
        Commands::Count => stats::count().await,
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
