use persistence::{RoleMap, VacancyStore, DEFAULT_DB, DEFAULT_URI};
use vacancy_collector::api::HttpVacancyApi;
use vacancy_collector::collect::{Collector, RPS_LIMIT};
use vacancy_collector::rate_limit::RateLimiter;

use crate::progress::TextProgress;

/// One collection run: fetch, normalize, then a single bulk insert. The
/// store is only opened once the whole batch exists.
pub async fn run(count: u32, area: u32) -> Result<(), crate::Error> {
    let api = HttpVacancyApi::new();
    let limiter = RateLimiter::new(RPS_LIMIT)?;
    let mut collector = Collector::new(api, limiter, TextProgress::new());
    let records = collector.collect(count, area).await?;
    println!();
    log::info!("collected {} vacancies", records.len());

    let store = VacancyStore::connect(&mongodb_uri(), &database(), RoleMap::builtin()).await?;
    let inserted = store.insert_many(records).await?;
    log::info!("inserted {} vacancies", inserted);
    Ok(())
}

pub fn mongodb_uri() -> String {
    std::env::var("MONGODB_CONNECTION_URL").unwrap_or_else(|_| DEFAULT_URI.to_owned())
}

pub fn database() -> String {
    std::env::var("DATABASE").unwrap_or_else(|_| DEFAULT_DB.to_owned())
}
