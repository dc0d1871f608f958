use crate::api::VacancyApi;
use crate::normalize::normalize;
use crate::rate_limit::RateLimiter;
use crate::types::{VacancyRecord, VacancyStub};
use crate::Result;

pub const PER_PAGE: u32 = 100;
pub const MAX_PAGE_COUNT: u32 = 20;
pub const IT_SPECIALIZATION_ID: u32 = 1;
pub const DEFAULT_AREA_ID: u32 = 113;
pub const RPS_LIMIT: f64 = 5.0;

/// Pages needed for the requested volume, capped at [`MAX_PAGE_COUNT`]. The
/// cap is an upstream-friendliness ceiling, not a tunable.
pub fn plan_pages(requested_count: u32) -> u32 {
    (requested_count / PER_PAGE).clamp(1, MAX_PAGE_COUNT)
}

/// Sink for detail-phase progress. Frontends implement this to surface
/// status to users.
pub trait ProgressObserver {
    /// Called after each vacancy is fetched and normalized.
    fn on_item(&mut self, processed: usize, total: usize);
}

/// A no-op progress sink.
pub struct NullProgress;

impl ProgressObserver for NullProgress {
    fn on_item(&mut self, _processed: usize, _total: usize) {}
}

/// Drives one collection run: paginated listing, per-item detail fetch,
/// normalization. Strictly sequential, one rate-limit wait per request.
/// Any fetch error aborts the whole run, nothing is kept.
pub struct Collector<A, P> {
    api: A,
    limiter: RateLimiter,
    progress: P,
}

impl<A: VacancyApi, P: ProgressObserver> Collector<A, P> {
    pub fn new(api: A, limiter: RateLimiter, progress: P) -> Self {
        Self {
            api,
            limiter,
            progress,
        }
    }

    /// Run the full pipeline and return the normalized batch, in discovery
    /// order. The batch only exists on full success; the store write is the
    /// caller's next step.
    pub async fn collect(&mut self, count: u32, area: u32) -> Result<Vec<VacancyRecord>> {
        let stubs = self.list_phase(count, area).await?;
        self.detail_phase(stubs).await
    }

    async fn list_phase(&mut self, count: u32, area: u32) -> Result<Vec<VacancyStub>> {
        let page_count = plan_pages(count);
        log::info!("listing {} pages for area {}", page_count, area);
        let mut stubs = Vec::new();
        for page in 0..page_count {
            let items = self
                .api
                .list_page(IT_SPECIALIZATION_ID, area, PER_PAGE, page)
                .await?;
            log::debug!("page {} returned {} vacancies", page, items.len());
            stubs.extend(items);
            self.limiter.wait().await;
        }
        log::info!("found {} vacancies, fetching details", stubs.len());
        Ok(stubs)
    }

    async fn detail_phase(&mut self, stubs: Vec<VacancyStub>) -> Result<Vec<VacancyRecord>> {
        let total = stubs.len();
        let mut records = Vec::with_capacity(total);
        for (processed, stub) in stubs.iter().enumerate() {
            let detail = self.api.get_detail(&stub.id).await?;
            records.push(normalize(detail));
            self.limiter.wait().await;
            self.progress.on_item(processed + 1, total);
        }
        Ok(records)
    }
}
