use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::types::{VacancyDetail, VacancyStub};
use crate::{Error, Result};

pub const BASE_URL: &str = "https://api.hh.ru";

const BODY_SNIPPET_LEN: usize = 256;

#[derive(Deserialize)]
struct ListResponse {
    items: Vec<VacancyStub>,
}

/// The two operations the collector needs from the vacancy API. Behind a
/// trait so the pipeline can be driven by an in-memory fake in tests.
#[async_trait]
pub trait VacancyApi {
    /// Fetch one page of the vacancy listing. `page` is 0-based; staying
    /// under the upstream page cap is the caller's job.
    async fn list_page(
        &self,
        specialization: u32,
        area: u32,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<VacancyStub>>;

    /// Fetch the full record for one vacancy.
    async fn get_detail(&self, id: &str) -> Result<VacancyDetail>;
}

/// reqwest-backed client for the public hh.ru API. Stateless, no retries:
/// a failed request surfaces immediately and aborts the run.
pub struct HttpVacancyApi {
    client: Client,
    base_url: String,
}

impl HttpVacancyApi {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String, query: &[(&str, String)]) -> Result<T> {
        log::debug!("requesting {}", url);
        let resp = self.client.get(&url).query(query).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            log::error!(
                "request to {} failed with status {}, body: {}",
                url,
                status,
                snippet(&body)
            );
            return Err(Error::RequestNotOk {
                url,
                status: status.as_u16(),
                body: snippet(&body).to_owned(),
            });
        }
        serde_json::from_str(&body).map_err(|e| Error::MalformedBody {
            url,
            reason: e.to_string(),
        })
    }
}

impl Default for HttpVacancyApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VacancyApi for HttpVacancyApi {
    async fn list_page(
        &self,
        specialization: u32,
        area: u32,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<VacancyStub>> {
        let url = format!("{}/vacancies", self.base_url);
        let query = [
            ("specialization", specialization.to_string()),
            ("area", area.to_string()),
            ("only_with_salary", "true".to_owned()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        let resp: ListResponse = self.get_json(url, &query).await?;
        Ok(resp.items)
    }

    async fn get_detail(&self, id: &str) -> Result<VacancyDetail> {
        let url = format!("{}/vacancies/{}", self.base_url, id);
        self.get_json(url, &[]).await
    }
}

fn snippet(body: &str) -> &str {
    match body.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
