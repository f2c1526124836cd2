//! Reference index client over a JSON HTTP API.
//!
//! Every request is preceded by a randomized politeness delay.

use anyhow::Result;
use rand::Rng;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::{
    IdentityDetail, IndexFilm, IndexFilmHit, IndexPerson, LookupError, LookupResult, Pool,
    ReferenceIndex,
};

const USER_AGENT: &str = concat!("film-resolver/", env!("CARGO_PKG_VERSION"));

pub struct HttpReferenceIndex {
    client: Client,
    base_url: String,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl HttpReferenceIndex {
    pub fn new(
        base_url: &str,
        timeout_sec: u64,
        min_delay_ms: u64,
        max_delay_ms: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            min_delay_ms,
            max_delay_ms: max_delay_ms.max(min_delay_ms),
        })
    }

    fn politeness_delay(&self) -> Duration {
        if self.max_delay_ms == 0 {
            return Duration::ZERO;
        }
        let ms = rand::rng().random_range(self.min_delay_ms..=self.max_delay_ms);
        Duration::from_millis(ms)
    }

    /// Detail links may be absolute or relative to the API root.
    fn absolute_url(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            path_or_url.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url,
                path_or_url.trim_start_matches('/')
            )
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> LookupResult<T> {
        std::thread::sleep(self.politeness_delay());
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(LookupError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            warn!("Reference index returned {} for {}", status, url);
            return Err(LookupError::BadResponse(format!("status {} for {}", status, url)));
        }

        response
            .json::<T>()
            .map_err(|e| LookupError::BadResponse(format!("{}: {}", url, e)))
    }
}

impl ReferenceIndex for HttpReferenceIndex {
    fn search_by_name(&self, name: &str, pool: Pool) -> LookupResult<Vec<IndexPerson>> {
        let url = format!(
            "{}/people/search?name={}&pool={}",
            self.base_url,
            urlencoding::encode(name),
            pool.as_str()
        );
        self.get_json(&url)
    }

    fn fetch_identity_detail(&self, detail_url: &str) -> LookupResult<IdentityDetail> {
        self.get_json(&self.absolute_url(detail_url))
    }

    fn search_by_title(&self, title: &str, year: Option<i32>) -> LookupResult<Vec<IndexFilmHit>> {
        let mut url = format!(
            "{}/films/search?title={}",
            self.base_url,
            urlencoding::encode(title)
        );
        if let Some(year) = year {
            url.push_str(&format!("&year={}", year));
        }
        self.get_json(&url)
    }

    fn fetch_film_detail(&self, detail_url: &str) -> LookupResult<IndexFilm> {
        self.get_json(&self.absolute_url(detail_url))
    }
}
