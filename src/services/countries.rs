use crate::config::CountriesSettings;
use crate::error::{AppError, AppResult};
use crate::models::{CountryCode, CountryDetail, DETAIL_FIELDS};
use crate::services::CountriesService;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("CountryAtlas/", env!("CARGO_PKG_VERSION"));

/// Client for a REST Countries compatible `/alpha/{code}` endpoint.
#[derive(Clone)]
pub struct RestCountriesService {
    client: reqwest::Client,
    base_url: String,
}

impl RestCountriesService {
    pub fn new(settings: &CountriesSettings) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn detail_url(&self, code: &CountryCode) -> String {
        format!("{}/{}?fields={}", self.base_url, code, DETAIL_FIELDS)
    }
}

#[async_trait]
impl CountriesService for RestCountriesService {
    async fn fetch_country(&self, code: &CountryCode) -> AppResult<CountryDetail> {
        let url = self.detail_url(code);
        debug!("GET {}", url);

        let res = self.client.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(AppError::Api { status, message });
        }

        let body = res.bytes().await?;
        let detail: CountryDetail = serde_json::from_slice(&body)?;
        Ok(detail)
    }
}
