pub mod countries;

use crate::error::AppResult;
use crate::models::{CountryCode, CountryDetail};
use async_trait::async_trait;
use std::sync::Arc;

pub use countries::RestCountriesService;

#[async_trait]
pub trait CountriesService: Send + Sync + 'static {
    async fn fetch_country(&self, code: &CountryCode) -> AppResult<CountryDetail>;
}

/// Shared handle to whichever countries backend the app was launched with.
#[derive(Clone)]
pub struct CountriesHandle(Arc<dyn CountriesService>);

impl CountriesHandle {
    pub fn new<S: CountriesService>(service: S) -> Self {
        Self(Arc::new(service))
    }

    pub async fn fetch_country(&self, code: &CountryCode) -> AppResult<CountryDetail> {
        self.0.fetch_country(code).await
    }
}

impl PartialEq for CountriesHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
