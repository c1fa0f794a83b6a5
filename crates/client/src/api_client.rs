use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use rozgar_core::api::{
    DistrictListItem, DistrictListResponse, DistrictSummaryResponse, HealthResponse,
    HistoricalPoint, HistoricalResponse, NearbyResponse, StateSummaryResponse, TopDistrict,
    TopDistrictsResponse,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-request timeout. The dashboard falls back to snapshots on expiry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid server URL")?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    /// Append path segments to the base URL, keeping any path prefix it
    /// carries. Each segment is percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("server URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("API error ({}): {}", status, body);
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.url(&["api", "health"])?;
        self.get_json(url).await
    }

    pub async fn list_districts(&self) -> Result<Vec<DistrictListItem>> {
        let url = self.url(&["api", "districts"])?;
        let response: DistrictListResponse = self.get_json(url).await?;
        Ok(response.data)
    }

    pub async fn district_summary(&self, code: &str) -> Result<DistrictSummaryResponse> {
        let url = self.url(&["api", "districts", code, "summary"])?;
        self.get_json(url).await
    }

    pub async fn district_historical(&self, code: &str) -> Result<Vec<HistoricalPoint>> {
        let url = self.url(&["api", "districts", code, "historical"])?;
        let response: HistoricalResponse = self.get_json(url).await?;
        Ok(response.data)
    }

    /// Closest district to a point, or `None` when nothing is in range.
    pub async fn nearby_district(&self, lat: f64, lon: f64) -> Result<Option<NearbyResponse>> {
        let mut url = self.url(&["api", "districts", "nearby"])?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string());

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            anyhow::bail!("API error ({}): {}", status, body);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    pub async fn state_summary(&self) -> Result<StateSummaryResponse> {
        let url = self.url(&["api", "analytics", "state-summary"])?;
        self.get_json(url).await
    }

    pub async fn top_districts(&self, limit: usize) -> Result<Vec<TopDistrict>> {
        let mut url = self.url(&["api", "analytics", "top-districts"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let response: TopDistrictsResponse = self.get_json(url).await?;
        Ok(response.data)
    }
}
