//! Dashboard controller: fetches resources, falls back to snapshots and
//! tracks the offline flag.

use crate::api_client::ApiClient;
use crate::snapshot::{ClientError, ClientResult, SnapshotKey, SnapshotStore, StateBundle};
use crate::state::{FetchOutcome, ResourceState};
use anyhow::Result;
use rozgar_core::api::{DistrictListItem, DistrictSummaryResponse, HistoricalPoint};
use rozgar_core::sort_fiscal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use time::OffsetDateTime;

/// Run one fetch against a resource, surfacing its snapshot first and
/// replacing the snapshot on success.
async fn refresh<T, Fut>(
    state: &mut ResourceState<T>,
    snapshots: &SnapshotStore,
    key: SnapshotKey,
    fetch: Fut,
) -> FetchOutcome
where
    T: Serialize + DeserializeOwned,
    Fut: Future<Output = Result<T>>,
{
    let snapshot = match snapshots.load::<T>(&key).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(snapshot = %key.name(), error = %e, "Ignoring unreadable snapshot");
            None
        }
    };
    state.begin(snapshot);

    match fetch.await {
        Ok(value) => {
            if let Err(e) = snapshots.save(&key, &value).await {
                tracing::warn!(snapshot = %key.name(), error = %e, "Failed to save snapshot");
            }
            state.succeed(value)
        }
        Err(e) => {
            tracing::warn!(snapshot = %key.name(), error = %e, "Fetch failed");
            state.fail(format!("{e:#}"))
        }
    }
}

async fn fetch_state_bundle(client: &ApiClient, top_limit: usize) -> Result<StateBundle> {
    let (state_summary, top_districts) =
        tokio::try_join!(client.state_summary(), client.top_districts(top_limit))?;
    Ok(StateBundle {
        state_summary,
        top_districts,
        timestamp: OffsetDateTime::now_utc(),
    })
}

async fn fetch_historical(client: &ApiClient, code: &str) -> Result<Vec<HistoricalPoint>> {
    let mut points = client.district_historical(code).await?;
    sort_fiscal(&mut points, |point| point.month.as_str());
    Ok(points)
}

/// Client-side dashboard state.
pub struct Dashboard {
    client: ApiClient,
    snapshots: SnapshotStore,
    top_limit: usize,
    pub districts: ResourceState<Vec<DistrictListItem>>,
    pub state_bundle: ResourceState<StateBundle>,
    pub summary: ResourceState<DistrictSummaryResponse>,
    pub historical: ResourceState<Vec<HistoricalPoint>>,
    selected: Option<String>,
    last_sync: Option<OffsetDateTime>,
}

impl Dashboard {
    pub fn new(client: ApiClient, snapshots: SnapshotStore, top_limit: usize) -> Self {
        Self {
            client,
            snapshots,
            top_limit,
            districts: ResourceState::Empty,
            state_bundle: ResourceState::Empty,
            summary: ResourceState::Empty,
            historical: ResourceState::Empty,
            selected: None,
            last_sync: None,
        }
    }

    /// Initial load: districts and the state bundle in parallel.
    ///
    /// Fails only when a resource could neither be fetched nor read from a
    /// snapshot. Afterwards the first district is selected if none is.
    pub async fn load(&mut self) -> ClientResult<()> {
        let client = &self.client;
        let snapshots = &self.snapshots;
        let (districts, bundle) = tokio::join!(
            refresh(
                &mut self.districts,
                snapshots,
                SnapshotKey::Districts,
                client.list_districts(),
            ),
            refresh(
                &mut self.state_bundle,
                snapshots,
                SnapshotKey::StateBundle,
                fetch_state_bundle(client, self.top_limit),
            ),
        );
        self.record(&[districts, bundle]);

        if let Some(message) = self.districts.error() {
            return Err(ClientError::Unavailable {
                resource: "districts".to_string(),
                message: message.to_string(),
            });
        }
        if let Some(message) = self.state_bundle.error() {
            return Err(ClientError::Unavailable {
                resource: "state summary".to_string(),
                message: message.to_string(),
            });
        }

        if self.selected.is_none() {
            let first = self
                .districts
                .value()
                .and_then(|list| list.first())
                .map(|district| district.district_code.clone());
            if let Some(code) = first {
                self.select_district(&code).await;
            }
        }
        Ok(())
    }

    /// Select a district and fetch its summary and history in parallel.
    ///
    /// Returns the worse of the two outcomes.
    pub async fn select_district(&mut self, code: &str) -> FetchOutcome {
        if self.selected.as_deref() != Some(code) {
            self.summary = ResourceState::Empty;
            self.historical = ResourceState::Empty;
        }
        self.selected = Some(code.to_string());

        let client = &self.client;
        let snapshots = &self.snapshots;
        let (summary, historical) = tokio::join!(
            refresh(
                &mut self.summary,
                snapshots,
                SnapshotKey::District(code.to_string()),
                client.district_summary(code),
            ),
            refresh(
                &mut self.historical,
                snapshots,
                SnapshotKey::Historical(code.to_string()),
                fetch_historical(client, code),
            ),
        );
        self.record(&[summary, historical]);

        match (summary, historical) {
            (FetchOutcome::Failed, _) | (_, FetchOutcome::Failed) => FetchOutcome::Failed,
            (FetchOutcome::Offline, _) | (_, FetchOutcome::Offline) => FetchOutcome::Offline,
            _ => FetchOutcome::Fresh,
        }
    }

    /// Select the district nearest to a point. Returns its code, or `None`
    /// when the server knows no district in range.
    pub async fn detect_district(&mut self, lat: f64, lon: f64) -> Result<Option<String>> {
        let Some(nearby) = self.client.nearby_district(lat, lon).await? else {
            tracing::info!(lat = lat, lon = lon, "No district near location");
            return Ok(None);
        };
        tracing::info!(district_code = %nearby.district_code, "Detected district from location");
        self.select_district(&nearby.district_code).await;
        Ok(Some(nearby.district_code))
    }

    /// Stamp the sync time once every fetch succeeded and nothing on
    /// display is a snapshot.
    fn record(&mut self, outcomes: &[FetchOutcome]) {
        if outcomes.iter().all(|o| *o == FetchOutcome::Fresh) && !self.is_offline() {
            self.last_sync = Some(OffsetDateTime::now_utc());
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// True while any displayed resource is a stale snapshot.
    pub fn is_offline(&self) -> bool {
        self.districts.is_stale()
            || self.state_bundle.is_stale()
            || self.summary.is_stale()
            || self.historical.is_stale()
    }

    /// Time of the last fully successful fetch, or of the snapshot on display.
    pub fn last_sync(&self) -> Option<OffsetDateTime> {
        self.last_sync
            .or_else(|| self.state_bundle.value().map(|bundle| bundle.timestamp))
    }

    /// Selected district's entry in the districts list.
    pub fn selected_district(&self) -> Option<&DistrictListItem> {
        let code = self.selected.as_deref()?;
        self.districts
            .value()?
            .iter()
            .find(|district| district.district_code == code)
    }

    /// 1-based position of the selected district in the ranking.
    pub fn selected_rank(&self) -> Option<usize> {
        let code = self.selected.as_deref()?;
        self.state_bundle
            .value()?
            .top_districts
            .iter()
            .position(|district| district.district_code == code)
            .map(|index| index + 1)
    }
}
