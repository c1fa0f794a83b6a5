//! District endpoints.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use rozgar_core::api::{
    DistrictListItem, DistrictListResponse, DistrictMetrics, DistrictRef,
    DistrictSummaryResponse, HistoricalPoint, HistoricalResponse, NearbyResponse,
};
use rozgar_core::{District, GeoPoint, PerformanceRecord, nearest_district, sort_fiscal};
use serde::Deserialize;

/// GET /api/districts - All districts sorted by name.
pub async fn list_districts(State(state): State<AppState>) -> ApiResult<Json<DistrictListResponse>> {
    let data = state
        .store
        .list_districts()
        .await?
        .into_iter()
        .map(|row| DistrictListItem::from(District::from(row)))
        .collect();
    Ok(Json(DistrictListResponse { data }))
}

/// GET /api/districts/{code}/summary - Latest month for one district.
pub async fn district_summary(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<DistrictSummaryResponse>> {
    let latest: PerformanceRecord = state
        .store
        .get_latest_performance(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("No data found".to_string()))?
        .into();

    // Records carry their own names; prefer the district table when present.
    let district = match state.store.get_district(&code).await? {
        Some(row) => {
            let district = District::from(row);
            DistrictRef {
                code: district.code,
                name: district.name,
                hindi_name: Some(district.hindi_name).filter(|name| !name.is_empty()),
            }
        }
        None => DistrictRef {
            code: latest.district_code.clone(),
            name: latest.district_name.clone(),
            hindi_name: latest.hindi_name.clone(),
        },
    };

    Ok(Json(DistrictSummaryResponse {
        district,
        data: DistrictMetrics::from(&latest),
    }))
}

/// GET /api/districts/{code}/historical - Recent months in April–March order.
pub async fn district_historical(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<HistoricalResponse>> {
    let limit = u32::try_from(state.config.query.historical_months).unwrap_or(u32::MAX);
    let mut data: Vec<HistoricalPoint> = state
        .store
        .get_recent_performance(&code, limit)
        .await?
        .into_iter()
        .map(|row| HistoricalPoint::from(&PerformanceRecord::from(row)))
        .collect();

    sort_fiscal(&mut data, |point| point.month.as_str());
    Ok(Json(HistoricalResponse { data }))
}

/// Query parameters for the nearby lookup. Kept as text so that malformed
/// numbers produce a JSON error body.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// GET /api/districts/nearby?lat=&lon= - Closest district within the radius.
pub async fn nearby_district(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<Json<NearbyResponse>> {
    let (Some(lat), Some(lon)) = (query.lat.as_deref(), query.lon.as_deref()) else {
        return Err(ApiError::BadRequest(
            "Latitude and longitude required".to_string(),
        ));
    };
    let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) else {
        return Err(ApiError::BadRequest(
            "Latitude and longitude must be numbers".to_string(),
        ));
    };
    let point = GeoPoint::new(lat, lon)?;

    let districts: Vec<District> = state
        .store
        .list_districts()
        .await?
        .into_iter()
        .map(District::from)
        .collect();

    let found = nearest_district(&districts, &point, state.config.query.nearby_radius_km)
        .ok_or_else(|| ApiError::NotFound("No district found nearby".to_string()))?;

    tracing::debug!(lat = lat, lon = lon, district_code = %found.code, "Resolved nearby district");
    Ok(Json(NearbyResponse {
        district_code: found.code.clone(),
        district_name: found.name.clone(),
    }))
}
