//! Wire types for the farm advisory backend.
//!
//! This module defines the JSON shapes for:
//! - Map data (farms, available dates, NDVI snapshots)
//! - Chat requests and advice responses
//!
//! Payload types mirror the server's field names; conversions into the
//! `foundation` domain types live next to them.

use foundation::{DatasetSnapshot, GeoPoint, LatLng, ObservationDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Endpoint paths, relative to the backend base URL.
pub mod endpoints {
    pub const FARMS: &str = "/map/farms";
    pub const DATES: &str = "/map/dates";
    pub const DATA_LATEST: &str = "/map/data/latest";
    pub const CHAT_ASK: &str = "/chatbot/ask";
    pub const CHAT_WEATHER: &str = "/chatbot/weather";

    pub fn data_by_date(date: &str) -> String {
        format!("/map/data/by-date/{date}")
    }

    pub fn farm_advice(farm_id: &str) -> String {
        format!("/chatbot/farm/{farm_id}/advice")
    }

    /// Farm detail page linked from farm marker popups.
    pub fn farm_page(farm_id: &str) -> String {
        format!("/farm/{farm_id}")
    }

    pub const CHAT_PAGE: &str = "/chatbot";
}

/// One NDVI observation as sent by the server.
///
/// Older servers name the score `ndvi`; both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointPayload {
    pub lat: f64,
    pub lng: f64,
    #[serde(alias = "ndvi")]
    pub index: f64,
}

impl From<PointPayload> for GeoPoint {
    fn from(p: PointPayload) -> Self {
        GeoPoint::new(p.lat, p.lng, p.index)
    }
}

/// Body of `/map/data/latest` and `/map/data/by-date/{date}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPayload {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub data: Vec<PointPayload>,
}

impl From<SnapshotPayload> for DatasetSnapshot {
    fn from(p: SnapshotPayload) -> Self {
        DatasetSnapshot::new(
            p.date.map(ObservationDate::from),
            p.data.into_iter().map(GeoPoint::from).collect(),
        )
    }
}

/// Body of `/map/dates`.
pub type DatesPayload = Vec<String>;

pub fn dates_from_payload(p: DatesPayload) -> Vec<ObservationDate> {
    p.into_iter().map(ObservationDate::from).collect()
}

/// Farm identifiers arrive as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FarmId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for FarmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FarmId::Number(n) => write!(f, "{n}"),
            FarmId::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of `/map/farms`.
///
/// `coordinates` is kept as raw JSON: it may be a list of positions (the
/// first is used), a single `{lat, lng}` object, or something unusable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmPayload {
    pub id: FarmId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl FarmPayload {
    /// Shape-checks `coordinates` and returns the marker position, if any.
    pub fn position(&self) -> Option<LatLng> {
        match &self.coordinates {
            Value::Array(items) => items.first().and_then(lat_lng_object),
            obj @ Value::Object(_) => lat_lng_object(obj),
            _ => None,
        }
    }
}

fn lat_lng_object(v: &Value) -> Option<LatLng> {
    let lat = v.get("lat")?.as_f64()?;
    let lng = v.get("lng")?.as_f64()?;
    Some(LatLng::new(lat, lng))
}

/// Body of `POST /chatbot/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            farm_id: None,
            date: None,
        }
    }
}

/// Reply to `POST /chatbot/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

/// Reply to the weather and farm advice endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
}
