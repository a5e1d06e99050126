//! Backend abstraction for the advisory HTTP API.
//!
//! The map shell and chat widget only see the `MapApi` / `ChatApi` traits;
//! `HttpBackend` implements both over reqwest. Tests substitute an
//! in-memory implementation.

use std::future::Future;
use std::pin::Pin;

use foundation::{DatasetSnapshot, ObservationDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use streaming::{
    dates_from_payload, endpoints, AdviceResponse, AskRequest, AskResponse, DatesPayload,
    FarmPayload, SnapshotPayload,
};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::loader::LoadTarget;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Map data endpoints.
///
/// Methods return boxed futures for dyn-compatibility.
pub trait MapApi: Send + Sync {
    /// `GET /map/farms`
    fn farms(&self) -> BoxFuture<'_, Result<Vec<FarmPayload>, ClientError>>;

    /// `GET /map/dates`
    fn dates(&self) -> BoxFuture<'_, Result<Vec<ObservationDate>, ClientError>>;

    /// `GET /map/data/latest` or `GET /map/data/by-date/{date}`.
    fn snapshot(&self, target: LoadTarget) -> BoxFuture<'_, Result<DatasetSnapshot, ClientError>>;
}

/// Chat and advice endpoints.
pub trait ChatApi: Send + Sync {
    /// `POST /chatbot/ask`
    fn ask(&self, request: AskRequest) -> BoxFuture<'_, Result<AskResponse, ClientError>>;

    /// `GET /chatbot/weather?farm_id=`
    fn weather(&self, farm_id: String) -> BoxFuture<'_, Result<AdviceResponse, ClientError>>;

    /// `GET /chatbot/farm/{farm_id}/advice?date=`
    fn farm_advice(
        &self,
        farm_id: String,
        date: Option<String>,
    ) -> BoxFuture<'_, Result<AdviceResponse, ClientError>>;
}

/// reqwest-backed implementation of both APIs.
///
/// No timeout and no retry: a hung request simply never completes.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config.api_url.clone())
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self.http.get(&url).query(query).send().await?;
        decode_response(resp).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!("POST {url}");
        let resp = self.http.post(&url).json(body).send().await?;
        decode_response(resp).await
    }
}

async fn decode_response<T: DeserializeOwned + Send>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl MapApi for HttpBackend {
    fn farms(&self) -> BoxFuture<'_, Result<Vec<FarmPayload>, ClientError>> {
        Box::pin(async move { self.get_json(endpoints::FARMS, &[]).await })
    }

    fn dates(&self) -> BoxFuture<'_, Result<Vec<ObservationDate>, ClientError>> {
        Box::pin(async move {
            let payload: DatesPayload = self.get_json(endpoints::DATES, &[]).await?;
            Ok(dates_from_payload(payload))
        })
    }

    fn snapshot(&self, target: LoadTarget) -> BoxFuture<'_, Result<DatasetSnapshot, ClientError>> {
        Box::pin(async move {
            let payload: SnapshotPayload = self.get_json(&target.endpoint(), &[]).await?;
            Ok(payload.into())
        })
    }
}

impl ChatApi for HttpBackend {
    fn ask(&self, request: AskRequest) -> BoxFuture<'_, Result<AskResponse, ClientError>> {
        Box::pin(async move { self.post_json(endpoints::CHAT_ASK, &request).await })
    }

    fn weather(&self, farm_id: String) -> BoxFuture<'_, Result<AdviceResponse, ClientError>> {
        Box::pin(async move {
            self.get_json(endpoints::CHAT_WEATHER, &[("farm_id", farm_id.as_str())])
                .await
        })
    }

    fn farm_advice(
        &self,
        farm_id: String,
        date: Option<String>,
    ) -> BoxFuture<'_, Result<AdviceResponse, ClientError>> {
        Box::pin(async move {
            let path = endpoints::farm_advice(&farm_id);
            match date.as_deref() {
                Some(date) => self.get_json(&path, &[("date", date)]).await,
                None => self.get_json(&path, &[]).await,
            }
        })
    }
}
