//! In-memory backend for handler tests.

use std::collections::HashMap;
use std::sync::Arc;

use foundation::{DatasetSnapshot, GeoPoint, ObservationDate};
use parking_lot::Mutex;
use streaming::{AdviceResponse, AskRequest, AskResponse, FarmPayload};

use crate::backend::{BoxFuture, ChatApi, MapApi};
use crate::error::ClientError;
use crate::loader::LoadTarget;

#[derive(Debug)]
struct FakeState {
    farms: Result<Vec<FarmPayload>, ClientError>,
    dates: Result<Vec<ObservationDate>, ClientError>,
    snapshots: HashMap<String, Result<DatasetSnapshot, ClientError>>,
    ask: Result<String, ClientError>,
    advice: Result<String, ClientError>,
    calls: Vec<String>,
    asked: Vec<AskRequest>,
}

/// Scripted backend. Clones share state, so a test can keep a handle while
/// the shell or widget owns another.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

pub fn unavailable() -> ClientError {
    ClientError::Transport("connection refused".to_string())
}

pub fn snapshot(date: &str, n: usize) -> DatasetSnapshot {
    DatasetSnapshot::new(
        Some(ObservationDate::from(date)),
        (0..n)
            .map(|i| GeoPoint::new(35.0 + i as f64 * 0.01, 139.0, 0.1 + 0.2 * (i % 5) as f64))
            .collect(),
    )
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                farms: Ok(Vec::new()),
                dates: Ok(Vec::new()),
                snapshots: HashMap::new(),
                ask: Err(unavailable()),
                advice: Err(unavailable()),
                calls: Vec::new(),
                asked: Vec::new(),
            })),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(self, target: LoadTarget, snap: DatasetSnapshot) -> Self {
        self.state.lock().snapshots.insert(target.endpoint(), Ok(snap));
        self
    }

    pub fn with_failing_snapshot(self, target: LoadTarget) -> Self {
        self.state
            .lock()
            .snapshots
            .insert(target.endpoint(), Err(unavailable()));
        self
    }

    pub fn with_farms_json(self, raw: &str) -> Self {
        let farms: Vec<FarmPayload> = serde_json::from_str(raw).expect("farm fixture");
        self.state.lock().farms = Ok(farms);
        self
    }

    pub fn with_dates(self, dates: &[&str]) -> Self {
        self.state.lock().dates = Ok(dates.iter().map(|d| ObservationDate::from(*d)).collect());
        self
    }

    pub fn with_failing_dates(self) -> Self {
        self.state.lock().dates = Err(unavailable());
        self
    }

    pub fn with_failing_farms(self) -> Self {
        self.state.lock().farms = Err(unavailable());
        self
    }

    pub fn with_answer(self, answer: &str) -> Self {
        self.state.lock().ask = Ok(answer.to_string());
        self
    }

    pub fn with_advice(self, advice: &str) -> Self {
        self.state.lock().advice = Ok(advice.to_string());
        self
    }

    /// Endpoints hit so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| *c == path).count()
    }

    pub fn asked(&self) -> Vec<AskRequest> {
        self.state.lock().asked.clone()
    }

    fn record(&self, path: String) {
        self.state.lock().calls.push(path);
    }
}

impl MapApi for FakeBackend {
    fn farms(&self) -> BoxFuture<'_, Result<Vec<FarmPayload>, ClientError>> {
        self.record(streaming::endpoints::FARMS.to_string());
        let result = self.state.lock().farms.clone();
        Box::pin(async move { result })
    }

    fn dates(&self) -> BoxFuture<'_, Result<Vec<ObservationDate>, ClientError>> {
        self.record(streaming::endpoints::DATES.to_string());
        let result = self.state.lock().dates.clone();
        Box::pin(async move { result })
    }

    fn snapshot(&self, target: LoadTarget) -> BoxFuture<'_, Result<DatasetSnapshot, ClientError>> {
        let path = target.endpoint();
        self.record(path.clone());
        let result = self
            .state
            .lock()
            .snapshots
            .get(&path)
            .cloned()
            .unwrap_or_else(|| {
                Err(ClientError::Status {
                    status: 404,
                    body: String::new(),
                })
            });
        Box::pin(async move { result })
    }
}

impl ChatApi for FakeBackend {
    fn ask(&self, request: AskRequest) -> BoxFuture<'_, Result<AskResponse, ClientError>> {
        self.record(streaming::endpoints::CHAT_ASK.to_string());
        let result = {
            let mut state = self.state.lock();
            state.asked.push(request);
            state.ask.clone()
        };
        Box::pin(async move { result.map(|response| AskResponse { response }) })
    }

    fn weather(&self, farm_id: String) -> BoxFuture<'_, Result<AdviceResponse, ClientError>> {
        self.record(format!("{}?farm_id={farm_id}", streaming::endpoints::CHAT_WEATHER));
        let result = self.state.lock().advice.clone();
        Box::pin(async move { result.map(|advice| AdviceResponse { advice }) })
    }

    fn farm_advice(
        &self,
        farm_id: String,
        _date: Option<String>,
    ) -> BoxFuture<'_, Result<AdviceResponse, ClientError>> {
        self.record(streaming::endpoints::farm_advice(&farm_id));
        let result = self.state.lock().advice.clone();
        Box::pin(async move { result.map(|advice| AdviceResponse { advice }) })
    }
}
