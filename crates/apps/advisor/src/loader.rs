use std::fmt;

use foundation::ObservationDate;
use streaming::{endpoints, RequestSequencer, RequestToken};

use crate::error::ClientError;

/// Which snapshot to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    Latest,
    Date(ObservationDate),
}

impl LoadTarget {
    /// `None`, an empty string, and `"latest"` all mean the newest snapshot.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => LoadTarget::Latest,
            Some(s) if s.eq_ignore_ascii_case("latest") => LoadTarget::Latest,
            Some(s) => LoadTarget::Date(ObservationDate::from(s)),
        }
    }

    /// Backend path serving this target.
    pub fn endpoint(&self) -> String {
        match self {
            LoadTarget::Latest => endpoints::DATA_LATEST.to_string(),
            LoadTarget::Date(date) => endpoints::data_by_date(date.as_str()),
        }
    }
}

impl fmt::Display for LoadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadTarget::Latest => f.write_str("latest"),
            LoadTarget::Date(date) => write!(f, "{date}"),
        }
    }
}

/// A load that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub token: RequestToken,
    pub target: LoadTarget,
}

/// Result of completing a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The overlay now shows this snapshot.
    Applied {
        date: Option<ObservationDate>,
        markers: usize,
    },
    /// A newer load was issued in the meantime; the response was dropped.
    Stale,
    /// The request failed; map state is unchanged.
    Failed(ClientError),
}

/// Issues tokens for snapshot loads and tells current responses from stale
/// ones.
#[derive(Debug, Default, Clone)]
pub struct DataLoader {
    sequencer: RequestSequencer,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, target: LoadTarget) -> PendingLoad {
        PendingLoad {
            token: self.sequencer.issue(),
            target,
        }
    }

    pub fn is_current(&self, pending: &PendingLoad) -> bool {
        self.sequencer.is_current(pending.token)
    }

    /// Makes every outstanding load stale without starting a new one.
    ///
    /// In-flight requests still run to completion; their responses are dropped.
    pub fn invalidate(&mut self) {
        self.sequencer.issue();
    }

    pub fn issued(&self) -> u64 {
        self.sequencer.issued()
    }
}
