use crate::date::ObservationDate;
use crate::geo::GeoPoint;

/// One dated batch of NDVI observations.
///
/// A snapshot is drawn once and then dropped; only the overlay built from it
/// outlives the load.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DatasetSnapshot {
    /// Observation date reported by the server, if any.
    pub date: Option<ObservationDate>,
    pub points: Vec<GeoPoint>,
}

impl DatasetSnapshot {
    pub fn new(date: Option<ObservationDate>, points: Vec<GeoPoint>) -> Self {
        Self { date, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
