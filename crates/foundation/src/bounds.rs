use crate::geo::LatLng;

/// Axis-aligned lat/lng bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        GeoBounds {
            south,
            west,
            north,
            east,
        }
    }

    /// Smallest box containing every position, or `None` for an empty input.
    pub fn enclosing(positions: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut out = GeoBounds::new(first.lat, first.lng, first.lat, first.lng);
        for p in iter {
            out.south = out.south.min(p.lat);
            out.north = out.north.max(p.lat);
            out.west = out.west.min(p.lng);
            out.east = out.east.max(p.lng);
        }
        Some(out)
    }
}
