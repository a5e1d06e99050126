/// A WGS84 position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One NDVI observation.
///
/// `index` is a normalized vegetation score, nominally in `[-1, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub index: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64, index: f64) -> Self {
        Self { lat, lng, index }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Center and zoom of the base map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    /// Rough geographic center of Japan at a country-wide zoom.
    pub const DEFAULT: MapView = MapView {
        center: LatLng::new(36.2048, 138.2529),
        zoom: 5,
    };

    pub const fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::DEFAULT
    }
}
