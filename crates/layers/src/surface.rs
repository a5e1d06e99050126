use foundation::{GeoBounds, MapView, ObservationDate};
use serde::Serialize;

use crate::draw::{DrawCommand, Marker};
use crate::layer::LayerId;
use crate::symbology::{LegendEntry, legend};

/// Raster base layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    pub url_template: &'static str,
    pub attribution: &'static str,
}

impl TileLayer {
    pub const OPEN_STREET_MAP: TileLayer = TileLayer {
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
    };
}

/// Markers attached to the map for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub layer: LayerId,
    pub markers: Vec<Marker>,
}

impl Overlay {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::enclosing(self.markers.iter().map(|m| m.position))
    }
}

/// Model of the map widget: base view, farm pins, and at most one overlay.
///
/// Overlay markers are staged by [`DrawCommand::AddMarker`] and only become
/// visible on [`DrawCommand::AttachOverlay`], so between calls to
/// [`MapSurface::apply`] the overlay is either the old one, none, or the new
/// one in full.
#[derive(Debug, Clone)]
pub struct MapSurface {
    view: MapView,
    base: TileLayer,
    farm_markers: Vec<Marker>,
    overlay: Option<Overlay>,
    staged: Vec<Marker>,
    date_text: Option<ObservationDate>,
}

/// Serializable view of the surface for CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceState<'a> {
    pub center: [f64; 2],
    pub zoom: u8,
    pub base: &'a TileLayer,
    pub date: Option<String>,
    pub farm_markers: &'a [Marker],
    pub overlay: Option<&'a Overlay>,
    /// Extent of the overlay markers, absent without an overlay.
    pub overlay_bounds: Option<GeoBounds>,
    pub legend: Vec<LegendEntry>,
}

impl MapSurface {
    pub fn new(view: MapView, base: TileLayer) -> Self {
        Self {
            view,
            base,
            farm_markers: Vec::new(),
            overlay: None,
            staged: Vec::new(),
            date_text: None,
        }
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    pub fn apply(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        for cmd in commands {
            match cmd {
                DrawCommand::DetachOverlay => {
                    self.overlay = None;
                    self.staged.clear();
                }
                DrawCommand::AddMarker(marker) => self.staged.push(marker),
                DrawCommand::AttachOverlay { layer } => {
                    // Never two overlays at once, even without a prior detach.
                    self.overlay = Some(Overlay {
                        layer,
                        markers: std::mem::take(&mut self.staged),
                    });
                }
                DrawCommand::SetDateText(date) => self.date_text = Some(date),
            }
        }
    }

    pub fn detach_overlay(&mut self) {
        self.apply([DrawCommand::DetachOverlay]);
    }

    pub fn add_farm_markers(&mut self, markers: impl IntoIterator<Item = Marker>) {
        self.farm_markers.extend(markers);
    }

    pub fn farm_markers(&self) -> &[Marker] {
        &self.farm_markers
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_marker_count(&self) -> usize {
        self.overlay.as_ref().map_or(0, Overlay::len)
    }

    /// Farm pins plus overlay markers.
    pub fn total_marker_count(&self) -> usize {
        self.farm_markers.len() + self.overlay_marker_count()
    }

    pub fn date(&self) -> Option<&ObservationDate> {
        self.date_text.as_ref()
    }

    /// Caption in `YYYY/MM/DD` form.
    pub fn date_text(&self) -> Option<String> {
        self.date_text.as_ref().map(ObservationDate::display)
    }

    pub fn state(&self) -> SurfaceState<'_> {
        SurfaceState {
            center: [self.view.center.lat, self.view.center.lng],
            zoom: self.view.zoom,
            base: &self.base,
            date: self.date_text(),
            farm_markers: &self.farm_markers,
            overlay: self.overlay.as_ref(),
            overlay_bounds: self.overlay.as_ref().and_then(Overlay::bounds),
            legend: legend(),
        }
    }
}

impl Default for MapSurface {
    fn default() -> Self {
        Self::new(MapView::DEFAULT, TileLayer::OPEN_STREET_MAP)
    }
}

#[cfg(test)]
mod tests {
    use super::MapSurface;
    use crate::draw::{DrawCommand, Marker, MarkerShape, Popup};
    use crate::layer::LayerId;
    use crate::ndvi::NdviLayer;
    use foundation::{DatasetSnapshot, GeoPoint, LatLng, ObservationDate};

    fn snapshot(date: &str, n: usize) -> DatasetSnapshot {
        DatasetSnapshot::new(
            Some(ObservationDate::from(date)),
            (0..n)
                .map(|i| GeoPoint::new(35.0 + i as f64 * 0.1, 139.0, 0.5))
                .collect(),
        )
    }

    fn pin(lat: f64, lng: f64) -> Marker {
        Marker {
            position: LatLng::new(lat, lng),
            shape: MarkerShape::Pin,
            popup: Popup::default(),
        }
    }

    #[test]
    fn render_leaves_exactly_one_marker_per_point() {
        let layer = NdviLayer::new(1);
        let mut surface = MapSurface::default();
        let snap = snapshot("20240315", 4);

        surface.apply(layer.render(&snap, None));
        assert_eq!(surface.overlay_marker_count(), 4);

        // Same snapshot again: replaced, not doubled.
        surface.apply(layer.render(&snap, surface.date().cloned().as_ref()));
        assert_eq!(surface.overlay_marker_count(), 4);
    }

    #[test]
    fn new_snapshot_replaces_previous_overlay() {
        let layer = NdviLayer::new(1);
        let mut surface = MapSurface::default();
        surface.apply(layer.render(&snapshot("20240301", 5), None));
        surface.apply(layer.render(&snapshot("20240101", 2), None));

        assert_eq!(surface.overlay_marker_count(), 2);
        assert_eq!(surface.date_text().as_deref(), Some("2024/01/01"));
    }

    #[test]
    fn staged_markers_are_invisible_until_attach() {
        let mut surface = MapSurface::default();
        surface.apply([
            DrawCommand::DetachOverlay,
            DrawCommand::AddMarker(pin(35.0, 139.0)),
        ]);
        assert!(surface.overlay().is_none());

        surface.apply([DrawCommand::AttachOverlay { layer: LayerId(9) }]);
        let overlay = surface.overlay().expect("attached");
        assert_eq!(overlay.layer, LayerId(9));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn farm_markers_survive_overlay_changes() {
        let layer = NdviLayer::new(1);
        let mut surface = MapSurface::default();
        surface.add_farm_markers([pin(43.0, 141.0), pin(34.0, 135.0)]);

        surface.apply(layer.render(&snapshot("20240301", 3), None));
        assert_eq!(surface.total_marker_count(), 5);

        surface.detach_overlay();
        assert_eq!(surface.overlay_marker_count(), 0);
        assert_eq!(surface.farm_markers().len(), 2);
    }

    #[test]
    fn overlay_bounds_cover_markers() {
        let layer = NdviLayer::new(1);
        let mut surface = MapSurface::default();
        surface.apply(layer.render(&snapshot("20240301", 3), None));
        let b = surface.overlay().and_then(|o| o.bounds()).expect("bounds");
        assert!((b.south - 35.0).abs() < 1e-9);
        assert!((b.north - 35.2).abs() < 1e-9);
    }

    #[test]
    fn state_serializes_for_output() {
        let layer = NdviLayer::new(1);
        let mut surface = MapSurface::default();
        surface.apply(layer.render(&snapshot("20240315", 1), None));
        let json = serde_json::to_value(surface.state()).expect("serialize");
        assert_eq!(json["date"], "2024/03/15");
        assert_eq!(json["zoom"], 5);
        assert_eq!(json["overlay"]["markers"][0]["shape"]["shape"], "circle");
        assert_eq!(json["overlay_bounds"]["south"], 35.0);
        assert_eq!(json["legend"].as_array().map(Vec::len), Some(5));
        assert_eq!(json["legend"][1]["color"], "#32CD32");
        assert_eq!(json["legend"][1]["class"], "good");
    }

    #[test]
    fn state_without_overlay_has_no_bounds() {
        let surface = MapSurface::default();
        let state = surface.state();
        assert!(state.overlay.is_none());
        assert!(state.overlay_bounds.is_none());
        assert_eq!(state.legend.len(), 5);
    }
}
