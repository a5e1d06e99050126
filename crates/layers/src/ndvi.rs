use foundation::{DatasetSnapshot, GeoPoint, ObservationDate};

use crate::draw::{DrawCommand, Marker, MarkerShape, Popup};
use crate::layer::{Layer, LayerId};
use crate::symbology::{MarkerStyle, classify};

/// Renders NDVI snapshots as colored circle markers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NdviLayer {
    id: LayerId,
    pub style: MarkerStyle,
}

impl NdviLayer {
    pub fn new(id: u64) -> Self {
        Self {
            id: LayerId(id),
            style: MarkerStyle::default(),
        }
    }

    /// Draw commands that replace the current overlay with `snapshot`.
    ///
    /// The detach is emitted unconditionally and always comes first, so
    /// applying the result never leaves markers from an earlier snapshot.
    /// `previous_date` is used for the caption when the snapshot has no date.
    pub fn render(
        &self,
        snapshot: &DatasetSnapshot,
        previous_date: Option<&ObservationDate>,
    ) -> Vec<DrawCommand> {
        let mut out = Vec::with_capacity(snapshot.points.len() + 3);
        out.push(DrawCommand::DetachOverlay);
        for point in &snapshot.points {
            out.push(DrawCommand::AddMarker(self.marker(point)));
        }
        out.push(DrawCommand::AttachOverlay { layer: self.id });
        if let Some(date) = snapshot.date.as_ref().or(previous_date) {
            out.push(DrawCommand::SetDateText(date.clone()));
        }
        out
    }

    pub fn marker(&self, point: &GeoPoint) -> Marker {
        let class = classify(point.index);
        Marker {
            position: point.position(),
            shape: MarkerShape::Circle {
                color: class.color(),
                style: self.style,
            },
            popup: Popup {
                title: "NDVI".to_string(),
                lines: vec![
                    format!("Lat: {:.4}, Lng: {:.4}", point.lat, point.lng),
                    format!("Index: {:.2}", point.index),
                    format!("Status: {}", class.label()),
                ],
                link: None,
            },
        }
    }
}

impl Layer for NdviLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
