use foundation::{LatLng, ObservationDate};
use serde::Serialize;

use crate::layer::LayerId;
use crate::symbology::MarkerStyle;

/// A link shown at the bottom of a popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupLink {
    pub href: String,
    pub text: String,
}

/// Popup content attached to a marker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<PopupLink>,
}

/// How a marker is painted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MarkerShape {
    /// Default map pin.
    Pin,
    /// Filled circle in a classification color.
    Circle { color: &'static str, style: MarkerStyle },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLng,
    pub shape: MarkerShape,
    pub popup: Popup,
}

/// Instructions for the map surface, produced by pure layer renderers.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Remove the current overlay, if any, and discard staged markers.
    DetachOverlay,
    /// Stage a marker for the next overlay.
    AddMarker(Marker),
    /// Publish all staged markers as the overlay of `layer`.
    AttachOverlay { layer: LayerId },
    /// Update the "current date" caption.
    SetDateText(ObservationDate),
}
