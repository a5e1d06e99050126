use streaming::FarmPayload;
use streaming::endpoints;

use crate::draw::{Marker, MarkerShape, Popup, PopupLink};
use crate::layer::{Layer, LayerId};

/// Farm location pins.
///
/// These markers live outside the NDVI overlay and are never replaced by it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FarmLayer {
    id: LayerId,
}

impl FarmLayer {
    pub fn new(id: u64) -> Self {
        Self { id: LayerId(id) }
    }

    /// One pin per farm with usable coordinates; the rest are skipped.
    pub fn markers(&self, farms: &[FarmPayload]) -> Vec<Marker> {
        farms
            .iter()
            .filter_map(|farm| {
                let position = farm.position()?;
                let id = farm.id.to_string();
                Some(Marker {
                    position,
                    shape: MarkerShape::Pin,
                    popup: Popup {
                        title: farm.name.clone(),
                        lines: Vec::new(),
                        link: Some(PopupLink {
                            href: endpoints::farm_page(&id),
                            text: "View details".to_string(),
                        }),
                    },
                })
            })
            .collect()
    }
}

impl Layer for FarmLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
