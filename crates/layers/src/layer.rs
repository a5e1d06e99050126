use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LayerId(pub u64);

pub trait Layer {
    fn id(&self) -> LayerId;
}

/// Data layer selected by the map's radio inputs.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    #[default]
    Ndvi,
    /// Base map and farm markers only.
    None,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Ndvi => "ndvi",
            LayerKind::None => "none",
        }
    }
}

impl std::str::FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ndvi" => Ok(LayerKind::Ndvi),
            "none" | "off" => Ok(LayerKind::None),
            other => Err(format!("unknown layer '{other}' (expected ndvi or none)")),
        }
    }
}
