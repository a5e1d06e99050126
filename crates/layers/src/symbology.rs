use serde::Serialize;

/// Vegetation status bucket for an NDVI value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VegetationClass {
    Best,
    Good,
    Normal,
    Caution,
    Poor,
}

impl VegetationClass {
    /// Buckets from highest to lowest; classification takes the first match.
    pub const ALL: [VegetationClass; 5] = [
        VegetationClass::Best,
        VegetationClass::Good,
        VegetationClass::Normal,
        VegetationClass::Caution,
        VegetationClass::Poor,
    ];

    /// Exclusive lower bound, or `None` for the catch-all bucket.
    pub const fn lower_bound(&self) -> Option<f64> {
        match self {
            VegetationClass::Best => Some(0.8),
            VegetationClass::Good => Some(0.6),
            VegetationClass::Normal => Some(0.4),
            VegetationClass::Caution => Some(0.2),
            VegetationClass::Poor => None,
        }
    }

    /// CSS hex color used for markers.
    pub const fn color(&self) -> &'static str {
        match self {
            VegetationClass::Best => "#006400",
            VegetationClass::Good => "#32CD32",
            VegetationClass::Normal => "#FFD700",
            VegetationClass::Caution => "#FFA500",
            VegetationClass::Poor => "#FF0000",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            VegetationClass::Best => "Best growth",
            VegetationClass::Good => "Good growth",
            VegetationClass::Normal => "Normal growth",
            VegetationClass::Caution => "Caution",
            VegetationClass::Poor => "Poor growth",
        }
    }
}

/// Maps an NDVI value to its bucket.
///
/// Total over all `f64`: anything not strictly above 0.2 (negatives, NaN)
/// lands in [`VegetationClass::Poor`].
pub fn classify(index: f64) -> VegetationClass {
    for class in VegetationClass::ALL {
        match class.lower_bound() {
            Some(bound) if index > bound => return class,
            Some(_) => {}
            None => return class,
        }
    }
    VegetationClass::Poor
}

/// One legend row: swatch color, label and the bucket's lower bound.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub class: VegetationClass,
    pub color: &'static str,
    pub label: &'static str,
    pub above: Option<f64>,
}

/// Legend rows, highest bucket first.
pub fn legend() -> Vec<LegendEntry> {
    VegetationClass::ALL
        .iter()
        .map(|c| LegendEntry {
            class: *c,
            color: c.color(),
            label: c.label(),
            above: c.lower_bound(),
        })
        .collect()
}

/// Paint parameters for circle markers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub radius_px: f32,
    pub fill_opacity: f32,
    pub stroke_width_px: f32,
}

impl MarkerStyle {
    pub const fn new(radius_px: f32, fill_opacity: f32, stroke_width_px: f32) -> Self {
        Self {
            radius_px,
            fill_opacity,
            stroke_width_px,
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius_px: 8.0,
            fill_opacity: 0.7,
            stroke_width_px: 1.0,
        }
    }
}
