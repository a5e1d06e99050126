pub mod draw;
pub mod farms;
pub mod layer;
pub mod ndvi;
pub mod surface;
pub mod symbology;

pub use layer::*;
