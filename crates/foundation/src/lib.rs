pub mod bounds;
pub mod date;
pub mod geo;
pub mod snapshot;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use date::*;
pub use geo::*;
pub use snapshot::*;
