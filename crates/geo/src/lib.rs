pub mod bounds;
pub mod distance;
pub mod point;

// Geo crate: small, well-tested coordinate primitives only.
pub use bounds::*;
pub use distance::*;
pub use point::*;
