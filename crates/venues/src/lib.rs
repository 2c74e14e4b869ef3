pub mod marker;
pub mod venue;

pub use marker::*;
pub use venue::*;
