pub mod area;
pub mod radius;
pub mod request;
pub mod source;
pub mod zoom;

pub use area::*;
pub use radius::*;
pub use request::*;
pub use source::*;
pub use zoom::*;
