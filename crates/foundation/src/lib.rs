pub mod bounds;
pub mod geo;
pub mod time;

// Small, well-tested geographic and timing primitives only.
pub use bounds::*;
pub use geo::*;
pub use time::*;
