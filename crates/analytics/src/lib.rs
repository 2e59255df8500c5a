pub mod normalize;
pub mod records;

pub use normalize::*;
pub use records::*;
