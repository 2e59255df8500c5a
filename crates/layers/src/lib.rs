pub mod heat;

pub use heat::*;
