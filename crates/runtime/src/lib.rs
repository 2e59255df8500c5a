pub mod clock;
pub mod debounce;

pub use clock::*;
pub use debounce::*;
