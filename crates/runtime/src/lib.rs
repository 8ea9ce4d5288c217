pub mod clock;
pub mod debounce;
pub mod metrics;
pub mod timer;

pub use clock::*;
pub use debounce::*;
pub use metrics::*;
pub use timer::*;
