pub mod ids;
pub mod money;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use ids::*;
pub use money::*;
pub use time::*;
