//! Plain data types shared by the shop, the actors and the runtime.

pub mod ids;
pub mod visit;

pub use ids::*;
pub use visit::*;
