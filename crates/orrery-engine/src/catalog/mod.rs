// catalog/mod.rs
//
// Which bodies exist, their scene indices, and the facts that feed their tilt.

pub mod bodies;
pub mod facts;

pub use bodies::{BodyCatalog, BodyDesc};
pub use facts::BodyFacts;
