//! Data types for the ua2 element layer.
//!
//! Everything in this crate is plain data: geometry, node snapshots, the two
//! selector kinds understood by the native search APIs, and the locator that
//! produced an element. No type here talks to a device.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: serde-serializable, no native state
//! - **Kind-tagged**: every selector says which native search API it targets
//! - **Copy where cheap**: geometry is `Copy`, snapshots are owned and cloned on demand

pub mod by;
pub mod geometry;
pub mod node;
pub mod selector;

pub use by::*;
pub use geometry::*;
pub use node::*;
pub use selector::*;
