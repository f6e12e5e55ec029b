//! ua2 runtime - native handle contracts and their collaborators
//!
//! This crate defines the boundary between the element layer and the
//! platform accessibility API:
//!
//! - **Handles**: [`LiveHandle`] and [`ReplayHandle`], the two incompatible
//!   native element handles, and [`NativeHandle`] tagging either
//! - **Collaborators**: node bridge, device search, selector synthesis and
//!   coordinate mapping, consumed as trait objects
//! - **Errors**: the shared [`Error`] taxonomy
//! - **Memory backend**: [`memory`], an in-memory hierarchy implementing all
//!   of the above for tests and offline inspection
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │     ua2     │  Elements, attribute registry, fallback resolver
//! └──────┬──────┘
//!        │ consumes traits
//! ┌──────▼──────┐
//! │ ua2-runtime │  This crate
//! │  ┌────────┐ │
//! │  │ Handle │ │  Live / replay native handles
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Collab │ │  Bridge, device, synthesis, coordinates
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Memory │ │  In-memory hierarchy backend
//! │  └────────┘ │
//! └─────────────┘
//! ```

pub mod collaborator;
pub mod error;
pub mod handle;
pub mod memory;

pub use collaborator::{AccessibilityBridge, CoordinateMapper, DeviceSearch, SelectorSynthesis};
pub use error::{Error, Result};
pub use handle::{LiveHandle, NativeHandle, ReplayHandle};
